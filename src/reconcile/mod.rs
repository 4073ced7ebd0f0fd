//! Shard reconciliation tool
//!
//! Given a list of titles, looks each one up across a fixed, ordered set of
//! store shards, appends the first raw value found to an output file, and
//! returns the titles found in no shard at all.

use crate::storage::DocumentStore;
use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the shard store with the given index
///
/// Shards are named by a numeric index over a contiguous range, e.g.
/// `112th.database.level`.
pub fn shard_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("{}th.database.level", index))
}

/// Loads the title list from a JSON array file
pub fn load_titles(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let titles = serde_json::from_str(&content)?;
    Ok(titles)
}

/// Looks every title up across the shards `[start, stop)`
///
/// For each title, shards are probed in ascending index order; the first hit
/// is appended to the output file newline-terminated and ends the probe for
/// that title. A lookup failure in one shard only means "try the next". After
/// all titles, every shard is closed.
///
/// # Returns
///
/// The unresolved ledger: titles found in no shard, in input order.
pub fn reconcile(
    titles: &[String],
    shard_dir: &Path,
    start: u64,
    stop: u64,
    output_path: &Path,
) -> Result<Vec<String>> {
    let mut shards = Vec::new();
    for index in start..stop {
        shards.push(DocumentStore::open(&shard_path(shard_dir, index))?);
    }

    let mut output = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_path)?;

    let mut unresolved: Vec<String> = Vec::new();

    for title in titles {
        unresolved.push(title.clone());
        for shard in &shards {
            match shard.get_raw(title) {
                Ok(Some(body)) => {
                    writeln!(output, "{}", body)?;
                    unresolved.pop();
                    break;
                }
                // A miss or a failed lookup both mean "try the next shard"
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("Shard lookup failed for {}: {}", title, e);
                    continue;
                }
            }
        }
    }

    for shard in shards {
        shard.close()?;
    }

    Ok(unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PageDocument;
    use std::collections::BTreeMap;

    fn sample_document(title: &str, text: &str) -> PageDocument {
        PageDocument {
            title: title.to_string(),
            wiki: String::new(),
            html: String::new(),
            text: text.to_string(),
            info: BTreeMap::new(),
            link: vec![],
        }
    }

    fn seed_shard(dir: &Path, index: u64, documents: &[PageDocument]) {
        let mut store = DocumentStore::open(&shard_path(dir, index)).unwrap();
        for doc in documents {
            store.put(doc).unwrap();
        }
        store.close().unwrap();
    }

    #[test]
    fn test_shard_path_naming() {
        let path = shard_path(Path::new("/data"), 112);
        assert_eq!(path, Path::new("/data/112th.database.level"));
    }

    #[test]
    fn test_fallback_to_later_shard() {
        let dir = tempfile::tempdir().unwrap();
        seed_shard(dir.path(), 0, &[]);
        seed_shard(dir.path(), 1, &[]);
        seed_shard(dir.path(), 2, &[sample_document("Cat", "found in shard 2")]);

        let output_path = dir.path().join("out.json");
        let titles = vec!["Cat".to_string()];
        let unresolved = reconcile(&titles, dir.path(), 0, 3, &output_path).unwrap();

        assert!(unresolved.is_empty());
        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("found in shard 2"));
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_first_hit_wins() {
        let dir = tempfile::tempdir().unwrap();
        seed_shard(dir.path(), 0, &[sample_document("Cat", "from shard 0")]);
        seed_shard(dir.path(), 1, &[sample_document("Cat", "from shard 1")]);

        let output_path = dir.path().join("out.json");
        let titles = vec!["Cat".to_string()];
        reconcile(&titles, dir.path(), 0, 2, &output_path).unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("from shard 0"));
        assert!(!written.contains("from shard 1"));
    }

    #[test]
    fn test_unresolved_accumulation() {
        let dir = tempfile::tempdir().unwrap();
        seed_shard(dir.path(), 0, &[]);
        seed_shard(dir.path(), 1, &[]);

        let output_path = dir.path().join("out.json");
        let titles = vec!["A".to_string(), "B".to_string()];
        let unresolved = reconcile(&titles, dir.path(), 0, 2, &output_path).unwrap();

        assert_eq!(unresolved, vec!["A".to_string(), "B".to_string()]);
        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_mixed_resolution() {
        let dir = tempfile::tempdir().unwrap();
        seed_shard(dir.path(), 0, &[sample_document("Cat", "cat body")]);

        let output_path = dir.path().join("out.json");
        let titles = vec!["Ghost".to_string(), "Cat".to_string()];
        let unresolved = reconcile(&titles, dir.path(), 0, 1, &output_path).unwrap();

        assert_eq!(unresolved, vec!["Ghost".to_string()]);
        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("cat body"));
    }

    #[test]
    fn test_load_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        std::fs::write(&path, r#"["Cat", "Feline"]"#).unwrap();

        let titles = load_titles(&path).unwrap();
        assert_eq!(titles, vec!["Cat".to_string(), "Feline".to_string()]);
    }
}
