//! Crawl controller - main traversal orchestration
//!
//! Drives the exhaustive-but-once traversal of the title graph: seed titles
//! are generated from the configured range, each seed's page is fetched,
//! extracted, and persisted, and the seed's direct link targets are then
//! processed the same way. Links of links are never followed; the traversal
//! is exactly two levels deep.

use crate::config::Config;
use crate::crawler::fetcher::RevisionFetcher;
use crate::crawler::seeds::seed_titles;
use crate::extract::extract;
use crate::storage::{DocumentStore, PageDocument};
use crate::{HarvestError, Result};
use std::collections::HashSet;

/// Crawl controller owning the fetcher, the store handle, and the ledger
pub struct Controller {
    config: Config,
    fetcher: RevisionFetcher,
    store: DocumentStore,
    ledger: HashSet<String>,
}

impl Controller {
    /// Creates a controller over an already-opened store
    pub fn new(config: Config, store: DocumentStore) -> Result<Self> {
        let fetcher = RevisionFetcher::new(&config.application, &config.fetch)?;
        Ok(Self {
            config,
            fetcher,
            store,
            ledger: HashSet::new(),
        })
    }

    /// Runs the full seed range
    ///
    /// Per seed title:
    /// 1. The seed is removed from the visited ledger, so a title that was
    ///    already reached as someone else's link is still (re)processed as a
    ///    seed.
    /// 2. Empty markup means the page does not exist: nothing is persisted
    ///    and no links are explored.
    /// 3. Otherwise the page is extracted and persisted, then each link
    ///    target is processed once: marked visited before its fetch, so a
    ///    target reachable from several pages is fetched at most once.
    /// 4. The seed itself is marked visited after its link loop.
    pub async fn run(&mut self) -> Result<()> {
        let application = self.config.application.clone();

        for title in seed_titles(&application.template, application.start, application.stop) {
            // Re-arm the seed for this pass
            self.ledger.remove(&title);

            tracing::info!("Acquiring info for: {}", title);
            let wiki = self.fetcher.fetch_revision(&title).await?;
            if wiki.is_empty() {
                tracing::debug!("No content for {}, skipping", title);
                continue;
            }

            let document = self.build_document(&title, &wiki)?;
            tracing::info!("Persisting info for: {}", title);
            self.store.put(&document)?;

            for target in &document.link {
                if self.ledger.contains(target) {
                    continue;
                }
                // Mark before fetching so no other link list re-queues it
                self.ledger.insert(target.clone());

                tracing::info!("  Acquiring info for: {}", target);
                let wiki = self.fetcher.fetch_revision(target).await?;
                if wiki.is_empty() {
                    tracing::debug!("No content for {}, skipping", target);
                    continue;
                }

                let linked = self.build_document(target, &wiki)?;
                tracing::info!("  Persisting info for: {}", target);
                self.store.put(&linked)?;
            }

            self.ledger.insert(title);
        }

        Ok(())
    }

    fn build_document(&self, title: &str, wiki: &str) -> Result<PageDocument> {
        let content = extract(wiki).map_err(|message| HarvestError::Extract {
            title: title.to_string(),
            message,
        })?;
        Ok(PageDocument::new(title, wiki, content))
    }

    /// The visited ledger (titles processed or skipped so far this run)
    pub fn visited(&self) -> &HashSet<String> {
        &self.ledger
    }

    /// Consumes the controller, handing back the store for closing
    pub fn into_store(self) -> DocumentStore {
        self.store
    }
}

/// Runs a complete crawl for the given configuration
///
/// Opens the store, runs the controller over the full seed range, and closes
/// the store exactly once on both the success and the failure path.
pub async fn crawl(config: Config) -> Result<()> {
    let store = DocumentStore::open(std::path::Path::new(&config.store.path))?;
    let mut controller = Controller::new(config, store)?;

    let outcome = controller.run().await;
    let close_outcome = controller.into_store().close();

    // A run error takes precedence over a close error
    outcome?;
    close_outcome?;
    Ok(())
}
