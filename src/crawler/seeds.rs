//! Seed title generation
//!
//! Seed titles are produced from a template string and a numeric range; the
//! `{count}` placeholder in the template is replaced with each index in
//! `[start, stop)`.

/// Placeholder substituted with the seed index
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Generates the ordered sequence of seed titles for `[start, stop)`
///
/// # Example
///
/// ```
/// use wikiharvest::crawler::seed_titles;
///
/// let titles: Vec<String> = seed_titles("List of lists {count}", 3, 5).collect();
/// assert_eq!(titles, vec!["List of lists 3", "List of lists 4"]);
/// ```
pub fn seed_titles(template: &str, start: u64, stop: u64) -> impl Iterator<Item = String> + '_ {
    (start..stop).map(move |index| template.replace(COUNT_PLACEHOLDER, &index.to_string()))
}
