use super::types::ListRecord;

pub struct FilterSearch;

impl FilterSearch {
    /// Lowercased search needle, or `None` when the search retains everything.
    pub fn needle(search_text: &str) -> Option<String> {
        if search_text.is_empty() {
            None
        } else {
            Some(search_text.to_lowercase())
        }
    }

    /// True when `needle` is a substring of at least one searched field.
    /// `needle` must already be lowercased.
    pub fn matches<R: ListRecord>(record: &R, needle: &str) -> bool {
        record
            .search_values()
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(needle))
    }
}
