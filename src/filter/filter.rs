use super::filter_order::FilterOrder;
use super::filter_search::FilterSearch;
use super::types::{ListRecord, ListViewState, VisibleRows};

/// Derive the rows to render from the full collection: search, then sort,
/// then cut out the current page.
///
/// Pure: the same inputs always give the same rows. An out-of-range page gives
/// an empty `rows` with the real `total_match_count`.
pub fn compute_visible_rows<'a, R: ListRecord>(
    records: &'a [R],
    state: &ListViewState<R::Field>,
) -> VisibleRows<'a, R> {
    let mut matched: Vec<&R> = match FilterSearch::needle(state.search_text()) {
        Some(needle) => records
            .iter()
            .filter(|record| FilterSearch::matches(*record, &needle))
            .collect(),
        None => records.iter().collect(),
    };

    FilterOrder::sort(&mut matched, state.sort_field(), state.sort_direction());

    let total_match_count = matched.len();
    let page_size = state.page_size().get();
    let start = state.page_index().saturating_mul(page_size).min(total_match_count);
    let end = start.saturating_add(page_size).min(total_match_count);

    VisibleRows {
        rows: matched[start..end].to_vec(),
        total_match_count,
    }
}
