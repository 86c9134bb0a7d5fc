use tracing::{error, info};

use super::notice::Notice;
use crate::filter::{compute_visible_rows, FilterError, ListViewState, PageSize, SortSpec, VisibleRows};
use crate::gateway::{GatewayError, RecordGateway, Resource};

/// State behind one collection page: the view settings, the last fetched
/// records and the current notice.
///
/// Gateway failures never escape as panics or lost state. They become an
/// error notice and the previously fetched records stay on screen.
#[derive(Debug, Clone)]
pub struct ListScreen<R: Resource> {
    state: ListViewState<R::Field>,
    records: Vec<R>,
    notice: Option<Notice>,
}

impl<R: Resource> Default for ListScreen<R> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl<R: Resource> ListScreen<R> {
    pub fn new(page_size: PageSize) -> Self {
        let mut state = ListViewState::new(R::DEFAULT_SORT);
        state.set_page_size(page_size);
        Self {
            state,
            records: Vec::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &ListViewState<R::Field> {
        &self.state
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Reload the collection. On failure the old records are kept.
    pub async fn refresh<G>(&mut self, gateway: &G) -> Result<(), GatewayError>
    where
        G: RecordGateway<R> + ?Sized,
    {
        match gateway.list().await {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                error!(kind = R::KIND.plural(), error = %e, "failed to load records");
                self.notice = Some(Notice::from_error(&format!("Failed to load {}", R::KIND.plural()), &e));
                Err(e)
            }
        }
    }

    pub fn visible(&self) -> VisibleRows<'_, R> {
        compute_visible_rows(&self.records, &self.state)
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count(self.visible().total_match_count)
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
    }

    /// Header click: same field flips direction, a new field sorts ascending.
    pub fn sort_by(&mut self, field: R::Field) {
        self.state.sort_by(field);
    }

    pub fn set_sort(&mut self, spec: SortSpec<R::Field>) {
        self.state.set_sort(spec);
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), FilterError> {
        self.state.set_page_size(PageSize::new(size)?);
        Ok(())
    }

    pub fn set_page(&mut self, index: usize) {
        self.state.set_page_index(index);
    }

    /// Delete `id`, then reload whatever the outcome so the table reflects
    /// the backend.
    pub async fn delete<G>(&mut self, gateway: &G, id: &str) -> Result<(), GatewayError>
    where
        G: RecordGateway<R> + ?Sized,
    {
        let outcome = gateway.delete(id).await;
        let refreshed = self.refresh(gateway).await;

        match outcome {
            Ok(()) => {
                info!(kind = R::KIND.label(), id, "record deleted");
                if refreshed.is_ok() {
                    self.notice = Some(Notice::success(format!("Deleted {} {}", R::KIND.label(), id)));
                }
                refreshed
            }
            Err(e) => {
                error!(kind = R::KIND.label(), id, error = %e, "delete failed");
                self.notice = Some(Notice::from_error(&format!("Failed to delete {}", R::KIND.label()), &e));
                Err(e)
            }
        }
    }
}
