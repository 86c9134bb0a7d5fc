pub mod auth;
pub mod organization;
pub mod overview;
pub mod person;
pub mod route;

use clap::Args;

use crate::dashboard::ListScreen;
use crate::filter::{FilterOrder, PageSize};
use crate::gateway::Resource;

/// View settings shared by `org list` and `person list`
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive text search across the listed fields")]
    pub search: Option<String>,

    #[arg(long, help = "Sort as \"<field> [asc|desc]\"")]
    pub sort: Option<String>,

    #[arg(long, default_value_t = 1, help = "Page number, starting at 1")]
    pub page: usize,

    #[arg(long, help = "Rows per page (5, 10, 25 or 50)")]
    pub page_size: Option<usize>,
}

impl ListArgs {
    /// Build a screen with these settings applied. Order matters: every
    /// setter except the page resets to the first page.
    pub fn screen<R: Resource>(&self, default_page_size: usize) -> anyhow::Result<ListScreen<R>> {
        let mut screen = ListScreen::new(PageSize::new(default_page_size).unwrap_or_default());

        if let Some(size) = self.page_size {
            screen.set_page_size(size)?;
        }
        if let Some(spec) = &self.sort {
            screen.set_sort(FilterOrder::parse(spec)?);
        }
        if let Some(text) = &self.search {
            screen.set_search(text.clone());
        }
        screen.set_page(self.page.saturating_sub(1));

        Ok(screen)
    }
}

pub(crate) fn display_opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
