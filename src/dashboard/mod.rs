//! Screen controllers behind the dashboard pages.

pub mod forms;
pub mod list_screen;
pub mod notice;
pub mod overview;

#[cfg(test)]
pub(crate) mod fake;

pub use forms::{OrganizationForm, PersonForm, RecordForm};
pub use list_screen::ListScreen;
pub use notice::{Notice, NoticeLevel};
pub use overview::Overview;
