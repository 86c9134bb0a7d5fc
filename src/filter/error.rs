use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("Invalid sort spec: {0}")]
    InvalidSortSpec(String),

    #[error("Invalid page size: {0} (allowed: 5, 10, 25, 50)")]
    InvalidPageSize(usize),
}
