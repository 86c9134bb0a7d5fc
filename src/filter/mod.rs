pub mod collate;
pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_search;
pub mod types;

pub use error::FilterError;
pub use filter::compute_visible_rows;
pub use filter_order::FilterOrder;
pub use filter_search::FilterSearch;
pub use types::*;
