pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod session;
pub mod types;
pub mod validation;

pub use error::AppError;
