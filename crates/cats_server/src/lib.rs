//! HTTP server for the CATS customer tracking store.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::router;
pub use config::{DatabaseLocation, ServerConfig};
pub use error::ApiError;
pub use state::Database;
