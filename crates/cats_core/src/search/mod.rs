//! Customer search entry points.
//!
//! # Responsibility
//! - Case-insensitive substring matching over customer names.
//! - Keep pattern escaping inside core.

pub mod name;
