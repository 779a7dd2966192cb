//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Normalize tag input before it reaches storage.
//! - Keep the HTTP layer decoupled from storage details.

pub mod application_service;
pub mod customer_service;
mod error;
pub mod note_service;

pub use error::{ServiceError, ServiceResult};
