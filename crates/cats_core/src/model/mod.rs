//! Domain model for customers and the records they own.
//!
//! # Responsibility
//! - Define read models returned by repositories and services.
//! - Define write drafts accepted by create/update use-cases.
//! - Own the suggested tag vocabulary surfaced to clients.
//!
//! # Invariants
//! - Every child record names its owner by integer row id.
//! - Nothing is soft-deleted; removal is a hard delete with cascade.

pub mod customer;
pub mod tag;
pub mod vocabulary;
