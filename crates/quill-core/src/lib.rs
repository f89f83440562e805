//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the error taxonomy, ports for persistence and auth primitives, and
//! the account/post services that enforce the access-control rules.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
