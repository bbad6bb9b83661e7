//! # Forum Core
//!
//! The domain layer of the forum backend.
//! This crate holds the feed pagination engine, the comment submission flow,
//! and the ports they depend on. It has no infrastructure dependencies.

pub mod comments;
pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod query;

pub use error::{DomainError, RepoError};
