//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cooldown;
mod repository;

pub use cooldown::CooldownStore;
pub use repository::{CommentRepository, FeedRepository};
