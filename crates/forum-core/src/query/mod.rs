//! Typed SQL fragments and the feed query composer.
//!
//! A [`Fragment`] keeps SQL text and bind values interleaved in the order they
//! appear, so placeholders are numbered when the fragment is rendered and the
//! bind list can never drift out of step with the text.

mod composer;
mod fragment;

pub use composer::{PAGE_SIZE, compose_count, compose_fetch};
pub use fragment::{Fragment, FragmentError, Placeholder, SqlValue};
