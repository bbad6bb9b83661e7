//! Comment cooldown implementations.

mod memory;

pub use memory::{CooldownConfig, InMemoryCooldownCache};
