//! In-memory cooldown cache backed by a sharded `DashMap`.

use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use forum_core::ports::CooldownStore;

/// Cooldown configuration.
#[derive(Debug, Clone, Default)]
pub struct CooldownConfig {
    /// How long an accepted comment blocks the next one.
    /// `None` blocks until the process restarts.
    pub window: Option<Duration>,
}

impl CooldownConfig {
    pub fn from_env() -> Self {
        Self {
            window: std::env::var("COMMENT_COOLDOWN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A submission is in flight.
    Pending,
    /// Last accepted comment, Unix seconds.
    Accepted(i64),
}

/// Per-user cooldown map.
///
/// Each operation touches a single shard once. Entries live for the whole
/// process unless a window is configured, in which case stale entries are
/// evicted when next touched.
pub struct InMemoryCooldownCache {
    slots: DashMap<i64, Slot>,
    window: Option<i64>,
}

impl InMemoryCooldownCache {
    pub fn new(config: CooldownConfig) -> Self {
        Self {
            slots: DashMap::new(),
            window: config
                .window
                .map(|w| i64::try_from(w.as_secs()).unwrap_or(i64::MAX)),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn is_active(&self, slot: Slot, now: i64) -> bool {
        match (slot, self.window) {
            (Slot::Pending, _) | (Slot::Accepted(_), None) => true,
            (Slot::Accepted(at), Some(window)) => now.saturating_sub(at) < window,
        }
    }
}

impl Default for InMemoryCooldownCache {
    fn default() -> Self {
        Self::new(CooldownConfig::default())
    }
}

impl CooldownStore for InMemoryCooldownCache {
    fn is_blocked(&self, user_id: i64, now: i64) -> bool {
        // Copy the slot out so the shard guard is gone before any eviction.
        let Some(slot) = self.slots.get(&user_id).map(|s| *s) else {
            return false;
        };
        if self.is_active(slot, now) {
            return true;
        }
        self.slots
            .remove_if(&user_id, |_, slot| !self.is_active(*slot, now));
        false
    }

    fn mark_accepted(&self, user_id: i64, now: i64) {
        self.slots.insert(user_id, Slot::Accepted(now));
    }

    fn try_reserve(&self, user_id: i64, now: i64) -> bool {
        match self.slots.entry(user_id) {
            Entry::Occupied(mut entry) => {
                if self.is_active(*entry.get(), now) {
                    return false;
                }
                entry.insert(Slot::Pending);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot::Pending);
                true
            }
        }
    }

    fn release(&self, user_id: i64) {
        self.slots
            .remove_if(&user_id, |_, slot| *slot == Slot::Pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_unknown_user_not_blocked() {
        let cache = InMemoryCooldownCache::default();
        assert!(!cache.is_blocked(1, NOW));
    }

    #[test]
    fn test_block_persists_without_window() {
        let cache = InMemoryCooldownCache::default();
        cache.mark_accepted(1, NOW);

        for later in [NOW, NOW + 60, NOW + 86_400 * 365] {
            assert!(cache.is_blocked(1, later));
        }
        assert!(!cache.is_blocked(2, NOW));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_mark_accepted_overwrites() {
        let cache = InMemoryCooldownCache::new(CooldownConfig {
            window: Some(Duration::from_secs(30)),
        });
        cache.mark_accepted(1, NOW);
        cache.mark_accepted(1, NOW + 100);

        assert!(cache.is_blocked(1, NOW + 120));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_window_expires_and_evicts() {
        let cache = InMemoryCooldownCache::new(CooldownConfig {
            window: Some(Duration::from_secs(30)),
        });
        cache.mark_accepted(1, NOW);

        assert!(cache.is_blocked(1, NOW + 29));
        assert!(!cache.is_blocked(1, NOW + 30));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reserve_then_release() {
        let cache = InMemoryCooldownCache::default();

        assert!(cache.try_reserve(1, NOW));
        assert!(cache.is_blocked(1, NOW));
        assert!(!cache.try_reserve(1, NOW));

        cache.release(1);
        assert!(!cache.is_blocked(1, NOW));
        assert!(cache.try_reserve(1, NOW));
    }

    #[test]
    fn test_release_keeps_accepted_entry() {
        let cache = InMemoryCooldownCache::default();
        cache.mark_accepted(1, NOW);

        cache.release(1);
        assert!(cache.is_blocked(1, NOW));
    }

    #[test]
    fn test_reserve_after_window() {
        let cache = InMemoryCooldownCache::new(CooldownConfig {
            window: Some(Duration::from_secs(30)),
        });
        cache.mark_accepted(1, NOW);

        assert!(!cache.try_reserve(1, NOW + 10));
        assert!(cache.try_reserve(1, NOW + 45));
    }

    #[test]
    fn test_concurrent_reservations_single_winner() {
        let cache = InMemoryCooldownCache::default();

        let winners = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| cache.try_reserve(7, NOW)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(false))
                .filter(|won| *won)
                .count()
        });

        assert_eq!(winners, 1);
    }
}
