//! Comment cooldown port.

/// Per-user comment cooldown store.
///
/// Implementations must keep every operation to a single map access; callers
/// rely on never blocking behind I/O here.
pub trait CooldownStore: Send + Sync {
    /// Whether `user_id` is currently barred from commenting.
    fn is_blocked(&self, user_id: i64, now: i64) -> bool;

    /// Record an accepted comment, overwriting any previous entry.
    fn mark_accepted(&self, user_id: i64, now: i64);

    /// Atomically claim the user's slot if they are not blocked.
    /// A claimed slot blocks the user until it is released or accepted.
    fn try_reserve(&self, user_id: i64, now: i64) -> bool;

    /// Drop a claim made by [`CooldownStore::try_reserve`]. Accepted entries
    /// are left untouched.
    fn release(&self, user_id: i64);
}
