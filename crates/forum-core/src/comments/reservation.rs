use std::sync::Arc;

use crate::ports::CooldownStore;

/// A claimed cooldown slot for one user.
///
/// While held, the user counts as blocked. [`commit`](Self::commit) turns the
/// claim into an accepted entry; dropping it uncommitted releases the slot, so
/// a rejected, failed, or cancelled submission never costs the user a turn.
pub struct CooldownReservation {
    store: Arc<dyn CooldownStore>,
    user_id: i64,
    committed: bool,
}

impl CooldownReservation {
    /// Claim the slot, or `None` if the user is on cooldown.
    pub fn acquire(store: Arc<dyn CooldownStore>, user_id: i64, now: i64) -> Option<Self> {
        if !store.try_reserve(user_id, now) {
            return None;
        }
        Some(Self {
            store,
            user_id,
            committed: false,
        })
    }

    pub fn commit(mut self, now: i64) {
        self.store.mark_accepted(self.user_id, now);
        self.committed = true;
    }
}

impl Drop for CooldownReservation {
    fn drop(&mut self) {
        if !self.committed {
            self.store.release(self.user_id);
        }
    }
}
