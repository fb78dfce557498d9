//! Per-account locks.
//!
//! A user can fire two commands before the first one replies. Every
//! balance-changing operation takes the account's lock before reading the
//! balance and keeps it until the new balance is committed, so overlapping
//! commands for one user apply one after the other. Different users never
//! contend.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Number of tracked accounts above which idle entries are first dropped.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct Slots {
    by_user: HashMap<String, Arc<Mutex<()>>>,
    /// Size at which the next prune runs. Doubles past what survived the
    /// last prune, so a registry full of busy locks is not rescanned on every call.
    prune_at: usize,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            by_user: HashMap::new(),
            prune_at: PRUNE_THRESHOLD,
        }
    }
}

/// Registry of one async mutex per user ID.
#[derive(Debug, Default)]
pub struct AccountLocks {
    slots: Mutex<Slots>,
}

impl AccountLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `user_id`'s account.
    ///
    /// The account stays locked until the returned guard is dropped.
    pub async fn lock(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            if slots.by_user.len() >= slots.prune_at {
                // An entry is idle when the map holds the only reference.
                slots.by_user.retain(|_, slot| Arc::strong_count(slot) > 1);
                slots.prune_at = PRUNE_THRESHOLD.max(slots.by_user.len() * 2);
                trace!(
                    "Pruned account locks, {} still tracked, next prune at {}",
                    slots.by_user.len(),
                    slots.prune_at
                );
            }
            Arc::clone(slots.by_user.entry(user_id.to_string()).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of accounts currently tracked.
    pub async fn tracked(&self) -> usize {
        self.slots.lock().await.by_user.len()
    }
}
