use crate::domain::session::PlayerId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-player mutual exclusion.
///
/// Every state transition for a player runs under that player's lock, so two
/// racing `play` calls are sequenced and cannot both observe the pre-turn
/// score. Different players never contend.
///
/// The registry does not grow with the set of addresses ever seen: an entry
/// lives only while some guard or waiter references it and is removed when
/// the last one releases (see [`PlayerGuard`]).
#[derive(Default)]
pub struct PlayerLocks {
    locks: StdMutex<HashMap<PlayerId, Arc<Mutex<()>>>>,
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `player`, creating the entry on first use.
    ///
    /// The registry mutex is only held long enough to clone the per-player
    /// entry, so lock acquisition for one player never blocks another.
    pub async fn acquire(&self, player: &PlayerId) -> PlayerGuard<'_> {
        let entry = {
            let mut locks = self.registry();
            locks
                .entry(player.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let guard = entry.lock_owned().await;
        PlayerGuard {
            registry: self,
            player: player.clone(),
            guard: Some(guard),
        }
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, HashMap<PlayerId, Arc<Mutex<()>>>> {
        // A poisoned registry is still a usable registry.
        self.locks.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn tracked_players(&self) -> usize {
        self.registry().len()
    }
}

/// Holds a player's lock; releasing it reclaims the registry entry when no
/// other call for the same player holds or awaits the lock.
pub struct PlayerGuard<'a> {
    registry: &'a PlayerLocks,
    player: PlayerId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PlayerGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex before inspecting the refcount, so this guard's
        // own handle is not counted.
        self.guard.take();
        let mut locks = self.registry.registry();
        // Waiters clone the entry under the registry mutex, so a count of
        // one means nobody else can reach this lock anymore.
        if let Some(entry) = locks.get(&self.player)
            && Arc::strong_count(entry) == 1
        {
            locks.remove(&self.player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn player(address: &str) -> PlayerId {
        PlayerId::parse(address).unwrap()
    }

    #[tokio::test]
    async fn test_same_player_is_serialized() {
        let locks = Arc::new(PlayerLocks::new());
        let counter = Arc::new(AtomicU32::new(0));
        let id = player("DemoBatsman1111111111111111111111");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let counter = counter.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
                // Read-modify-write with a yield in between; only mutual
                // exclusion keeps this from losing updates.
                let seen = counter.load(Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                counter.store(seen + 1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn test_different_players_do_not_block() {
        let locks = PlayerLocks::new();
        let first = locks.acquire(&player("DemoBatsman1111111111111111111111")).await;
        // Would deadlock if players shared a lock.
        let _second = locks.acquire(&player("HandCricketTreasury1111111111111")).await;
        drop(first);
    }

    // Distinct base58-shaped addresses (digits 1-9 only).
    fn address(mut i: u32) -> String {
        let mut suffix = String::new();
        for _ in 0..4 {
            suffix.push(char::from(b'1' + (i % 9) as u8));
            i /= 9;
        }
        format!("Batsman{suffix}1111111111111111111111")
    }

    #[tokio::test]
    async fn test_released_entries_are_reclaimed() {
        let locks = PlayerLocks::new();

        // A stream of one-shot players must not accumulate registry entries.
        for i in 0..1000 {
            let id = player(&address(i));
            let guard = locks.acquire(&id).await;
            assert_eq!(locks.tracked_players(), 1);
            drop(guard);
        }

        assert_eq!(locks.tracked_players(), 0);
    }

    #[tokio::test]
    async fn test_entry_survives_while_contended() {
        let locks = Arc::new(PlayerLocks::new());
        let id = player("DemoBatsman1111111111111111111111");

        let held = locks.acquire(&id).await;

        let waiter = {
            let locks = locks.clone();
            let id = id.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
            })
        };
        // Let the waiter queue up behind the held guard.
        tokio::time::sleep(Duration::from_millis(10)).await;

        drop(held);
        waiter.await.unwrap();

        // Both releases happened; the entry is gone.
        assert_eq!(locks.tracked_players(), 0);
    }
}
