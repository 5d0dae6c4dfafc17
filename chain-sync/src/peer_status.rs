//! Peer Status Table: tracks each known peer's last-advertised best height/hash/genesis.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::types::{Hash, PeerId};

/// A peer's advertised best-known block and genesis, maintained monotonically.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub number: u64,
    pub hash: Hash,
    pub genesis_hash: Hash,
}

/// One peer's tracked status. Guarded by its own mutex, acquired only after `x_peers`.
pub struct PeerStatus {
    number: u64,
    hash: Hash,
    genesis_hash: Hash,
}

impl PeerStatus {
    fn new(update: StatusUpdate) -> Self {
        Self {
            number: update.number,
            hash: update.hash,
            genesis_hash: update.genesis_hash,
        }
    }

    pub const fn number(&self) -> u64 {
        self.number
    }

    pub const fn hash(&self) -> Hash {
        self.hash
    }

    pub const fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }

    /// Apply `update` if it is newer and on the same chain; otherwise ignore it.
    fn update(&mut self, update: &StatusUpdate) {
        if update.number <= self.number {
            return;
        }
        if update.genesis_hash != self.genesis_hash {
            warn!(
                genesis_hash = %hex::encode(update.genesis_hash),
                stored_genesis_hash = %hex::encode(self.genesis_hash),
                "received status with different genesis hash, ignoring"
            );
            return;
        }
        self.number = update.number;
        self.hash = update.hash;
        debug!(number = update.number, hash = %hex::encode(update.hash), "updated peer status");
    }
}

/// Guarded by `x_peers`; each entry additionally guarded by its own mutex.
#[derive(Default)]
pub struct PeerStatusTable {
    peers: RwLock<HashMap<PeerId, RwLock<PeerStatus>>>,
}

impl PeerStatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_peer(&self, id: PeerId) -> bool {
        self.peers.read().expect("peer table lock poisoned").contains_key(&id)
    }

    /// If `id` is present, forward the update to its [`PeerStatus`] (ignoring stale or
    /// cross-genesis updates); otherwise create a new record.
    pub fn update(&self, id: PeerId, update: StatusUpdate) {
        {
            let peers = self.peers.read().expect("peer table lock poisoned");
            if let Some(status) = peers.get(&id) {
                status.write().expect("peer status lock poisoned").update(&update);
                return;
            }
        }

        let mut peers = self.peers.write().expect("peer table lock poisoned");
        peers
            .entry(id)
            .or_insert_with(|| RwLock::new(PeerStatus::new(update.clone())))
            .write()
            .expect("peer status lock poisoned")
            .update(&update);
    }

    pub fn delete(&self, id: PeerId) {
        self.peers.write().expect("peer table lock poisoned").remove(&id);
    }

    /// Snapshot of a peer's current `(number, hash)`, if known.
    pub fn status(&self, id: PeerId) -> Option<(u64, Hash)> {
        let peers = self.peers.read().expect("peer table lock poisoned");
        peers
            .get(&id)
            .map(|s| {
                let s = s.read().expect("peer status lock poisoned");
                (s.number(), s.hash())
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn update(number: u64) -> StatusUpdate {
        StatusUpdate {
            number,
            hash: [number as u8; 32],
            genesis_hash: [0xAB; 32],
        }
    }

    #[test]
    fn new_peer_is_inserted() {
        let table = PeerStatusTable::new();
        assert!(!table.has_peer([1; 32]));
        table.update([1; 32], update(5));
        assert!(table.has_peer([1; 32]));
        assert_eq!(table.status([1; 32]), Some((5, [5; 32])));
    }

    #[test]
    fn stale_update_ignored() {
        let table = PeerStatusTable::new();
        table.update([1; 32], update(5));
        table.update([1; 32], update(3));
        assert_eq!(table.status([1; 32]).unwrap().0, 5);
    }

    #[test]
    fn genesis_mismatch_rejected() {
        let table = PeerStatusTable::new();
        table.update([1; 32], update(5));
        table.update(
            [1; 32],
            StatusUpdate {
                number: 10,
                hash: [9; 32],
                genesis_hash: [0xFF; 32],
            },
        );
        assert_eq!(table.status([1; 32]).unwrap().0, 5);
    }

    #[test]
    fn delete_removes_peer() {
        let table = PeerStatusTable::new();
        table.update([1; 32], update(5));
        table.delete([1; 32]);
        assert!(!table.has_peer([1; 32]));
    }
}
