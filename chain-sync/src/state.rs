//! Read-mostly shared state: the committed height, the executed cursor, and static config.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::PeerId;

/// Shared, read-mostly view consulted by every component in this crate.
///
/// There is exactly one of these per running node, held behind an `Arc`. Its mutable
/// fields are lock-free atomics: `block_number` only ever advances on a successful commit,
/// and `executed_block` only ever changes via [`ChainState::set_executed_block`].
pub struct ChainState {
    /// Committed height `H`. Advanced only by [`ChainState::set_committed_height`].
    block_number: AtomicU64,
    /// Optimistic execution cursor, rewindable on failure.
    executed_block: AtomicU64,
    max_downloading_block_queue_size: usize,
    node_id: PeerId,
}

impl ChainState {
    pub fn new(initial_height: u64, max_downloading_block_queue_size: usize, node_id: PeerId) -> Self {
        Self {
            block_number: AtomicU64::new(initial_height),
            executed_block: AtomicU64::new(initial_height),
            max_downloading_block_queue_size,
            node_id,
        }
    }

    /// Current committed height `H`.
    pub fn block_number(&self) -> u64 {
        self.block_number.load(Ordering::SeqCst)
    }

    /// The only height currently eligible for commit: `H + 1`.
    pub fn next_block(&self) -> u64 {
        self.block_number() + 1
    }

    /// The highest height whose execution has been dispatched.
    pub fn executed_block(&self) -> u64 {
        self.executed_block.load(Ordering::SeqCst)
    }

    /// Rewind the executed cursor, e.g. after an execute/verify/commit failure.
    pub fn set_executed_block(&self, height: u64) {
        self.executed_block.store(height, Ordering::SeqCst);
    }

    /// Advance the committed height after a successful commit. Also bumps the executed
    /// cursor forward if it had fallen behind.
    pub fn set_committed_height(&self, height: u64) {
        self.block_number.store(height, Ordering::SeqCst);
        let _ = self
            .executed_block
            .fetch_max(height, Ordering::SeqCst);
    }

    pub const fn max_downloading_block_queue_size(&self) -> usize {
        self.max_downloading_block_queue_size
    }

    pub const fn node_id(&self) -> PeerId {
        self.node_id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn next_block_is_height_plus_one() {
        let state = ChainState::new(5, 16, [0; 32]);
        assert_eq!(state.block_number(), 5);
        assert_eq!(state.next_block(), 6);
    }

    #[test]
    fn commit_advances_executed_cursor_if_behind() {
        let state = ChainState::new(0, 16, [0; 32]);
        state.set_executed_block(0);
        state.set_committed_height(3);
        assert_eq!(state.executed_block(), 3);
    }

    #[test]
    fn rewind_does_not_move_committed_height() {
        let state = ChainState::new(5, 16, [0; 32]);
        state.set_executed_block(2);
        assert_eq!(state.block_number(), 5);
        assert_eq!(state.executed_block(), 2);
    }
}
