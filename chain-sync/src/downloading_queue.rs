//! Downloading Queue: a min-heap by height of decoded blocks awaiting execution, fed by
//! draining the [`IngressBuffer`].

use std::collections::BinaryHeap;
use std::sync::{Arc, RwLock};

use tracing::{debug, trace, warn};

use crate::collaborators::BlockFactory;
use crate::error::SyncError;
use crate::ingress::IngressBuffer;
use crate::state::ChainState;
use crate::types::{BlocksBatch, HeightOrdered};

/// Guarded by `x_queue`, always acquired after `x_buffer` and before `x_commit`.
pub struct DownloadingQueue {
    buffer: IngressBuffer,
    heap: RwLock<BinaryHeap<HeightOrdered>>,
    capacity: usize,
    block_factory: Arc<dyn BlockFactory>,
    state: Arc<ChainState>,
}

impl DownloadingQueue {
    pub fn new(
        capacity: usize,
        block_factory: Arc<dyn BlockFactory>,
        state: Arc<ChainState>,
    ) -> Self {
        Self {
            buffer: IngressBuffer::new(capacity),
            heap: RwLock::new(BinaryHeap::new()),
            capacity,
            block_factory,
            state,
        }
    }

    /// Forwards to the ingress buffer. Never blocks the caller.
    pub fn push(&self, batch: BlocksBatch) {
        self.buffer.push(batch);
    }

    /// True iff both the buffer and the decoded heap are empty. Snapshot; may race.
    pub fn empty(&self) -> bool {
        self.buffer.is_empty() && self.heap.read().expect("queue lock poisoned").is_empty()
    }

    /// Sum of buffer length and heap length. Snapshot.
    pub fn size(&self) -> usize {
        self.buffer.len() + self.heap.read().expect("queue lock poisoned").len()
    }

    /// If `flush`, drain the buffer into the heap first; then return (a clone of) the
    /// minimum-height block, or `None`.
    pub fn top(&self, flush: bool) -> Option<crate::types::Block> {
        if flush {
            self.flush_buffer_to_queue();
        }
        self.heap
            .read()
            .expect("queue lock poisoned")
            .peek()
            .map(|h| h.0.clone())
    }

    /// Remove the minimum-height block from the heap. No-op on empty.
    pub fn pop(&self) {
        self.heap.write().expect("queue lock poisoned").pop();
    }

    /// Drop all buffered batches and all heap entries.
    pub fn clear(&self) {
        self.buffer.clear();
        self.clear_queue();
    }

    fn clear_queue(&self) {
        *self.heap.write().expect("queue lock poisoned") = BinaryHeap::new();
    }

    /// If the heap is at capacity and its top height is beyond `n`, drop the whole heap:
    /// it is full of blocks we cannot use yet and must free space for the neighborhood of `n`.
    pub fn clear_full_queue_if_not_has(&self, n: u64) {
        let needs_clear = {
            let heap = self.heap.read().expect("queue lock poisoned");
            heap.len() == self.capacity && heap.peek().is_some_and(|h| h.0.number() > n)
        };
        if needs_clear {
            self.clear_queue();
        }
    }

    /// Remove every heap entry with `number <= H` (committed).
    pub fn clear_expired(&self) {
        let committed = self.state.block_number();
        let mut heap = self.heap.write().expect("queue lock poisoned");
        while heap.peek().is_some_and(|h| h.0.number() <= committed) {
            heap.pop();
        }
    }

    fn flush_buffer_to_queue(&self) {
        while let Some(batch) = self.buffer.pop_front() {
            if !self.flush_one_shard(&batch) {
                // Heap would overflow; leave the remaining batches buffered for later.
                break;
            }
        }
    }

    /// Decode every block in `batch`, admitting those newer than the committed height.
    /// Returns `false` if the heap is already at capacity (the batch is re-queued by the
    /// caller leaving it out of the heap).
    fn flush_one_shard(&self, batch: &BlocksBatch) -> bool {
        if self.heap.read().expect("queue lock poisoned").len() >= self.capacity {
            debug!(queue_size = self.capacity, "downloading queue buffer is full");
            return false;
        }

        trace!(blocks_shard_size = batch.blocks.len(), "decoding block buffer");

        let committed = self.state.block_number();
        for raw in &batch.blocks {
            match self.block_factory.create_block(raw, true, true) {
                Ok(block) => {
                    if block.number() > committed {
                        let mut heap = self.heap.write().expect("queue lock poisoned");
                        heap.push(HeightOrdered(block));
                    }
                }
                Err(e) => {
                    let e = SyncError::Decode(e);
                    warn!(error = %e, "invalid block data, dropping block");
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Block, BlockHeader};

    struct EchoFactory;

    impl BlockFactory for EchoFactory {
        fn create_block(&self, bytes: &[u8], _: bool, _: bool) -> anyhow::Result<Block> {
            let number = u64::from(bytes[0]);
            Ok(Block {
                header: BlockHeader {
                    number,
                    hash: [number as u8; 32],
                    parent_hash: [0; 32],
                    txs_root: [0; 32],
                    receipts_root: [0; 32],
                    state_root: [0; 32],
                    sealer: vec![],
                },
                transactions: vec![],
            })
        }
    }

    fn batch(nums: &[u8]) -> BlocksBatch {
        BlocksBatch {
            blocks: nums.iter().map(|n| vec![*n]).collect(),
            peer: [0; 32],
        }
    }

    fn queue(capacity: usize, height: u64) -> DownloadingQueue {
        DownloadingQueue::new(
            capacity,
            Arc::new(EchoFactory),
            Arc::new(ChainState::new(height, capacity, [0; 32])),
        )
    }

    #[test]
    fn flush_orders_by_height() {
        let q = queue(8, 0);
        q.push(batch(&[3]));
        q.push(batch(&[1]));
        q.push(batch(&[2]));
        assert_eq!(q.top(true).unwrap().number(), 1);
        q.pop();
        assert_eq!(q.top(false).unwrap().number(), 2);
    }

    #[test]
    fn stale_block_dropped_at_flush() {
        let q = queue(8, 5);
        q.push(batch(&[3]));
        assert!(q.top(true).is_none());
    }

    #[test]
    fn flush_is_idempotent() {
        let q = queue(8, 0);
        q.push(batch(&[1, 2]));
        q.top(true);
        let size_after_first = q.size();
        q.top(true);
        assert_eq!(q.size(), size_after_first);
    }

    #[test]
    fn overflow_drop() {
        let q = queue(2, 0);
        q.push(batch(&[1]));
        q.push(batch(&[2]));
        q.push(batch(&[3]));
        assert!(q.size() <= 2);
    }
}
