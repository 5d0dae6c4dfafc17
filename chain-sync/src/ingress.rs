//! Block Ingress Buffer: a bounded FIFO of raw, undecoded block batches.

use std::collections::VecDeque;
use std::sync::RwLock;

use tracing::warn;

use crate::types::BlocksBatch;

/// Guarded by `x_buffer` in the lock-ordering discipline: always acquired before the
/// downloading queue's heap lock, never held across a call into an external collaborator.
pub struct IngressBuffer {
    batches: RwLock<VecDeque<BlocksBatch>>,
    capacity: usize,
}

impl IngressBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            batches: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    /// Append `batch`, dropping it with a warning if the buffer is already at capacity.
    ///
    /// Never blocks the caller on anything but the short-lived lock.
    pub fn push(&self, batch: BlocksBatch) {
        let mut guard = self.batches.write().expect("ingress buffer lock poisoned");
        if guard.len() >= self.capacity {
            warn!(queue_size = guard.len(), "ingress buffer is full, dropping batch");
            return;
        }
        guard.push_back(batch);
    }

    /// Pop the oldest batch, if any.
    pub fn pop_front(&self) -> Option<BlocksBatch> {
        self.batches
            .write()
            .expect("ingress buffer lock poisoned")
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.batches.read().expect("ingress buffer lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.batches.write().expect("ingress buffer lock poisoned").clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn batch(n: u8) -> BlocksBatch {
        BlocksBatch {
            blocks: vec![vec![n]],
            peer: [0; 32],
        }
    }

    #[test]
    fn drops_when_full() {
        let buf = IngressBuffer::new(2);
        buf.push(batch(1));
        buf.push(batch(2));
        buf.push(batch(3));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn fifo_order() {
        let buf = IngressBuffer::new(8);
        buf.push(batch(1));
        buf.push(batch(2));
        assert_eq!(buf.pop_front().unwrap().blocks[0], vec![1]);
        assert_eq!(buf.pop_front().unwrap().blocks[0], vec![2]);
        assert!(buf.pop_front().is_none());
    }
}
