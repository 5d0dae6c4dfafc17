//! Commit Queue: a min-heap by height of executed-and-verified blocks awaiting the next
//! contiguous ledger slot, plus the consensus-check -> store-txs -> commit-state sequence.

use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};

use rayon::prelude::*;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::collaborators::{ConsensusChecker, Ledger, NewBlockHandler, TxPool, TxResultFactory};
use crate::error::SyncError;
use crate::state::ChainState;
use crate::types::{Block, HeightOrdered};

/// Guarded by `x_commit`, always acquired after `x_queue`.
///
/// `heap` holds the short-lived lock for push/peek/pop. `commit_gate` is a separate,
/// `.await`-spanning lock serializing the consensus-check/store/commit sequence itself, so
/// that at most one `try_commit` makes forward progress at a time.
pub struct CommitQueue {
    heap: Mutex<BinaryHeap<HeightOrdered>>,
    commit_gate: AsyncMutex<()>,
    state: Arc<ChainState>,
    consensus: Arc<dyn ConsensusChecker>,
    ledger: Arc<dyn Ledger>,
    txpool: Arc<dyn TxPool>,
    tx_result_factory: Arc<dyn TxResultFactory>,
    new_block_handler: Arc<dyn NewBlockHandler>,
}

impl CommitQueue {
    pub fn new(
        state: Arc<ChainState>,
        consensus: Arc<dyn ConsensusChecker>,
        ledger: Arc<dyn Ledger>,
        txpool: Arc<dyn TxPool>,
        tx_result_factory: Arc<dyn TxResultFactory>,
        new_block_handler: Arc<dyn NewBlockHandler>,
    ) -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            commit_gate: AsyncMutex::new(()),
            state,
            consensus,
            ledger,
            txpool,
            tx_result_factory,
            new_block_handler,
        }
    }

    /// Insert an already executed-and-verified block.
    pub fn push(&self, block: Block) {
        self.heap.lock().expect("commit queue lock poisoned").push(HeightOrdered(block));
    }

    /// Prune stale entries, then if the top is the next contiguous height, drive it through
    /// consensus-check -> store-txs -> commit-state. Repeats while a contiguous next block
    /// is ready, so one call drains as much of the queue as is currently committable.
    pub async fn try_commit(&self) {
        let _gate = self.commit_gate.lock().await;

        loop {
            let next = self.state.next_block();
            let ready = {
                let mut heap = self.heap.lock().expect("commit queue lock poisoned");
                while heap.peek().is_some_and(|h| h.0.number() <= self.state.block_number()) {
                    heap.pop();
                }
                match heap.peek() {
                    Some(h) if h.0.number() == next => heap.pop().map(|h| h.0),
                    _ => None,
                }
            };

            let Some(block) = ready else {
                return;
            };

            if !self.check_and_commit_block(&block).await {
                return;
            }
        }
    }

    /// Consensus-check, store-txs, commit-state for one block. Returns `false` on any
    /// failure, after rewinding the executed cursor, so the caller's drain loop stops.
    async fn check_and_commit_block(&self, block: &Block) -> bool {
        match self.consensus.check_block(block).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(number = block.number(), "consensus check failed");
                self.state.set_executed_block(block.number() - 1);
                return false;
            }
            Err(e) => {
                let e = SyncError::ConsensusCheck(e);
                warn!(number = block.number(), error = %e, "consensus check error");
                self.state.set_executed_block(block.number() - 1);
                return false;
            }
        }

        self.commit_block(block).await
    }

    async fn commit_block(&self, block: &Block) -> bool {
        if block.transactions.is_empty() {
            return self.commit_block_state(block).await;
        }

        let encoded: Vec<Vec<u8>> = block
            .transactions
            .par_iter()
            .map(super::types::Transaction::encode)
            .collect();
        let hashes: Vec<[u8; 32]> = block.transactions.par_iter().map(|tx| tx.hash).collect();

        if let Err(e) = self.ledger.store_transactions(&encoded, &hashes).await {
            let e = SyncError::Ledger(e);
            warn!(number = block.number(), error = %e, "commit: store transactions failed");
            self.state.set_executed_block(block.number() - 1);
            return false;
        }

        self.commit_block_state(block).await
    }

    async fn commit_block_state(&self, block: &Block) -> bool {
        let ledger_config = match self.ledger.commit_block(&block.header).await {
            Ok(cfg) => cfg,
            Err(e) => {
                let e = SyncError::Ledger(e);
                warn!(number = block.number(), error = %e, "commit_block_state failed");
                self.state.set_executed_block(block.number() - 1);
                return false;
            }
        };

        self.state.set_committed_height(block.number());
        info!(number = block.number(), "commit_block_state success");

        self.new_block_handler.on_new_block(&ledger_config);
        self.notify_transactions_result(block).await;
        true
    }

    async fn notify_transactions_result(&self, block: &Block) {
        let results = block
            .transactions
            .iter()
            .map(|tx| {
                let mut result = self
                    .tx_result_factory
                    .create_tx_submit_result(&block.header, tx.hash);
                result.set_nonce(tx.nonce);
                result
            })
            .collect();

        if let Err(e) = self
            .txpool
            .notify_block_result(block.number(), results)
            .await
        {
            let e = SyncError::TxPool(e);
            warn!(error = %e, "notify block result failed");
        }
    }

    /// Prune every entry with `number <= H`.
    pub fn clear_expired(&self) {
        let committed = self.state.block_number();
        let mut heap = self.heap.lock().expect("commit queue lock poisoned");
        while heap.peek().is_some_and(|h| h.0.number() <= committed) {
            heap.pop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::*;
    use crate::types::BlockHeader;

    fn block(number: u64) -> Block {
        Block {
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
        }
    }

    fn queue(height: u64) -> (CommitQueue, Arc<MockLedger>, Arc<ChainState>) {
        let state = Arc::new(ChainState::new(height, 16, [0; 32]));
        let ledger = Arc::new(MockLedger::default());
        let q = CommitQueue::new(
            state.clone(),
            Arc::new(MockConsensusChecker::always(true)),
            ledger.clone(),
            Arc::new(MockTxPool::default()),
            Arc::new(MockTxResultFactory),
            Arc::new(MockNewBlockHandler::default()),
        );
        (q, ledger, state)
    }

    #[tokio::test]
    async fn commits_in_order_despite_arrival_order() {
        let (q, ledger, state) = queue(0);
        q.push(block(3));
        q.push(block(1));
        q.try_commit().await;
        assert_eq!(state.block_number(), 1);
        q.push(block(2));
        q.try_commit().await;
        assert_eq!(state.block_number(), 3);
        assert_eq!(ledger.committed_heights(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn consensus_failure_rewinds_to_n_minus_one() {
        let state = Arc::new(ChainState::new(0, 16, [0; 32]));
        let q = CommitQueue::new(
            state.clone(),
            Arc::new(MockConsensusChecker::always(false)),
            Arc::new(MockLedger::default()),
            Arc::new(MockTxPool::default()),
            Arc::new(MockTxResultFactory),
            Arc::new(MockNewBlockHandler::default()),
        );
        q.push(block(1));
        q.try_commit().await;
        assert_eq!(state.executed_block(), 0);
        assert_eq!(state.block_number(), 0);
    }
}
