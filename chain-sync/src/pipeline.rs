//! Apply Pipeline: per-block `execute -> verify -> consensus-check -> store-txs -> commit`
//! state machine, with a single execute retry and rewind-on-failure everywhere else.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::collaborators::Dispatcher;
use crate::commit_queue::CommitQueue;
use crate::error::SyncError;
use crate::state::ChainState;
use crate::types::Block;

/// Number of *retries* permitted on the execute step (so 2 attempts total).
pub const RETRY_LIMIT: u32 = 1;

/// Drives blocks popped from the Downloading Queue through execute/verify/consensus-check
/// and hands verified blocks to the [`CommitQueue`].
pub struct ApplyPipeline {
    state: Arc<ChainState>,
    dispatcher: Arc<dyn Dispatcher>,
    commit_queue: Arc<CommitQueue>,
}

impl ApplyPipeline {
    pub fn new(
        state: Arc<ChainState>,
        dispatcher: Arc<dyn Dispatcher>,
        commit_queue: Arc<CommitQueue>,
    ) -> Self {
        Self {
            state,
            dispatcher,
            commit_queue,
        }
    }

    /// Apply `block`: execute (retrying once on error), verify the returned header against
    /// the received one, admit into the commit queue on success, and rewind on any failure.
    ///
    /// Up to `RETRY_LIMIT + 1` execute attempts; any other step failure rewinds immediately.
    pub async fn apply(&self, block: Block) {
        let executed_header = 'execute: {
            for retries in 0..=RETRY_LIMIT {
                trace!(number = block.number(), retries, "executing block");
                match self.dispatcher.execute_block(&block, true).await {
                    Ok(header) => break 'execute Some(header),
                    Err(e) if retries < RETRY_LIMIT => {
                        let e = SyncError::Execute(e);
                        warn!(number = block.number(), error = %e, "execute failed, retrying");
                    }
                    Err(e) => {
                        let e = SyncError::Execute(e);
                        warn!(
                            number = block.number(),
                            error = %e,
                            "execute failed after retry, rewinding to H"
                        );
                    }
                }
            }
            None
        };

        let Some(executed_header) = executed_header else {
            self.state.set_executed_block(self.state.block_number());
            return;
        };

        if executed_header.hash != block.header.hash {
            warn!(number = block.number(), "verify mismatch, rewinding to H");
            self.state.set_executed_block(self.state.block_number());
            return;
        }

        self.commit_queue.push(block);
        self.commit_queue.try_commit().await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::{
        MismatchedDispatcher, MockConsensusChecker, MockDispatcher, MockLedger,
        MockNewBlockHandler, MockTxPool, MockTxResultFactory,
    };
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

    fn pipeline_with(
        dispatcher: Arc<dyn Dispatcher>,
        consensus_pass: bool,
    ) -> (ApplyPipeline, Arc<ChainState>, Arc<MockLedger>) {
        let state = Arc::new(ChainState::new(0, 16, [0; 32]));
        let ledger = Arc::new(MockLedger::default());
        let commit_queue = Arc::new(CommitQueue::new(
            state.clone(),
            Arc::new(MockConsensusChecker::always(consensus_pass)),
            ledger.clone(),
            Arc::new(MockTxPool::default()),
            Arc::new(MockTxResultFactory),
            Arc::new(MockNewBlockHandler::default()),
        ));
        let pipeline = ApplyPipeline::new(state.clone(), dispatcher, commit_queue);
        (pipeline, state, ledger)
    }

    #[tokio::test]
    async fn happy_path_commits() {
        let (pipeline, state, ledger) =
            pipeline_with(Arc::new(MockDispatcher::default()), true);
        pipeline.apply(block(1)).await;
        assert_eq!(state.block_number(), 1);
        assert_eq!(ledger.committed_heights(), vec![1]);
    }

    #[tokio::test]
    async fn verify_mismatch_rewinds_to_h() {
        let (pipeline, state, ledger) = pipeline_with(Arc::new(MismatchedDispatcher), true);
        pipeline.apply(block(1)).await;
        assert_eq!(state.block_number(), 0);
        assert_eq!(state.executed_block(), 0);
        assert!(ledger.committed_heights().is_empty());
    }

    #[tokio::test]
    async fn execute_retries_once_then_succeeds() {
        let dispatcher = Arc::new(MockDispatcher::failing(1));
        let (pipeline, state, _ledger) = pipeline_with(dispatcher.clone(), true);
        pipeline.apply(block(1)).await;
        assert_eq!(state.block_number(), 1);
        assert_eq!(dispatcher.calls(), vec![1, 1]);
    }

    #[tokio::test]
    async fn execute_gives_up_after_retry_and_rewinds_to_h() {
        let dispatcher = Arc::new(MockDispatcher::failing(2));
        let (pipeline, state, ledger) = pipeline_with(dispatcher.clone(), true);
        pipeline.apply(block(1)).await;
        assert_eq!(dispatcher.calls(), vec![1, 1]);
        assert_eq!(state.executed_block(), 0);
        assert_eq!(state.block_number(), 0);
        assert!(ledger.committed_heights().is_empty());
    }

    #[tokio::test]
    async fn consensus_failure_rewinds_to_n_minus_one() {
        let (pipeline, state, ledger) =
            pipeline_with(Arc::new(MockDispatcher::default()), false);
        pipeline.apply(block(1)).await;
        assert_eq!(state.executed_block(), 0);
        assert_eq!(state.block_number(), 0);
        assert!(ledger.committed_heights().is_empty());
    }
}
