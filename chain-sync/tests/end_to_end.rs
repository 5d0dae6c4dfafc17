//! End-to-end scenarios driving `DownloadingQueue -> ApplyPipeline -> CommitQueue` together.

use std::sync::Arc;

use chain_sync::collaborators::Dispatcher;
use chain_sync::commit_queue::CommitQueue;
use chain_sync::downloading_queue::DownloadingQueue;
use chain_sync::mock::{
    MismatchedDispatcher, MockBlockFactory, MockConsensusChecker, MockDispatcher, MockLedger,
    MockNewBlockHandler, MockTxPool, MockTxResultFactory,
};
use chain_sync::pipeline::ApplyPipeline;
use chain_sync::state::ChainState;
use chain_sync::types::BlocksBatch;

struct Harness {
    state: Arc<ChainState>,
    queue: DownloadingQueue,
    pipeline: ApplyPipeline,
    ledger: Arc<MockLedger>,
}

fn harness(height: u64, capacity: usize, dispatcher: Arc<dyn Dispatcher>, consensus_pass: bool) -> Harness {
    let state = Arc::new(ChainState::new(height, capacity, [0; 32]));
    let ledger = Arc::new(MockLedger::default());
    let commit_queue = Arc::new(CommitQueue::new(
        state.clone(),
        Arc::new(MockConsensusChecker::always(consensus_pass)),
        ledger.clone(),
        Arc::new(MockTxPool::default()),
        Arc::new(MockTxResultFactory),
        Arc::new(MockNewBlockHandler::default()),
    ));
    let queue = DownloadingQueue::new(capacity, Arc::new(MockBlockFactory), state.clone());
    let pipeline = ApplyPipeline::new(state.clone(), dispatcher, commit_queue);
    Harness {
        state,
        queue,
        pipeline,
        ledger,
    }
}

fn batch(number: u8) -> BlocksBatch {
    BlocksBatch {
        blocks: vec![vec![number]],
        peer: [0; 32],
    }
}

/// Drain the downloading queue end-to-end: pop the minimum-height block (flushing the
/// ingress buffer first) and apply it, until nothing is left.
async fn drain(h: &Harness) {
    while let Some(block) = h.queue.top(true) {
        h.queue.pop();
        h.pipeline.apply(block).await;
    }
}

#[tokio::test]
async fn happy_path_ordered_arrival() {
    let h = harness(0, 8, Arc::new(MockDispatcher::default()), true);
    h.queue.push(batch(1));
    h.queue.push(batch(2));
    h.queue.push(batch(3));
    drain(&h).await;
    assert_eq!(h.ledger.committed_heights(), vec![1, 2, 3]);
    assert_eq!(h.state.executed_block(), 3);
}

#[tokio::test]
async fn out_of_order_arrival() {
    let h = harness(0, 8, Arc::new(MockDispatcher::default()), true);
    h.queue.push(batch(3));
    h.queue.push(batch(1));
    h.queue.push(batch(2));
    drain(&h).await;
    assert_eq!(h.ledger.committed_heights(), vec![1, 2, 3]);
}

#[tokio::test]
async fn stale_block_dropped() {
    let h = harness(5, 8, Arc::new(MockDispatcher::default()), true);
    h.queue.push(batch(3));
    assert!(h.queue.top(true).is_none());
    assert!(h.ledger.committed_heights().is_empty());
}

#[tokio::test]
async fn verify_mismatch_rewinds() {
    let h = harness(0, 8, Arc::new(MismatchedDispatcher), true);
    h.queue.push(batch(1));
    drain(&h).await;
    assert_eq!(h.state.executed_block(), 0);
    assert!(h.ledger.committed_heights().is_empty());
}

#[tokio::test]
async fn execute_retry_then_give_up() {
    let dispatcher = Arc::new(MockDispatcher::failing(2));
    let h = harness(0, 8, dispatcher.clone(), true);
    h.queue.push(batch(1));
    drain(&h).await;
    assert_eq!(dispatcher.calls(), vec![1, 1]);
    assert_eq!(h.state.executed_block(), 0);
    assert!(h.ledger.committed_heights().is_empty());
}

#[tokio::test]
async fn overflow_drop() {
    let h = harness(0, 2, Arc::new(MockDispatcher::default()), true);
    h.queue.push(batch(1));
    h.queue.push(batch(2));
    h.queue.push(batch(3));
    assert!(h.queue.size() <= 2);
}
