//! Mock collaborator implementations satisfying the contracts in [`crate::collaborators`].
//!
//! Used by this crate's own unit tests and by downstream integration tests exercising the
//! end-to-end scenarios.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::collaborators::{
    BlockFactory, ConsensusChecker, Dispatcher, Ledger, NewBlockHandler, TxPool, TxResultFactory,
};
use crate::types::{Block, BlockHeader, LedgerConfig, TxSubmitResult};

/// Decodes a single-byte-number block encoding: `bytes[0]` is the height.
pub struct MockBlockFactory;

impl BlockFactory for MockBlockFactory {
    fn create_block(&self, bytes: &[u8], _check_sig: bool, _check_hash: bool) -> anyhow::Result<Block> {
        let Some(&number) = bytes.first() else {
            anyhow::bail!("empty block bytes");
        };
        Ok(Block {
            header: BlockHeader {
                number: u64::from(number),
                hash: [number; 32],
                parent_hash: [number.wrapping_sub(1); 32],
                txs_root: [0; 32],
                receipts_root: [0; 32],
                state_root: [0; 32],
                sealer: vec![],
            },
            transactions: vec![],
        })
    }
}

/// Echoes the block's own header back as the executed result, unless configured to fail.
pub struct MockDispatcher {
    pub fail_times: AtomicU32,
    pub execute_calls: Mutex<Vec<u64>>,
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self {
            fail_times: AtomicU32::new(0),
            execute_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockDispatcher {
    pub fn failing(times: u32) -> Self {
        Self {
            fail_times: AtomicU32::new(times),
            execute_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<u64> {
        self.execute_calls.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn execute_block(&self, block: &Block, _verify: bool) -> anyhow::Result<BlockHeader> {
        self.execute_calls
            .lock()
            .expect("lock poisoned")
            .push(block.number());

        let remaining = self.fail_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_times.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("mock execute failure for block {}", block.number());
        }
        Ok(block.header.clone())
    }
}

/// Returns a header with a mismatched hash, used to exercise the verify-mismatch rewind.
pub struct MismatchedDispatcher;

#[async_trait]
impl Dispatcher for MismatchedDispatcher {
    async fn execute_block(&self, block: &Block, _verify: bool) -> anyhow::Result<BlockHeader> {
        let mut header = block.header.clone();
        header.hash = [0xFF; 32];
        Ok(header)
    }
}

pub struct MockConsensusChecker {
    pass: bool,
}

impl MockConsensusChecker {
    pub const fn always(pass: bool) -> Self {
        Self { pass }
    }
}

#[async_trait]
impl ConsensusChecker for MockConsensusChecker {
    async fn check_block(&self, _block: &Block) -> anyhow::Result<bool> {
        Ok(self.pass)
    }
}

#[derive(Default)]
pub struct MockLedger {
    committed: Mutex<Vec<u64>>,
}

impl MockLedger {
    pub fn committed_heights(&self) -> Vec<u64> {
        self.committed.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn store_transactions(
        &self,
        _tx_data: &[Vec<u8>],
        _tx_hashes: &[[u8; 32]],
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn commit_block(&self, header: &BlockHeader) -> anyhow::Result<LedgerConfig> {
        self.committed.lock().expect("lock poisoned").push(header.number);
        Ok(LedgerConfig {
            sealer: header.sealer.clone(),
            height: header.number,
        })
    }
}

#[derive(Default)]
pub struct MockTxPool;

#[async_trait]
impl TxPool for MockTxPool {
    async fn notify_block_result(
        &self,
        _block_number: u64,
        _results: Vec<TxSubmitResult>,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct MockTxResultFactory;

impl TxResultFactory for MockTxResultFactory {
    fn create_tx_submit_result(&self, header: &BlockHeader, tx_hash: [u8; 32]) -> TxSubmitResult {
        TxSubmitResult {
            block_number: header.number,
            block_hash: header.hash,
            tx_hash,
            nonce: 0,
        }
    }
}

#[derive(Default)]
pub struct MockNewBlockHandler {
    calls: Mutex<Vec<u64>>,
}

impl MockNewBlockHandler {
    pub fn heights(&self) -> Vec<u64> {
        self.calls.lock().expect("lock poisoned").clone()
    }
}

impl NewBlockHandler for MockNewBlockHandler {
    fn on_new_block(&self, config: &LedgerConfig) {
        self.calls.lock().expect("lock poisoned").push(config.height);
    }
}
