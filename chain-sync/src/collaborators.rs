//! Narrow trait contracts for the subsystems this crate treats as external collaborators:
//! the block codec, the executor/dispatcher, the consensus checker, the ledger and the
//! transaction pool.
//!
//! Production implementations live outside this crate and are wired in by the binary.
//! [`crate::mock`] provides reference implementations for tests.

use async_trait::async_trait;

use crate::types::{Block, BlockHeader, LedgerConfig, TxSubmitResult};

/// Decodes raw block bytes into a [`Block`].
///
/// Mirrors `blockFactory().createBlock(bytes, checkSig, checkHash)` in the design.
pub trait BlockFactory: Send + Sync {
    /// Decode and validate a single block.
    ///
    /// # Errors
    /// Returns an error if the bytes are malformed or fail signature/hash checks.
    fn create_block(
        &self,
        bytes: &[u8],
        check_sig: bool,
        check_hash: bool,
    ) -> anyhow::Result<Block>;
}

/// Executes a block against the deterministic state machine.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Execute `block`, returning the resulting header for the verify step.
    ///
    /// # Errors
    /// Returns an error if execution fails; the pipeline retries once before rewinding.
    async fn execute_block(&self, block: &Block, verify: bool) -> anyhow::Result<BlockHeader>;
}

/// Checks a block against consensus rules (signatures, sealer set).
#[async_trait]
pub trait ConsensusChecker: Send + Sync {
    /// Returns `Ok(true)` if the block passes the consensus check.
    ///
    /// # Errors
    /// Returns an error if the check itself could not be completed.
    async fn check_block(&self, block: &Block) -> anyhow::Result<bool>;
}

/// Durable storage for transactions and committed blocks.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Store a block's encoded transactions and their hashes as a single batch.
    ///
    /// `tx_data` and `tx_hashes` are parallel vectors produced by encoding and hashing the
    /// block's transaction list.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    async fn store_transactions(
        &self,
        tx_data: &[Vec<u8>],
        tx_hashes: &[[u8; 32]],
    ) -> anyhow::Result<()>;

    /// Commit a block's header, making its height durably part of the chain.
    ///
    /// # Errors
    /// Returns an error if the commit fails.
    async fn commit_block(&self, header: &BlockHeader) -> anyhow::Result<LedgerConfig>;
}

/// The mempool notified of per-transaction results after each commit.
#[async_trait]
pub trait TxPool: Send + Sync {
    /// Notify the pool of the submission results for all transactions in a committed block.
    ///
    /// # Errors
    /// Returns an error if the notification could not be delivered.
    async fn notify_block_result(
        &self,
        block_number: u64,
        results: Vec<TxSubmitResult>,
    ) -> anyhow::Result<()>;
}

/// Builds the per-transaction result records notified to the [`TxPool`] after a commit.
pub trait TxResultFactory: Send + Sync {
    fn create_tx_submit_result(&self, header: &BlockHeader, tx_hash: [u8; 32]) -> TxSubmitResult;
}

/// Invoked once per successful commit so the surrounding node can reconfigure consensus,
/// broadcast its new height, and clear expired caches.
pub trait NewBlockHandler: Send + Sync {
    fn on_new_block(&self, config: &LedgerConfig);
}
