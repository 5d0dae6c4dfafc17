/// An error from one of the pipeline's external collaborators.
///
/// The pipeline never propagates these to its caller: every variant is caught at a
/// completion boundary and turned into a rewind (see [`crate::pipeline`]). This type exists
/// so collaborator implementations have one place to report failures with context.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The block/transaction codec failed to decode a batch entry.
    #[error("decode: {0:#}")]
    Decode(anyhow::Error),

    /// The executor/dispatcher failed to execute a block.
    #[error("execute: {0:#}")]
    Execute(anyhow::Error),

    /// The consensus checker rejected a block or failed to answer.
    #[error("consensus check: {0:#}")]
    ConsensusCheck(anyhow::Error),

    /// The ledger failed to store transactions or commit a block.
    #[error("ledger: {0:#}")]
    Ledger(anyhow::Error),

    /// The transaction pool failed to accept a block-result notification.
    #[error("txpool: {0:#}")]
    TxPool(anyhow::Error),
}
