/// An unrecoverable error in a `chaind` subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ChaindError {
    /// The block sync engine encountered an unrecoverable error.
    #[error("sync: {0:#}")]
    Sync(anyhow::Error),

    /// The config layer encountered an unrecoverable error.
    #[error("config: {0:#}")]
    Config(anyhow::Error),
}
