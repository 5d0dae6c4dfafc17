//! Wires the `chain-sync` primitives together and exposes the handful of operations the
//! command interface and the rest of the binary need: current status and a manual rewind.

use std::sync::Arc;

use chain_sync::peer_status::PeerStatusTable;
use chain_sync::state::ChainState;
use chain_sync::types::PeerId;

/// Owns the shared sync state for this process. The downloading queue, commit queue and
/// apply pipeline are constructed by whatever wires in the concrete collaborators (network
/// transport, block codec, executor, consensus checker, ledger, transaction pool); this
/// struct is the shared handle the command interface reads and writes.
pub struct Engine {
    state: Arc<ChainState>,
    peers: Arc<PeerStatusTable>,
}

impl Engine {
    pub fn new(initial_height: u64, max_downloading_block_queue_size: usize, node_id: PeerId) -> Self {
        Self {
            state: Arc::new(ChainState::new(
                initial_height,
                max_downloading_block_queue_size,
                node_id,
            )),
            peers: Arc::new(PeerStatusTable::new()),
        }
    }

    pub fn state(&self) -> Arc<ChainState> {
        self.state.clone()
    }

    pub fn peers(&self) -> Arc<PeerStatusTable> {
        self.peers.clone()
    }

    /// Current committed height and executed cursor, for the `status` command.
    pub fn status(&self) -> (u64, u64) {
        (self.state.block_number(), self.state.executed_block())
    }

    /// Force the executed cursor back to `height`, letting the apply pipeline re-derive
    /// from there. Does not move the committed height; only the ledger can do that.
    pub fn rewind_to(&self, height: u64) {
        self.state.set_executed_block(height);
    }
}
