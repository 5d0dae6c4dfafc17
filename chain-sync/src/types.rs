//! Shared data types for the block download and apply pipeline.
//!
//! These are deliberately plain: the real block/transaction codec lives outside this
//! crate, behind the [`crate::collaborators::BlockFactory`] contract.

use std::cmp::Ordering;

/// A 32-byte block or transaction hash.
pub type Hash = [u8; 32];

/// Identity of a peer, as used for logging and the peer status table.
pub type PeerId = [u8; 32];

/// Header fields consulted by the apply pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub hash: Hash,
    pub parent_hash: Hash,
    pub txs_root: Hash,
    pub receipts_root: Hash,
    pub state_root: Hash,
    pub sealer: Vec<u8>,
}

/// A single transaction inside a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: Hash,
    pub nonce: u64,
    pub data: Vec<u8>,
}

impl Transaction {
    /// Raw encoded bytes of this transaction, as passed to the ledger.
    pub fn encode(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// A decoded block: a header plus its transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn number(&self) -> u64 {
        self.header.number
    }
}

/// Wraps a [`Block`] for use in a min-heap keyed on `header.number`.
///
/// `BinaryHeap` is a max-heap, so `Ord` is reversed to get min-height-first pop order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightOrdered(pub Block);

impl Ord for HeightOrdered {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.header.number.cmp(&self.0.header.number)
    }
}

impl PartialOrd for HeightOrdered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A network-delivered envelope carrying one or more undecoded blocks.
#[derive(Debug, Clone)]
pub struct BlocksBatch {
    /// Raw, undecoded block byte-slices, in the order the peer sent them.
    pub blocks: Vec<Vec<u8>>,
    /// Peer this batch was received from, for banning/logging on bad data.
    pub peer: PeerId,
}

/// Ledger configuration returned after a successful commit, used to reconfigure
/// consensus and to broadcast the node's new height.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub sealer: Vec<u8>,
    pub height: u64,
}

/// Per-transaction submission result notified to the transaction pool after commit.
#[derive(Debug, Clone)]
pub struct TxSubmitResult {
    pub block_number: u64,
    pub block_hash: Hash,
    pub tx_hash: Hash,
    pub nonce: u64,
}

impl TxSubmitResult {
    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }
}
