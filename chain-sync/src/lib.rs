//! Block download, ordering and apply pipeline for a permissioned chain node.
//!
//! This crate owns the ingress buffer, the downloading and commit queues, the apply
//! pipeline state machine and the peer status table. It treats the block codec, the
//! executor, the consensus checker, the ledger and the transaction pool as external
//! collaborators reached through the traits in [`collaborators`].

pub mod collaborators;
pub mod commit_queue;
pub mod downloading_queue;
pub mod error;
pub mod ingress;
pub mod peer_status;
pub mod pipeline;
pub mod state;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
