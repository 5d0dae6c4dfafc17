use serde::{Deserialize, Serialize};

use super::macros::config_struct;

/// The execute step's retry cap: up to `RETRY_LIMIT + 1` total attempts before a rewind.
pub const RETRY_LIMIT: usize = chain_sync::pipeline::RETRY_LIMIT as usize;

config_struct! {
    #[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields, default)]
    pub struct SyncConfig {
        #[doc = " The maximum number of blocks held in the downloading queue and ingress buffer."]
        pub max_downloading_block_queue_size: usize,

        #[doc = " The number of rayon threads used to encode and hash a block's transactions"]
        #[doc = " before handing them to the ledger."]
        pub rayon_threads: usize,
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_downloading_block_queue_size: 1000,
            rayon_threads: (std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get) * 3)
                .div_ceil(4),
        }
    }
}
