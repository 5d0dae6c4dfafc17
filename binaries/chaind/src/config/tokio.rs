use serde::{Deserialize, Serialize};

use super::macros::config_struct;

config_struct! {
    /// [`tokio`] config.
    #[derive(Debug, Deserialize, Serialize, Eq, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub struct TokioConfig {
        #[doc = " The amount of threads to spawn for the async thread-pool."]
        pub threads: usize,
    }
}

impl Default for TokioConfig {
    fn default() -> Self {
        Self {
            // 75% available threads.
            threads: (std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get) * 3)
                .div_ceil(4),
        }
    }
}
