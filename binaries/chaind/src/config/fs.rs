use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use chain_helper::fs::{node_cache_dir, node_data_dir};

use super::macros::config_struct;

config_struct! {
    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub struct FileSystemConfig {
        #[doc = " The directory committed ledger state and rotating log files are written to."]
        pub data_directory: PathBuf,

        #[doc = " The directory downloaded-but-not-yet-committed block data is cached in."]
        pub cache_directory: PathBuf,
    }
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            data_directory: node_data_dir().to_path_buf(),
            cache_directory: node_cache_dir().to_path_buf(),
        }
    }
}
