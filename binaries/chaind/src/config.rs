//! `chaind` config: layered over a TOML file, `clap` CLI overrides and built-in defaults.

mod args;
mod fs;
mod macros;
mod sections;
mod tokio;
mod tracing_config;

use clap::Parser;
use serde::{Deserialize, Serialize};

pub use args::Args;
pub use sections::RETRY_LIMIT;

use self::macros::config_struct;
use crate::error::ChaindError;

config_struct! {
    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    #[serde(deny_unknown_fields, default)]
    pub struct Config {
        #[child = true]
        #[doc = " Filesystem paths."]
        pub fs: fs::FileSystemConfig,

        #[child = true]
        #[doc = " Block sync engine tuning."]
        pub sync: sections::SyncConfig,

        #[child = true]
        #[doc = " Tokio async runtime."]
        pub tokio: tokio::TokioConfig,

        #[child = true]
        #[doc = " Logging output."]
        pub tracing: tracing_config::TracingConfig,
    }
}

/// Render the default config as a fully doc-commented TOML document, for `--generate-config`.
pub fn generate_example_config() -> String {
    let mut doc = toml_edit::ser::to_document(&Config::default())
        .expect("Config::default() always serializes");
    Config::write_docs(doc.as_table_mut());
    doc.to_string()
}

impl Config {
    /// Load the on-disk config file (if any), merge CLI overrides, and apply defaults.
    fn read_config_file(args: &Args) -> Result<Self, ChaindError> {
        let config_path = args
            .config_file
            .clone()
            .unwrap_or_else(|| chain_helper::fs::node_config_dir().join("Chaind.toml"));

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                ChaindError::Config(anyhow::anyhow!(
                    "failed to parse config file at {config_path:?}: {e}"
                ))
            }),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Parse CLI args, read the config file, apply overrides and handle quick-exit flags.
///
/// Exits the process on a malformed config file; logging is not yet initialized this early,
/// so the error is reported directly to stderr.
pub fn read_config_and_args() -> Config {
    let args = Args::parse();
    args.do_quick_requests();

    let config = Config::read_config_file(&args).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    args.apply_args(config)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
