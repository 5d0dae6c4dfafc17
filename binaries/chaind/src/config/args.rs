use std::{path::PathBuf, process::exit};

use crate::config::{generate_example_config, Config};

/// `chaind` CLI arguments.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The PATH of the `chaind` config file.
    #[arg(long)]
    pub config_file: Option<PathBuf>,
    /// Override the node's data directory.
    #[arg(long)]
    pub data_directory: Option<PathBuf>,
    /// Override the downloading queue / ingress buffer capacity.
    #[arg(long)]
    pub max_downloading_block_queue_size: Option<usize>,
    /// Generate a config file and print it to stdout.
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Complete any quick requests asked for in [`Args`].
    ///
    /// May cause the process to [`exit`].
    pub fn do_quick_requests(&self) {
        if self.generate_config {
            println!("{}", generate_example_config());
            exit(0);
        }
    }

    /// Apply the [`Args`] to the given [`Config`].
    pub fn apply_args(&self, mut config: Config) -> Config {
        if let Some(data_directory) = self.data_directory.clone() {
            config.fs.data_directory = data_directory;
        }

        if let Some(size) = self.max_downloading_block_queue_size {
            config.sync.max_downloading_block_queue_size = size;
        }

        config
    }
}
