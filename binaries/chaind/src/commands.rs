//! Commands
//!
//! `chaind` [`Command`] definition and handling.
use std::io;
use std::{thread::sleep, time::Duration};

use clap::{builder::TypedValueParser, Parser, ValueEnum};
use tokio::sync::mpsc;
use tracing::level_filters::LevelFilter;

use chain_helper::time::secs_to_hms;

use crate::engine::Engine;
use crate::{
    logging::{self, ChaindTracingFilter},
    statics,
    supervisor::ChaindSupervisor,
};

/// A command received from [`io::stdin`].
#[derive(Debug, Parser)]
#[command(
    multicall = true,
    subcommand_required = true,
    rename_all = "snake_case",
    help_template = "{all-args}",
    arg_required_else_help = true,
    disable_help_flag = true
)]
pub enum Command {
    /// Change the log output.
    #[command(arg_required_else_help = true)]
    SetLog {
        /// The minimum log level that will be displayed.
        #[arg(
          short, long,
          value_parser = clap::builder::PossibleValuesParser::new(["off", "trace", "debug", "info", "warn", "error"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
        level: Option<LevelFilter>,
        /// The logging output target to change.
        #[arg(value_enum, default_value_t)]
        output_target: OutputTarget,
    },

    /// Print status information on `chaind`.
    Status,

    /// Force the executed cursor back to `height`, so the apply pipeline re-derives from
    /// there on the next push or retry.
    RewindTo { height: u64 },

    Exit,
}

/// The log output target.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputTarget {
    /// The stdout logging output.
    #[default]
    Stdout,
    /// The file appender logging output.
    File,
}

/// The [`Command`] listener loop.
pub fn command_listener(incoming_commands: mpsc::Sender<Command>) -> ! {
    let mut stdin = io::stdin();
    let mut line = String::new();

    loop {
        line.clear();

        if let Err(e) = stdin.read_line(&mut line) {
            eprintln!("Failed to read from stdin: {e}");
            sleep(Duration::from_secs(1));
            continue;
        }

        match Command::try_parse_from(line.split_whitespace()) {
            Ok(command) => drop(
                incoming_commands
                    .blocking_send(command)
                    .inspect_err(|err| eprintln!("Failed to send command: {err}")),
            ),
            Err(err) => err.print().unwrap(),
        }
    }
}

/// The [`Command`] handler loop.
pub async fn io_loop(
    mut incoming_commands: mpsc::Receiver<Command>,
    engine: Engine,
    supervisor: ChaindSupervisor,
) {
    loop {
        let Some(command) = incoming_commands.recv().await else {
            tracing::warn!("Shutting down io_loop, command channel closed.");
            return;
        };

        match command {
            Command::SetLog {
                level,
                output_target,
            } => {
                let modify_output = |filter: &mut ChaindTracingFilter| {
                    if let Some(level) = level {
                        filter.level = level;
                    }
                    println!("NEW LOG FILTER: {filter}");
                };

                match output_target {
                    OutputTarget::File => logging::modify_file_output(modify_output),
                    OutputTarget::Stdout => logging::modify_stdout_output(modify_output),
                }
            }
            Command::Status => {
                let uptime = statics::START_INSTANT.elapsed().unwrap_or_default();
                let (h, m, s) = secs_to_hms(uptime.as_secs());
                let (committed, executed) = engine.status();

                println!(
                    "STATUS:\n  uptime: {h}h {m}m {s}s,\n  committed_height: {committed},\n  executed_block: {executed}"
                );
            }
            Command::RewindTo { height } => {
                tracing::info!(height, "rewinding executed cursor by operator command");
                engine.rewind_to(height);
                println!("Rewound executed cursor to {height}.");
            }
            Command::Exit => {
                shutdown(supervisor).await;
                return;
            }
        }
    }
}

async fn shutdown(supervisor: ChaindSupervisor) {
    tracing::info!("Exiting chaind");
    supervisor.shutdown_handle.trigger_shutdown();

    supervisor.task_tracker.close();

    tracing::info!("Waiting for tasks to finish.");
    supervisor.task_tracker.wait().await;
}
