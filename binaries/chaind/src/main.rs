#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(unreachable_pub, reason = "This is a binary, everything `pub` is ok")]

mod commands;
mod config;
mod constants;
mod engine;
mod error;
mod logging;
mod statics;
mod supervisor;
mod version;

use tokio::sync::mpsc;

fn main() {
    statics::init_lazylock_statics();

    let config = config::read_config_and_args();
    logging::init_logging(&config);

    chain_helper::fs::node_create_dir_all().expect(constants::PANIC_CRITICAL_SERVICE_ERROR);

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.sync.rayon_threads)
        .build_global()
        .expect(constants::PANIC_CRITICAL_SERVICE_ERROR);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.tokio.threads)
        .enable_all()
        .build()
        .expect(constants::PANIC_CRITICAL_SERVICE_ERROR);

    runtime.block_on(async_main(config));
}

async fn async_main(config: config::Config) {
    tracing::info!(
        version = version::CHAIND_VERSION,
        build = constants::VERSION_BUILD,
        release = version::CHAIND_VERSION_IS_RELEASE,
        "starting chaind"
    );

    let (supervisor, task) = supervisor::new();
    supervisor::spawn_signal_handler(task.shutdown_handle.clone());

    let engine = engine::Engine::new(0, config.sync.max_downloading_block_queue_size, [0; 32]);

    // The network transport, block codec, executor, consensus checker, ledger and
    // transaction pool are external collaborators (see `chain_sync::collaborators`) supplied
    // by whatever deployment wires this binary to a running chain. Constructing the
    // downloading queue, commit queue and apply pipeline, and driving them from the network
    // layer, happens here once those collaborators exist.

    let (command_tx, command_rx) = mpsc::channel(16);
    std::thread::spawn(move || commands::command_listener(command_tx));

    commands::io_loop(command_rx, engine, supervisor).await;
}
