use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use room_service::RemoteRoomService;
use state_store::StateStore;
use termination::{create_termination, Interrupted, Terminator};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui_management::UiManager;

mod room_service;
mod state_store;
mod termination;
mod ui_management;

const LOG_FILE_NAME: &str = "room-picker.log";
const DEFAULT_LOG_FILTER: &str = "room_picker=info,comms=info";

/// Terminal room picker backed by a remote room service
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Host and port of the room service
    #[arg(short, long, env = "ROOM_PICKER_SERVER_ADDRESS", default_value = "localhost:8080")]
    server_address: String,

    /// Directory the log file is written to
    #[arg(long, env = "ROOM_PICKER_LOG_DIR", default_value = ".")]
    log_dir: PathBuf,
}

// stdout belongs to the terminal ui, so logs only go to a file
fn init_tracing(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(&args.log_dir);

    info!(server_address = %args.server_address, "starting room picker");

    let service = RemoteRoomService::connect(args.server_address.as_str())
        .await
        .with_context(|| format!("could not reach the room service at {}", args.server_address))?;

    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new();
    let (ui_manager, action_rx) = UiManager::new();

    tokio::try_join!(
        state_store.main_loop(terminator, service, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    if let Ok(reason) = interrupt_rx.recv().await {
        match reason {
            Interrupted::UserInt => info!("exited per user request"),
            Interrupted::OsSigInt => info!("exited because of an os sig int"),
        }
    } else {
        info!("exited because of an unexpected error");
    }

    Ok(())
}
