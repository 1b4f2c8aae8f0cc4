mod action;
mod animation;
mod app;
mod app_state;
mod component;
mod components;
mod core;
mod focus;
mod theme;
mod widgets;

use tokio::sync::{broadcast, mpsc};

use wheel_proto::protocol::SurfaceEvent;

/// Defines what the WheelCore broadcasts.
#[derive(Debug, Clone)]
pub enum BroadcastMessage {
    /// One coordinator → surface instruction.
    Surface(SurfaceEvent),
    /// How a user intent was resolved, for toasts.
    Notice(core::Notice),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = wheel_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = wheel_proto::platform::log_file();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides; the wheel is quiet enough that info is the default.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("namewheel log: {}", log_path.display());

    tracing::info!("namewheel starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match wheel_proto::config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("config: {}, using defaults", e);
            wheel_proto::config::Config::default()
        }
    };

    // ── Broadcast channel (WheelCore → TUI) ─────────────────────────────────
    let (broadcast_tx, broadcast_rx) = broadcast::channel::<BroadcastMessage>(1024);

    // ── CoreEvent channel (TUI → WheelCore) ─────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel::<core::CoreEvent>(256);

    let wheel_core = core::WheelCore::open(&config, broadcast_tx.clone());

    // ── Spawn WheelCore event loop ───────────────────────────────────────────
    let core_handle = tokio::spawn(async move {
        wheel_core.run(event_rx).await;
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(config, event_tx);
    let result = app.run(broadcast_rx).await;

    // The core loop ends once every command sender is gone.
    if let Err(e) = core_handle.await {
        tracing::error!("WheelCore task failed: {}", e);
    }
    tracing::info!("namewheel exiting");
    result
}
