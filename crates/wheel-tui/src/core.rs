//! WheelCore: single-owner event loop around the coordinator.
//!
//! Runs embedded in the TUI process. The TUI sends `CoreEvent`s in; WheelCore
//! is the only task that touches the `Coordinator` (and through it the pool
//! file). Every surface call the coordinator makes is broadcast as a
//! `BroadcastMessage::Surface`, and each resolved command gets a
//! `BroadcastMessage::Notice` the TUI can turn into a toast.
//!
//! Timed phases are just deadlines: the loop sleeps until the coordinator's
//! next deadline or the next command, whichever comes first.

use std::time::Instant;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use wheel_proto::config::Config;
use wheel_proto::coordinator::{Coordinator, Outcome};
use wheel_proto::pool::PoolStore;
use wheel_proto::protocol::{Command, Surface, SurfaceEvent};
use wheel_proto::selection::{EntropySource, RandomSource, RngSource};
use wheel_proto::storage::{JsonFileRepository, PoolRepository};
use wheel_proto::WheelError;

use crate::BroadcastMessage;

// ── CoreEvent ─────────────────────────────────────────────────────────────────

/// All inputs into the WheelCore loop.
#[derive(Debug)]
pub enum CoreEvent {
    /// A user intent from the TUI.
    Command(Command),
    /// Shutdown requested.
    Shutdown,
}

/// How a command was resolved, for user feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Added(String),
    Duplicate(String),
    Deleted(String),
    Cleared,
    Imported(usize),
    ImportFailed(String),
    /// A pool edit arrived while a spin was in progress.
    Busy,
}

// ── Publisher ─────────────────────────────────────────────────────────────────

/// Surface that forwards every call onto the broadcast channel.
struct Publisher {
    tx: broadcast::Sender<BroadcastMessage>,
}

impl Publisher {
    fn send(&self, event: SurfaceEvent) {
        // No receivers just means the TUI is gone; nothing to do.
        let _ = self.tx.send(BroadcastMessage::Surface(event));
    }
}

impl Surface for Publisher {
    fn render(&mut self, pool: &[String], highlight: Option<usize>) {
        self.send(SurfaceEvent::Render {
            pool: pool.to_vec(),
            highlight,
        });
    }

    fn spin(&mut self, angle_degrees: f64) {
        self.send(SurfaceEvent::Spin {
            angle: angle_degrees,
        });
    }

    fn stop_spin(&mut self, angle_degrees: f64) {
        self.send(SurfaceEvent::StopSpin {
            angle: angle_degrees,
        });
    }

    fn show_winner(&mut self, label: &str) {
        self.send(SurfaceEvent::ShowWinner {
            label: label.to_string(),
        });
    }

    fn hide_result(&mut self) {
        self.send(SurfaceEvent::HideResult);
    }

    fn set_busy_indicator(&mut self, busy: bool) {
        self.send(SurfaceEvent::Busy { busy });
    }

    fn notify_pool_exhausted(&mut self) {
        self.send(SurfaceEvent::PoolExhausted);
    }
}

// ── WheelCore ─────────────────────────────────────────────────────────────────

pub struct WheelCore<R: PoolRepository, G: RandomSource> {
    coordinator: Coordinator<R, G>,
    publisher: Publisher,
}

impl WheelCore<JsonFileRepository, EntropySource> {
    /// Restore the pool from the configured file and seed from the OS.
    pub fn open(config: &Config, broadcast_tx: broadcast::Sender<BroadcastMessage>) -> Self {
        let repo = JsonFileRepository::new(config.paths.pool_file.clone());
        info!("WheelCore: pool file {}", repo.path().display());
        let pool = PoolStore::open(repo);
        let coordinator = Coordinator::new(pool, RngSource::from_entropy(), config.wheel.clone());
        Self::new(coordinator, broadcast_tx)
    }
}

impl<R: PoolRepository, G: RandomSource> WheelCore<R, G> {
    pub fn new(
        coordinator: Coordinator<R, G>,
        broadcast_tx: broadcast::Sender<BroadcastMessage>,
    ) -> Self {
        Self {
            coordinator,
            publisher: Publisher { tx: broadcast_tx },
        }
    }

    /// Run the core event loop. Returns when a `Shutdown` event is received
    /// or the event channel is closed (TUI exited).
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<CoreEvent>) {
        info!("WheelCore: starting event loop");

        // Initial picture so names appear before the first keypress.
        self.coordinator.sync(&mut self.publisher);

        loop {
            let deadline = self.coordinator.next_deadline();
            tokio::select! {
                evt = event_rx.recv() => match evt {
                    None => {
                        info!("WheelCore: event channel closed, shutting down");
                        break;
                    }
                    Some(CoreEvent::Shutdown) => {
                        info!("WheelCore: shutdown requested");
                        break;
                    }
                    Some(CoreEvent::Command(cmd)) => {
                        self.handle_command(cmd);
                    }
                },

                _ = sleep_until(deadline) => {
                    self.coordinator.fire_due(now(), &mut self.publisher);
                }
            }
        }

        self.coordinator.shutdown();
    }

    fn handle_command(&mut self, cmd: Command) {
        debug!("WheelCore: command {:?}", cmd);
        let busy = self.coordinator.is_busy();
        let label = match &cmd {
            Command::Add { label } | Command::Delete { label } => label.trim().to_string(),
            _ => String::new(),
        };

        let notice = match (&cmd, self.coordinator.handle(cmd.clone(), now(), &mut self.publisher)) {
            (Command::Add { .. }, Outcome::Applied) => Some(Notice::Added(label)),
            (Command::Add { .. }, Outcome::Ignored) if busy => Some(Notice::Busy),
            (Command::Add { .. }, Outcome::Ignored) if !label.is_empty() => {
                Some(Notice::Duplicate(label))
            }
            (Command::Delete { .. }, Outcome::Applied) => Some(Notice::Deleted(label)),
            (Command::Delete { .. } | Command::Reset, Outcome::Ignored) if busy => {
                Some(Notice::Busy)
            }
            (Command::Reset, Outcome::Applied) => Some(Notice::Cleared),
            (_, Outcome::Imported(n)) => Some(Notice::Imported(n)),
            (_, Outcome::Failed(WheelError::Busy)) => Some(Notice::Busy),
            (_, Outcome::Failed(e)) => Some(Notice::ImportFailed(e.to_string())),
            _ => None,
        };

        if let Some(notice) = notice {
            let _ = self.publisher.tx.send(BroadcastMessage::Notice(notice));
        }
    }
}

/// Current time on tokio's clock, so paused-time tests line up with deadlines.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wheel_proto::config::{RemovalMode, WheelConfig};
    use wheel_proto::storage::MemoryRepository;

    struct Always(usize);

    impl RandomSource for Always {
        fn pick_index(&mut self, len: usize) -> usize {
            self.0 % len
        }

        fn jitter(&mut self, _bound: f64) -> f64 {
            0.0
        }
    }

    fn spawn_core(
        names: &[&str],
        removal: RemovalMode,
    ) -> (
        mpsc::Sender<CoreEvent>,
        broadcast::Receiver<BroadcastMessage>,
        MemoryRepository,
    ) {
        let repo = MemoryRepository::with_labels(names.iter().copied());
        let config = WheelConfig {
            spin_duration_ms: 6000,
            fade_duration_ms: 500,
            removal,
        };
        let coordinator = Coordinator::new(PoolStore::open(repo.clone()), Always(1), config);
        let (btx, brx) = broadcast::channel(64);
        let (etx, erx) = mpsc::channel(16);
        tokio::spawn(WheelCore::new(coordinator, btx).run(erx));
        (etx, brx, repo)
    }

    async fn next_surface(rx: &mut broadcast::Receiver<BroadcastMessage>) -> SurfaceEvent {
        loop {
            if let BroadcastMessage::Surface(e) = rx.recv().await.unwrap() {
                return e;
            }
        }
    }

    async fn next_notice(rx: &mut broadcast::Receiver<BroadcastMessage>) -> Notice {
        loop {
            if let BroadcastMessage::Notice(n) = rx.recv().await.unwrap() {
                return n;
            }
        }
    }

    async fn send(tx: &mpsc::Sender<CoreEvent>, cmd: Command) {
        tx.send(CoreEvent::Command(cmd)).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_sync_then_spin_reveals_after_duration() {
        let (tx, mut rx, repo) = spawn_core(&["A", "B", "C"], RemovalMode::Immediate);

        assert_eq!(
            next_surface(&mut rx).await,
            SurfaceEvent::Render {
                pool: vec!["A".into(), "B".into(), "C".into()],
                highlight: None
            }
        );
        assert_eq!(next_surface(&mut rx).await, SurfaceEvent::Busy { busy: false });

        let started = tokio::time::Instant::now();
        send(&tx, Command::Spin).await;
        assert_eq!(next_surface(&mut rx).await, SurfaceEvent::Busy { busy: true });
        assert_eq!(next_surface(&mut rx).await, SurfaceEvent::HideResult);
        assert!(matches!(next_surface(&mut rx).await, SurfaceEvent::Spin { .. }));

        assert_eq!(next_surface(&mut rx).await, SurfaceEvent::Busy { busy: false });
        assert!(started.elapsed() >= Duration::from_millis(6000));
        assert!(matches!(next_surface(&mut rx).await, SurfaceEvent::StopSpin { .. }));
        assert_eq!(
            next_surface(&mut rx).await,
            SurfaceEvent::ShowWinner { label: "B".into() }
        );
        assert_eq!(
            next_surface(&mut rx).await,
            SurfaceEvent::Render {
                pool: vec!["A".into(), "C".into()],
                highlight: None
            }
        );
        assert_eq!(repo.stored(), vec!["A", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notices_for_pool_edits() {
        let (tx, mut rx, _repo) = spawn_core(&["Bob"], RemovalMode::Immediate);

        send(&tx, Command::Add { label: " Ana ".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Added("Ana".into()));

        send(&tx, Command::Add { label: "Ana".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Duplicate("Ana".into()));

        send(&tx, Command::Delete { label: "Bob".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Deleted("Bob".into()));

        send(&tx, Command::Import { text: "Ana\n".into() }).await;
        assert!(matches!(next_notice(&mut rx).await, Notice::ImportFailed(_)));

        send(&tx, Command::Import { text: "Cy,1\nDee,2\n".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Imported(2));

        send(&tx, Command::Reset).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Cleared);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_during_spin_report_busy() {
        let (tx, mut rx, repo) = spawn_core(&["A", "B"], RemovalMode::Deferred);
        send(&tx, Command::Spin).await;
        send(&tx, Command::Add { label: "C".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Busy);
        assert_eq!(repo.stored(), vec!["A", "B"]);

        send(&tx, Command::Import { text: "C\nD\n".into() }).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Busy);
        send(&tx, Command::Reset).await;
        assert_eq!(next_notice(&mut rx).await, Notice::Busy);
        assert_eq!(repo.stored(), vec!["A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_continue_fades_then_removes() {
        let (tx, mut rx, repo) = spawn_core(&["X", "Y", "Z"], RemovalMode::Deferred);
        send(&tx, Command::Spin).await;
        loop {
            if let SurfaceEvent::ShowWinner { label } = next_surface(&mut rx).await {
                assert_eq!(label, "Y");
                break;
            }
        }
        assert_eq!(
            next_surface(&mut rx).await,
            SurfaceEvent::Render {
                pool: vec!["X".into(), "Y".into(), "Z".into()],
                highlight: Some(1)
            }
        );

        send(&tx, Command::Continue).await;
        assert_eq!(next_surface(&mut rx).await, SurfaceEvent::HideResult);
        assert_eq!(
            next_surface(&mut rx).await,
            SurfaceEvent::Render {
                pool: vec!["X".into(), "Z".into()],
                highlight: None
            }
        );
        assert_eq!(repo.stored(), vec!["X", "Z"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_exits_when_sender_dropped() {
        let repo = MemoryRepository::new();
        let coordinator = Coordinator::new(
            PoolStore::open(repo),
            Always(0),
            WheelConfig::default(),
        );
        let (btx, _brx) = broadcast::channel(8);
        let (etx, erx) = mpsc::channel(1);
        let handle = tokio::spawn(WheelCore::new(coordinator, btx).run(erx));
        drop(etx);
        handle.await.unwrap();
    }
}
