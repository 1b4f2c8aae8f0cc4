//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this for wheel state, but never mutate it.
//! The App event-loop is the only thing that writes to AppState, mostly by
//! replaying the core's `SurfaceEvent`s onto it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use wheel_proto::config::{Config, RemovalMode};
use wheel_proto::protocol::Surface;
use wheel_proto::selection::segment_under_pointer;

use crate::animation::WheelMotion;
use crate::widgets::status_bar::InputMode;

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    // ── Wheel (mirrors the core) ───────────────────────────────────────────
    pub pool: Vec<String>,
    /// Index of a revealed winner still on the wheel (deferred removal).
    pub highlight: Option<usize>,
    pub busy: bool,
    /// Label in the result banner, if shown.
    pub winner: Option<String>,
    /// Set when a spin found no names left; cleared by dismissing the overlay.
    pub exhausted: bool,
    pub motion: WheelMotion,

    // ── Session ─────────────────────────────────────────────────────────────
    /// Winners in draw order since start (or the last reset).
    pub drawn: Vec<String>,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,

    // ── Settings ────────────────────────────────────────────────────────────
    pub removal: RemovalMode,
    pub spin_duration: Duration,
    pub pool_file: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            pool: Vec::new(),
            highlight: None,
            busy: false,
            winner: None,
            exhausted: false,
            motion: WheelMotion::new(),
            drawn: Vec::new(),
            input_mode: InputMode::Normal,
            removal: config.wheel.removal,
            spin_duration: config.wheel.spin_duration(),
            pool_file: config.paths.pool_file.clone(),
        }
    }

    /// A winner is on screen and the wheel waits for an explicit continue.
    pub fn awaiting_continue(&self) -> bool {
        self.removal == RemovalMode::Deferred && self.highlight.is_some() && !self.busy
    }

    pub fn can_spin(&self) -> bool {
        !self.busy && !self.pool.is_empty() && !self.awaiting_continue()
    }

    /// Wheel angle to draw right now.
    pub fn display_angle(&self) -> f64 {
        self.motion.angle_at(Instant::now())
    }

    /// Name currently under the pointer, if any.
    pub fn name_under_pointer(&self) -> Option<&str> {
        if self.pool.is_empty() {
            return None;
        }
        let idx = segment_under_pointer(self.display_angle(), self.pool.len());
        self.pool.get(idx).map(String::as_str)
    }
}

impl Surface for AppState {
    fn render(&mut self, pool: &[String], highlight: Option<usize>) {
        self.pool = pool.to_vec();
        self.highlight = highlight.filter(|&i| i < self.pool.len());
        if !self.pool.is_empty() {
            self.exhausted = false;
        }
    }

    fn spin(&mut self, angle_degrees: f64) {
        self.motion
            .start(angle_degrees, Instant::now(), self.spin_duration);
    }

    fn stop_spin(&mut self, angle_degrees: f64) {
        self.motion.snap(angle_degrees);
    }

    fn show_winner(&mut self, label: &str) {
        self.winner = Some(label.to_string());
        self.drawn.push(label.to_string());
    }

    fn hide_result(&mut self) {
        self.winner = None;
    }

    fn set_busy_indicator(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn notify_pool_exhausted(&mut self) {
        self.exhausted = true;
    }
}
