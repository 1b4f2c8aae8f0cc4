//! Coordinator: owns the pool and drives one spin at a time.
//!
//! ```text
//!  Idle ──request_spin──▶ Spinning ──SpinComplete──▶ Revealed ──continue──▶ Fading
//!   ▲                         │ (immediate removal)        │                   │
//!   └─────────────────────────┴────────────────────────────┘◀──FadeComplete────┘
//! ```
//!
//! Timed phases end through [`Coordinator::fire_due`]; the coordinator itself
//! never blocks. Outside `Idle` every request except `continue_after_reveal`
//! (in `Revealed`) is rejected without side effects.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{RemovalMode, WheelConfig};
use crate::error::{Result, WheelError};
use crate::import;
use crate::pool::PoolStore;
use crate::protocol::{Command, Surface};
use crate::schedule::{ScheduledTask, TaskKind, TimerSlot};
use crate::selection::{RandomSource, SpinPlan};
use crate::storage::PoolRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
    Revealed,
    /// Revealed winner on its way out; the fade timer is running.
    Fading,
}

/// The in-flight (or just revealed) selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    pub plan: SpinPlan,
}

impl SpinSession {
    pub fn winner_index(&self) -> usize {
        self.plan.winner_index
    }
}

/// Result of dispatching a [`Command`].
#[derive(Debug)]
pub enum Outcome {
    Applied,
    /// Validation no-op: nothing changed.
    Ignored,
    Imported(usize),
    Failed(WheelError),
}

pub struct Coordinator<R: PoolRepository, G: RandomSource> {
    pool: PoolStore<R>,
    rng: G,
    config: WheelConfig,
    phase: Phase,
    session: Option<SpinSession>,
    timer: TimerSlot,
}

impl<R: PoolRepository, G: RandomSource> Coordinator<R, G> {
    pub fn new(pool: PoolStore<R>, rng: G, config: WheelConfig) -> Self {
        Self {
            pool,
            rng,
            config,
            phase: Phase::Idle,
            session: None,
            timer: TimerSlot::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn pool(&self) -> &PoolStore<R> {
        &self.pool
    }

    pub fn removal_mode(&self) -> RemovalMode {
        self.config.removal
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Dispatch one user intent.
    pub fn handle(&mut self, command: Command, now: Instant, surface: &mut impl Surface) -> Outcome {
        let applied = match command {
            Command::Spin => self.request_spin(now, surface),
            Command::Continue => self.continue_after_reveal(now, surface),
            Command::Add { label } => self.request_add(&label, surface),
            Command::Delete { label } => self.request_delete(&label, surface),
            Command::Reset => self.request_reset(surface),
            Command::Import { text } => {
                return match self.request_import(&text, surface) {
                    Ok(n) => Outcome::Imported(n),
                    Err(e) => Outcome::Failed(e),
                };
            }
            Command::Sync => {
                self.sync(surface);
                true
            }
        };
        if applied {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    /// Push the current pool and busy flag to `surface`.
    pub fn sync(&self, surface: &mut impl Surface) {
        surface.render(self.pool.labels(), self.highlight());
        surface.set_busy_indicator(self.phase == Phase::Spinning);
    }

    // ── Spin lifecycle ────────────────────────────────────────────────────────

    pub fn request_spin(&mut self, now: Instant, surface: &mut impl Surface) -> bool {
        if self.pool.is_empty() {
            debug!("Coordinator: spin on empty pool");
            surface.notify_pool_exhausted();
            return false;
        }
        if self.session.is_some() || self.phase != Phase::Idle {
            debug!("Coordinator: spin rejected in {:?}", self.phase);
            return false;
        }

        let plan = SpinPlan::draw(self.pool.size(), &mut self.rng);
        info!(
            "Coordinator: spinning {} names, winner #{} rotation {:.1}°",
            self.pool.size(),
            plan.winner_index,
            plan.total_rotation
        );

        self.session = Some(SpinSession { plan });
        self.phase = Phase::Spinning;

        surface.set_busy_indicator(true);
        surface.hide_result();
        surface.spin(plan.total_rotation);

        self.timer.schedule(ScheduledTask::after(
            TaskKind::SpinComplete,
            now,
            self.config.spin_duration(),
        ));
        true
    }

    pub fn continue_after_reveal(&mut self, now: Instant, surface: &mut impl Surface) -> bool {
        if self.phase != Phase::Revealed {
            debug!("Coordinator: continue ignored in {:?}", self.phase);
            return false;
        }
        self.phase = Phase::Fading;
        surface.hide_result();
        self.timer.schedule(ScheduledTask::after(
            TaskKind::FadeComplete,
            now,
            self.config.fade_duration(),
        ));
        true
    }

    /// Run the pending timed step if its deadline has passed.
    pub fn fire_due(&mut self, now: Instant, surface: &mut impl Surface) -> bool {
        match self.timer.take_due(now) {
            Some(TaskKind::SpinComplete) => {
                self.reveal(surface);
                true
            }
            Some(TaskKind::FadeComplete) => {
                self.finish_session(surface);
                true
            }
            None => false,
        }
    }

    /// Discard any pending step. Used at teardown.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.timer.cancel() {
            debug!("Coordinator: dropping pending {:?}", task.kind);
        }
    }

    fn reveal(&mut self, surface: &mut impl Surface) {
        let Some(session) = self.session.clone() else {
            warn!("Coordinator: spin completed without a session");
            self.phase = Phase::Idle;
            return;
        };

        surface.set_busy_indicator(false);
        surface.stop_spin(session.plan.normalized_rotation());

        let Some(winner) = self.pool.get(session.winner_index()).map(str::to_string) else {
            warn!(
                "Coordinator: winner index {} out of range",
                session.winner_index()
            );
            self.session = None;
            self.phase = Phase::Idle;
            surface.render(self.pool.labels(), None);
            return;
        };

        info!("Coordinator: winner {:?}", winner);
        surface.show_winner(&winner);

        match self.config.removal {
            RemovalMode::Immediate => self.finish_session(surface),
            RemovalMode::Deferred => {
                self.phase = Phase::Revealed;
                surface.render(self.pool.labels(), Some(session.winner_index()));
            }
        }
    }

    fn finish_session(&mut self, surface: &mut impl Surface) {
        if let Some(session) = self.session.take() {
            self.pool.remove_at(session.winner_index());
        }
        self.phase = Phase::Idle;
        surface.render(self.pool.labels(), None);
        info!("Coordinator: idle, {} names left", self.pool.size());
        if self.pool.is_empty() {
            surface.notify_pool_exhausted();
        }
    }

    fn highlight(&self) -> Option<usize> {
        match self.phase {
            Phase::Revealed | Phase::Fading => self.session.as_ref().map(SpinSession::winner_index),
            _ => None,
        }
    }

    // ── Pool edits (Idle only) ────────────────────────────────────────────────

    pub fn request_add(&mut self, label: &str, surface: &mut impl Surface) -> bool {
        if self.is_busy() {
            debug!("Coordinator: add rejected in {:?}", self.phase);
            return false;
        }
        if !self.pool.add(label) {
            return false;
        }
        surface.render(self.pool.labels(), None);
        true
    }

    pub fn request_delete(&mut self, label: &str, surface: &mut impl Surface) -> bool {
        if self.is_busy() {
            debug!("Coordinator: delete rejected in {:?}", self.phase);
            return false;
        }
        if !self.pool.remove_by_label(label) {
            return false;
        }
        surface.render(self.pool.labels(), None);
        true
    }

    pub fn request_reset(&mut self, surface: &mut impl Surface) -> bool {
        if self.is_busy() {
            debug!("Coordinator: reset rejected in {:?}", self.phase);
            return false;
        }
        self.pool.reset();
        surface.stop_spin(0.0);
        surface.hide_result();
        surface.render(self.pool.labels(), None);
        info!("Coordinator: pool reset");
        true
    }

    /// Merge new first-column names from CSV `text`. Returns how many were added.
    pub fn request_import(&mut self, text: &str, surface: &mut impl Surface) -> Result<usize> {
        if self.is_busy() {
            return Err(WheelError::Busy);
        }
        let fresh = import::parse_labels(text, self.pool.labels())?;
        let added = fresh.len();
        let mut merged = self.pool.snapshot();
        merged.extend(fresh);
        self.pool.replace_all(merged);
        surface.render(self.pool.labels(), None);
        info!("Coordinator: imported {} names", added);
        Ok(added)
    }
}
