use serde::{Deserialize, Serialize};

/// User intents sent from the presentation side to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    Spin,
    Continue,
    Add { label: String },
    Delete { label: String },
    Reset,
    /// Raw CSV text; the first column of each line is a candidate name.
    Import { text: String },
    /// Re-render the current pool for a freshly attached surface.
    Sync,
}

/// Everything the coordinator asks the presentation side to do.
///
/// A screen, a recorder in tests, or a channel publisher all implement this.
pub trait Surface {
    fn render(&mut self, pool: &[String], highlight: Option<usize>);
    fn spin(&mut self, angle_degrees: f64);
    fn stop_spin(&mut self, angle_degrees: f64);
    fn show_winner(&mut self, label: &str);
    fn hide_result(&mut self);
    fn set_busy_indicator(&mut self, busy: bool);
    fn notify_pool_exhausted(&mut self);
}

/// Owned form of one [`Surface`] call, for sending across tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum SurfaceEvent {
    Render {
        pool: Vec<String>,
        highlight: Option<usize>,
    },
    Spin {
        angle: f64,
    },
    StopSpin {
        angle: f64,
    },
    ShowWinner {
        label: String,
    },
    HideResult,
    Busy {
        busy: bool,
    },
    PoolExhausted,
}

impl SurfaceEvent {
    /// Replay this event onto a surface.
    pub fn apply(self, surface: &mut impl Surface) {
        match self {
            Self::Render { pool, highlight } => surface.render(&pool, highlight),
            Self::Spin { angle } => surface.spin(angle),
            Self::StopSpin { angle } => surface.stop_spin(angle),
            Self::ShowWinner { label } => surface.show_winner(&label),
            Self::HideResult => surface.hide_result(),
            Self::Busy { busy } => surface.set_busy_indicator(busy),
            Self::PoolExhausted => surface.notify_pool_exhausted(),
        }
    }
}

/// Recording surface: every call is appended as a [`SurfaceEvent`].
impl Surface for Vec<SurfaceEvent> {
    fn render(&mut self, pool: &[String], highlight: Option<usize>) {
        self.push(SurfaceEvent::Render {
            pool: pool.to_vec(),
            highlight,
        });
    }

    fn spin(&mut self, angle_degrees: f64) {
        self.push(SurfaceEvent::Spin {
            angle: angle_degrees,
        });
    }

    fn stop_spin(&mut self, angle_degrees: f64) {
        self.push(SurfaceEvent::StopSpin {
            angle: angle_degrees,
        });
    }

    fn show_winner(&mut self, label: &str) {
        self.push(SurfaceEvent::ShowWinner {
            label: label.to_string(),
        });
    }

    fn hide_result(&mut self) {
        self.push(SurfaceEvent::HideResult);
    }

    fn set_busy_indicator(&mut self, busy: bool) {
        self.push(SurfaceEvent::Busy { busy });
    }

    fn notify_pool_exhausted(&mut self) {
        self.push(SurfaceEvent::PoolExhausted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_json_shape() {
        let json = serde_json::to_string(&Command::Add {
            label: "Ana".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"cmd":"Add","label":"Ana"}"#);
        let back: Command = serde_json::from_str(r#"{"cmd":"Spin"}"#).unwrap();
        assert_eq!(back, Command::Spin);
    }

    #[test]
    fn test_events_replay_onto_another_surface() {
        let mut first: Vec<SurfaceEvent> = Vec::new();
        first.set_busy_indicator(true);
        first.spin(1935.0);
        first.show_winner("C");
        first.render(&["A".to_string()], Some(0));

        let mut second: Vec<SurfaceEvent> = Vec::new();
        for event in first.clone() {
            event.apply(&mut second);
        }
        assert_eq!(first, second);
    }
}
