//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Commands to the core flow out through `cmd_tx`; its answers come back
//!   as `SurfaceEvent`s replayed onto `AppState`.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::io::AsyncWriteExt;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use wheel_proto::config::Config;
use wheel_proto::platform;
use wheel_proto::protocol::{Command, SurfaceEvent};

use crate::core::{CoreEvent, Notice};
use crate::BroadcastMessage;

use crate::{
    action::{Action, ComponentId, PromptKind},
    app_state::AppState,
    component::Component,
    components::{
        finished_overlay::FinishedOverlay, help_overlay::HelpOverlay, name_list::NameList,
        wheel_panel::WheelPanel,
    },
    focus::FocusRing,
    widgets::{
        name_input::{NameInput, PromptAction},
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Core(BroadcastMessage),
    /// The broadcast receiver fell behind and dropped messages.
    Lagged(u64),
}

/// Redraw cadence while the wheel is turning.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// How long the input thread blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Last-drawn layout rects: used for mouse hit-testing.
#[derive(Default)]
struct PaneAreas {
    wheel: Rect,
    names: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    config: Config,

    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    wheel_panel: WheelPanel,
    name_list: NameList,
    help_overlay: HelpOverlay,
    finished_overlay: FinishedOverlay,
    prompt: NameInput,
    focus: FocusRing,

    cmd_tx: mpsc::Sender<CoreEvent>,

    /// Whether to quit on next iteration.
    should_quit: bool,

    pane_areas: PaneAreas,

    /// Toast notification manager.
    toast: ToastManager,
}

impl App {
    pub fn new(config: Config, cmd_tx: mpsc::Sender<CoreEvent>) -> Self {
        let state = AppState::new(&config);
        Self {
            config,
            state,
            wheel_panel: WheelPanel::new(),
            name_list: NameList::new(),
            help_overlay: HelpOverlay::new(),
            finished_overlay: FinishedOverlay::new(),
            prompt: NameInput::new(),
            focus: FocusRing::default(),
            cmd_tx,
            should_quit: false,
            pane_areas: PaneAreas::default(),
            toast: ToastManager::new(),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(
        mut self,
        mut broadcast_rx: broadcast::Receiver<BroadcastMessage>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls with a timeout so the thread notices when the app is gone.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("terminal input failed: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    error!("terminal poll failed: {}", e);
                    break;
                }
            }
        });

        // ── Background task: broadcast receiver (WheelCore → AppMessage) ──────
        let bc_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                let msg = match broadcast_rx.recv().await {
                    Ok(msg) => AppMessage::Core(msg),
                    Err(broadcast::error::RecvError::Lagged(n)) => AppMessage::Lagged(n),
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if bc_tx.send(msg).await.is_err() {
                    break;
                }
            }
        });
        drop(tx);

        // Toast expiry + spinner animation.
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Animation frames; only redraws while the wheel moves.
        let mut frame_tick = tokio::time::interval(FRAME_INTERVAL);
        frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else {
                        info!("input and core channels closed");
                        break;
                    };
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        redraw |= self.handle_message(next).await;
                    }
                    needs_redraw = redraw;
                }

                _ = toast_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    needs_redraw = had_toasts;
                }

                _ = frame_tick.tick() => {
                    needs_redraw = self.state.motion.is_running(Instant::now());
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        info!("app: quitting");
        let _ = self.cmd_tx.send(CoreEvent::Shutdown).await;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Returns whether the screen needs a redraw.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Core(BroadcastMessage::Surface(event)) => {
                self.on_surface(event).await;
                true
            }
            AppMessage::Core(BroadcastMessage::Notice(notice)) => {
                self.on_notice(notice);
                true
            }
            AppMessage::Lagged(n) => {
                warn!("broadcast receiver lagged by {} messages, resyncing", n);
                self.send_cmd(Command::Sync).await;
                false
            }
        }
    }

    async fn on_surface(&mut self, event: SurfaceEvent) {
        let is_render = matches!(event, SurfaceEvent::Render { .. });
        let winner = match &event {
            SurfaceEvent::ShowWinner { label } => Some(label.clone()),
            _ => None,
        };

        event.apply(&mut self.state);

        if is_render {
            self.name_list.sync(&self.state);
        }
        if let Some(label) = winner {
            info!("winner: {}", label);
            if self.config.ui.bell_on_winner {
                ring_bell().await;
            }
        }
    }

    fn on_notice(&mut self, notice: Notice) {
        match notice {
            Notice::Added(name) => self.toast.success(format!("added {}", name)),
            Notice::Duplicate(name) => {
                self.toast.warning(format!("{} is already on the wheel", name))
            }
            Notice::Deleted(name) => self.toast.info(format!("removed {}", name)),
            Notice::Cleared => {
                self.state.drawn.clear();
                self.toast.info("wheel cleared");
            }
            Notice::Imported(n) => {
                let noun = if n == 1 { "name" } else { "names" };
                self.toast
                    .resolve_spinner(Severity::Success, format!("imported {} {}", n, noun));
            }
            Notice::ImportFailed(reason) => {
                warn!("import: {}", reason);
                self.toast.resolve_spinner(Severity::Error, reason);
            }
            // An import rejected mid-spin still has its spinner up.
            Notice::Busy => self
                .toast
                .resolve_spinner(Severity::Warning, "wait for the wheel to stop"),
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // Prompt captures everything while open
        if self.prompt.is_active() {
            return match self.prompt.handle_key(key) {
                PromptAction::Submitted(PromptKind::AddName, text) => {
                    vec![Action::ClosePrompt, Action::AddName(text)]
                }
                PromptAction::Submitted(PromptKind::ImportFile, text) => {
                    let path = platform::expand_home(Path::new(&text));
                    vec![Action::ClosePrompt, Action::ImportFile(path)]
                }
                PromptAction::Cancelled => vec![Action::ClosePrompt],
                PromptAction::None => vec![],
            };
        }

        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            // Any other key closes the overlay
            return vec![Action::ToggleHelp];
        }

        if self.state.exhausted {
            return self.finished_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char(' ') | KeyCode::Enter => return vec![Action::SpinOrContinue],
            KeyCode::Char('c') => return vec![Action::Continue],
            KeyCode::Char('a') => return vec![Action::OpenPrompt(PromptKind::AddName)],
            KeyCode::Char('i') => return vec![Action::OpenPrompt(PromptKind::ImportFile)],
            KeyCode::Char('R') => return vec![Action::Reset],
            _ => {}
        }

        match self.focus.current() {
            Some(ComponentId::Wheel) => self.wheel_panel.handle_key(key, &self.state),
            Some(ComponentId::NameList) => self.name_list.handle_key(key, &self.state),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.prompt.is_active() || self.help_overlay.visible || self.state.exhausted {
            return vec![];
        }
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        }
        let (col, row) = (event.column, event.row);
        if hit(self.pane_areas.wheel, col, row) {
            self.wheel_panel
                .handle_mouse(event, self.pane_areas.wheel, &self.state)
        } else if hit(self.pane_areas.names, col, row) {
            self.name_list
                .handle_mouse(event, self.pane_areas.names, &self.state)
        } else {
            vec![]
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Let components react first (selection moves, overlay toggles)
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.wheel_panel.on_action(&action, s));
            out.extend(self.name_list.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out.extend(self.finished_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Wheel ─────────────────────────────────────────────────────────
            Action::Continue => self.send_cmd(Command::Continue).await,
            Action::SpinOrContinue => {
                let cmd = if self.state.awaiting_continue() {
                    Command::Continue
                } else {
                    Command::Spin
                };
                self.send_cmd(cmd).await;
            }

            // ── Pool ──────────────────────────────────────────────────────────
            Action::AddName(label) => self.send_cmd(Command::Add { label }).await,
            Action::DeleteName(label) => self.send_cmd(Command::Delete { label }).await,
            Action::Reset => self.send_cmd(Command::Reset).await,
            Action::ImportFile(path) => self.import_file(path).await,

            // ── Prompt ────────────────────────────────────────────────────────
            Action::OpenPrompt(kind) => {
                self.prompt.open(kind);
                self.state.input_mode = InputMode::Prompt;
            }
            Action::ClosePrompt => {
                self.prompt.close();
                self.state.input_mode = InputMode::Normal;
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            // Handled by the name list in on_action
            Action::SelectUp(_) | Action::SelectDown(_) | Action::SelectFirst | Action::SelectLast => {}

            // ── UI ────────────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::DismissOverlay => self.state.exhausted = false,

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
        }
    }

    async fn import_file(&mut self, path: PathBuf) {
        self.toast
            .spinner(format!("importing {}", path.display()));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                info!("import: read {} bytes from {}", text.len(), path.display());
                self.send_cmd(Command::Import { text }).await;
            }
            Err(e) => {
                error!("import: cannot read {}: {}", path.display(), e);
                self.toast.dismiss_spinner();
                self.toast
                    .error(format!("cannot read {}: {}", path.display(), e));
            }
        }
    }

    async fn send_cmd(&self, cmd: Command) {
        if self.cmd_tx.send(CoreEvent::Command(cmd)).await.is_err() {
            warn!("wheel core is gone, command dropped");
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: body | prompt | keys bar ────────────────────────────
        let prompt_h = if self.prompt.is_active() { 1 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(prompt_h),
                Constraint::Length(1),
            ])
            .split(area);

        // ── Body: wheel | names ───────────────────────────────────────────────
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(outer[0]);
        self.pane_areas.wheel = body[0];
        self.pane_areas.names = body[1];

        let wheel_focused = self.focus.is_focused(self.wheel_panel.id());
        let names_focused = self.focus.is_focused(self.name_list.id());
        self.wheel_panel
            .draw(frame, body[0], wheel_focused, &self.state);
        self.name_list
            .draw(frame, body[1], names_focused, &self.state);

        self.prompt.draw(frame, outer[1]);
        status_bar::draw_keys_bar(frame, outer[2], &self.state);

        // ── Overlays (on top of everything) ──────────────────────────────────
        self.finished_overlay.draw(frame, area, false, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

/// Ring the terminal bell. Failures only cost the sound.
async fn ring_bell() {
    let mut out = tokio::io::stdout();
    let result = async {
        out.write_all(b"\x07").await?;
        out.flush().await
    }
    .await;
    if let Err(e) = result {
        warn!("bell: {}", e);
    }
}
