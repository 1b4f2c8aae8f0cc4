//! Action enum: all user-initiated intents and internal events.

use std::path::PathBuf;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Wheel,
    NameList,
    HelpOverlay,
    FinishedOverlay,
}

/// Which one-line prompt is open at the bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddName,
    ImportFile,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Wheel ────────────────────────────────────────────────────────────────
    /// Acknowledge a revealed winner (deferred removal only).
    Continue,
    /// Space/Enter: continue when a winner is waiting, spin otherwise.
    SpinOrContinue,

    // ── Pool ─────────────────────────────────────────────────────────────────
    AddName(String),
    DeleteName(String),
    Reset,
    ImportFile(PathBuf),

    // ── Prompt ───────────────────────────────────────────────────────────────
    OpenPrompt(PromptKind),
    ClosePrompt,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    DismissOverlay,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
