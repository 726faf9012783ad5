//! Runtime-agnostic input event types.
//!
//! Both the native (crossterm) and web (ratzilla) runtimes convert their
//! platform events into these types before calling the shared reducer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKeyCode {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Enter,
    Esc,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
}

/// A keyboard press. Releases are filtered out by the runtime adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppKeyEvent {
    pub code: AppKeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl AppKeyEvent {
    pub fn new(code: AppKeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub fn with_ctrl(code: AppKeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::new(code)
        }
    }

    pub fn with_shift(code: AppKeyCode) -> Self {
        Self {
            shift: true,
            ..Self::new(code)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMouseKind {
    LeftDown,
    ScrollUp,
    ScrollDown,
}

/// A mouse event in terminal cell coordinates.
///
/// Pixel to cell conversion belongs to the runtime adapter, never to the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppMouseEvent {
    pub kind: AppMouseKind,
    pub column: u16,
    pub row: u16,
}

impl AppMouseEvent {
    pub fn new(kind: AppMouseKind, column: u16, row: u16) -> Self {
        Self { kind, column, row }
    }
}
