//! Loading-State Presenter
//!
//! Toggles a triggering control between idle and busy.

/// Text shown on a control while its operation is in flight
pub const BUSY_LABEL: &str = "Working";

/// Glyph rendered next to [`BUSY_LABEL`]
pub const SPINNER_GLYPH: &str = "⟳";

/// Visible state of a triggering control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    Idle(String),
    Busy,
}

impl ControlState {
    pub fn idle(label: impl Into<String>) -> Self {
        ControlState::Idle(label.into())
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ControlState::Busy)
    }

    /// Disabled while busy
    pub fn disabled(&self) -> bool {
        self.is_busy()
    }

    pub fn label(&self) -> &str {
        match self {
            ControlState::Idle(label) => label,
            ControlState::Busy => BUSY_LABEL,
        }
    }
}

/// Presentation side effects around one operation. No failure mode.
pub trait LoadingPresenter {
    type Control;

    /// Disable the control and show the working indicator
    fn show_busy(&self, control: &Self::Control);

    /// Re-enable the control with `label`
    fn restore_idle(&self, control: &Self::Control, label: &str);
}
