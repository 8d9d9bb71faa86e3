//! Confirmation and edit dialogs wrapping a single mutation.
//!
//! Both dialogs move `Closed → Open → Submitting → Closed`. A failed submit
//! goes back to `Open` with an inline error and can be retried.

mod delete;
mod edit;

pub use delete::DeleteDialog;
pub use edit::EditDialog;

use crate::error::{Error, Result};

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogPhase {
    /// Not shown.
    #[default]
    Closed,
    /// Shown and accepting input.
    Open,
    /// Request in flight; input and submit are disabled.
    Submitting,
}

/// Phase plus inline error, shared by both dialogs.
#[derive(Debug, Default)]
struct DialogStatus {
    phase: DialogPhase,
    error: Option<String>,
}

impl DialogStatus {
    fn open(&mut self) {
        self.phase = DialogPhase::Open;
        self.error = None;
    }

    fn close(&mut self) {
        self.phase = DialogPhase::Closed;
        self.error = None;
    }

    /// Moves `Open → Submitting`, refusing from any other phase.
    fn begin_submit(&mut self) -> Result<()> {
        match self.phase {
            DialogPhase::Open => {
                self.phase = DialogPhase::Submitting;
                self.error = None;
                Ok(())
            }
            DialogPhase::Submitting => Err(Error::validation("a submission is already in flight")),
            DialogPhase::Closed => Err(Error::validation("dialog is not open")),
        }
    }

    fn fail(&mut self, message: &str) {
        self.phase = DialogPhase::Open;
        self.error = Some(message.to_string());
    }
}
