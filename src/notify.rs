//! User-facing notifications (toasts).

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

/// A transient message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Display message.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

impl Toast {
    /// A success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    /// An error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }

    /// An informational toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
        }
    }
}

/// Receives toasts raised by row actions and dialogs.
///
/// The host decides how to show them; implementations must not block.
pub trait Notifier: Send + Sync {
    /// Shows `toast`.
    fn notify(&self, toast: Toast);
}

/// A [`Notifier`] that writes toasts to the log.
///
/// Useful for headless tools and as a default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => tracing::warn!(message = %toast.message, "toast"),
            ToastKind::Success | ToastKind::Info => {
                tracing::info!(message = %toast.message, "toast")
            }
        }
    }
}
