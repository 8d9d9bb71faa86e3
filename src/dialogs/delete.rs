//! Typed-confirmation delete dialog.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{DialogPhase, DialogStatus};
use crate::client::ResourceClient;
use crate::config::ListingConfig;
use crate::entities::Entity;
use crate::error::{Error, Result};
use crate::listing::Refresh;
use crate::notify::{Notifier, Toast};
use crate::types::EntityId;

#[derive(Debug, Default)]
struct DeleteState {
    status: DialogStatus,
    target: Option<EntityId>,
    confirmation: String,
}

impl DeleteState {
    fn close(&mut self) {
        self.status.close();
        self.target = None;
        self.confirmation.clear();
    }
}

/// Asks the operator to type a confirmation word before deleting a record.
///
/// The destructive button is enabled only while
/// [`ListingConfig::confirms_delete`] accepts the typed text.
///
/// ## Example
///
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::Arc;
/// use folio::prelude::*;
/// use folio::testing::{CountingRefresh, MockBackend, RecordingNotifier};
///
/// let client = Client::with_backend(Arc::new(MockBackend::new()));
/// let dialog = DeleteDialog::new(
///     client.messages(),
///     client.listing_config().clone(),
///     Arc::new(RecordingNotifier::new()),
///     Arc::new(CountingRefresh::new()),
/// );
///
/// dialog.open(EntityId::from("m1"));
/// dialog.set_confirmation("delet");
/// assert!(!dialog.can_submit());
/// dialog.set_confirmation("Delete");
/// assert!(dialog.can_submit());
/// # });
/// ```
pub struct DeleteDialog<E: Entity> {
    client: ResourceClient<E>,
    config: ListingConfig,
    notifier: Arc<dyn Notifier>,
    on_complete: Arc<dyn Refresh>,
    state: Mutex<DeleteState>,
}

impl<E: Entity> std::fmt::Debug for DeleteDialog<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DeleteDialog")
            .field("resource", &E::RESOURCE)
            .field("phase", &state.status.phase)
            .field("target", &state.target)
            .finish_non_exhaustive()
    }
}

impl<E: Entity> DeleteDialog<E> {
    /// Creates a closed dialog. `on_complete` runs after a successful delete.
    pub fn new(
        client: ResourceClient<E>,
        config: ListingConfig,
        notifier: Arc<dyn Notifier>,
        on_complete: Arc<dyn Refresh>,
    ) -> Self {
        Self {
            client,
            config,
            notifier,
            on_complete,
            state: Mutex::new(DeleteState::default()),
        }
    }

    /// Opens the dialog for `id` with an empty confirmation. Ignored while
    /// submitting.
    pub fn open(&self, id: EntityId) {
        let mut state = self.state.lock();
        if state.status.phase == DialogPhase::Submitting {
            tracing::debug!(resource = E::RESOURCE, id = %id, "open ignored while submitting");
            return;
        }
        state.status.open();
        state.target = Some(id);
        state.confirmation.clear();
    }

    /// Closes the dialog, discarding input. Ignored while submitting.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.status.phase != DialogPhase::Submitting {
            state.close();
        }
    }

    /// Replaces the typed confirmation.
    pub fn set_confirmation(&self, input: impl Into<String>) {
        self.state.lock().confirmation = input.into();
    }

    /// Current phase.
    pub fn phase(&self) -> DialogPhase {
        self.state.lock().status.phase
    }

    /// Record the dialog is open for.
    pub fn target(&self) -> Option<EntityId> {
        self.state.lock().target.clone()
    }

    /// Inline error from the last failed submit.
    pub fn error(&self) -> Option<String> {
        self.state.lock().status.error.clone()
    }

    /// Whether the destructive button is enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.state.lock();
        state.status.phase == DialogPhase::Open && self.config.confirms_delete(&state.confirmation)
    }

    /// Sends `DELETE /{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`Validation`](crate::ErrorKind::Validation) without any
    /// request if the dialog is not open or the confirmation does not match.
    /// Backend and transport failures are returned after the dialog went back
    /// to `Open` with an inline error and an error toast was raised.
    pub async fn submit(&self) -> Result<EntityId> {
        let id = {
            let mut state = self.state.lock();
            if state.status.phase == DialogPhase::Open
                && !self.config.confirms_delete(&state.confirmation)
            {
                return Err(Error::validation(format!(
                    "type `{}` to confirm",
                    self.config.delete_confirmation
                )));
            }
            let id = state
                .target
                .clone()
                .ok_or_else(|| Error::validation("dialog is not open"))?;
            state.status.begin_submit()?;
            id
        };

        match self.client.delete(&id).await {
            Ok(deleted) => {
                self.state.lock().close();
                self.notifier
                    .notify(Toast::success(format!("{} deleted successfully", E::LABEL)));
                self.on_complete.refresh().await;
                Ok(deleted)
            }
            Err(err) => {
                self.state.lock().status.fail(err.message());
                self.notifier.notify(Toast::error(err.message()));
                Err(err)
            }
        }
    }
}
