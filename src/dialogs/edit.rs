//! Edit dialog holding a typed patch draft.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use validator::Validate;

use super::{DialogPhase, DialogStatus};
use crate::client::ResourceClient;
use crate::entities::Entity;
use crate::error::{Error, Result};
use crate::listing::Refresh;
use crate::notify::{Notifier, Toast};
use crate::types::EntityId;

struct EditState<P> {
    status: DialogStatus,
    target: Option<EntityId>,
    draft: Option<P>,
}

impl<P> Default for EditState<P> {
    fn default() -> Self {
        Self {
            status: DialogStatus::default(),
            target: None,
            draft: None,
        }
    }
}

impl<P> EditState<P> {
    fn close(&mut self) {
        self.status.close();
        self.target = None;
        self.draft = None;
    }
}

/// Edits one record through a partial update.
///
/// The draft is validated before any request; a draft that fails validation
/// keeps the dialog open with the validation message inline.
pub struct EditDialog<E: Entity, P> {
    client: ResourceClient<E>,
    notifier: Arc<dyn Notifier>,
    on_complete: Arc<dyn Refresh>,
    state: Mutex<EditState<P>>,
}

impl<E: Entity, P> std::fmt::Debug for EditDialog<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EditDialog")
            .field("resource", &E::RESOURCE)
            .field("phase", &state.status.phase)
            .field("target", &state.target)
            .finish_non_exhaustive()
    }
}

impl<E, P> EditDialog<E, P>
where
    E: Entity,
    P: Serialize + Validate + Clone + Send + Sync,
{
    /// Creates a closed dialog. `on_complete` runs after a successful save.
    pub fn new(
        client: ResourceClient<E>,
        notifier: Arc<dyn Notifier>,
        on_complete: Arc<dyn Refresh>,
    ) -> Self {
        Self {
            client,
            notifier,
            on_complete,
            state: Mutex::new(EditState::default()),
        }
    }

    /// Opens the dialog for `id` starting from `draft`. Ignored while
    /// submitting.
    pub fn open(&self, id: EntityId, draft: P) {
        let mut state = self.state.lock();
        if state.status.phase == DialogPhase::Submitting {
            tracing::debug!(resource = E::RESOURCE, id = %id, "open ignored while submitting");
            return;
        }
        state.status.open();
        state.target = Some(id);
        state.draft = Some(draft);
    }

    /// Closes the dialog, discarding the draft. Ignored while submitting.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.status.phase != DialogPhase::Submitting {
            state.close();
        }
    }

    /// Edits the draft in place. Ignored unless the dialog is open.
    pub fn update_draft(&self, f: impl FnOnce(&mut P)) {
        let mut state = self.state.lock();
        if state.status.phase == DialogPhase::Open
            && let Some(draft) = state.draft.as_mut()
        {
            f(draft);
        }
    }

    /// A copy of the current draft.
    pub fn draft(&self) -> Option<P> {
        self.state.lock().draft.clone()
    }

    /// Current phase.
    pub fn phase(&self) -> DialogPhase {
        self.state.lock().status.phase
    }

    /// Inline error from the last failed submit.
    pub fn error(&self) -> Option<String> {
        self.state.lock().status.error.clone()
    }

    /// Whether the save button is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase() == DialogPhase::Open
    }

    /// Validates the draft, then sends `PATCH /{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`Validation`](crate::ErrorKind::Validation) without any
    /// request if the dialog is not open or the draft is invalid. Every
    /// failure other than a closed dialog leaves the dialog `Open` with an
    /// inline error and raises an error toast.
    pub async fn submit(&self) -> Result<E> {
        let (id, draft) = {
            let mut state = self.state.lock();
            let (Some(id), Some(draft)) = (state.target.clone(), state.draft.clone()) else {
                return Err(Error::validation("dialog is not open"));
            };
            if state.status.phase == DialogPhase::Open
                && let Err(errors) = draft.validate()
            {
                let err = Error::from(errors);
                state.status.fail(err.message());
                drop(state);
                self.notifier.notify(Toast::error(err.message()));
                return Err(err);
            }
            state.status.begin_submit()?;
            (id, draft)
        };

        match self.client.patch(&id, &draft).await {
            Ok(updated) => {
                self.state.lock().close();
                self.notifier
                    .notify(Toast::success(format!("{} updated successfully", E::LABEL)));
                self.on_complete.refresh().await;
                Ok(updated)
            }
            Err(err) => {
                self.state.lock().status.fail(err.message());
                self.notifier.notify(Toast::error(err.message()));
                Err(err)
            }
        }
    }
}
