//! Create, status-update, and delete against the task API, reconciled with
//! the board surface.
//!
//! Status changes are optimistic: the drag controller has already moved the
//! card, and this engine only ever corrects that move. Creates are
//! server-authoritative: no card exists until the server has assigned an id.

use kanban_api::TaskApi;
use kanban_core::{AppConfig, Confirm, KanbanError, KanbanResult, Notifier};
use kanban_domain::{QuickTaskForm, SprintId, StatusPatch, TaskId, TaskStatus, UiTask};
use serde::Serialize;
use std::sync::Arc;

use crate::drag::PendingMove;
use crate::loader::SharedDirectory;
use crate::renderer::CardRenderer;
use crate::surface::{DeleteRequest, SharedSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    pub default_sprint_id: SprintId,
}

impl SyncSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_sprint_id: config.effective_default_sprint_id(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CreateOutcome {
    Rendered { task_id: TaskId, dom_id: String },
    /// Created for a project the active filter does not show.
    Hidden { task_id: TaskId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MoveResolution {
    Persisted,
    RolledBack {
        restored_to: TaskStatus,
        message: String,
    },
    /// A newer request for the same card superseded this one.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted { task_id: TaskId },
    Cancelled,
}

pub struct TaskSyncEngine {
    api: Arc<dyn TaskApi>,
    surface: SharedSurface,
    directory: SharedDirectory,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    renderer: CardRenderer,
    settings: SyncSettings,
}

impl TaskSyncEngine {
    pub fn new(
        api: Arc<dyn TaskApi>,
        surface: SharedSurface,
        directory: SharedDirectory,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            api,
            surface,
            directory,
            notifier,
            confirm,
            renderer: CardRenderer::new(),
            settings,
        }
    }

    pub async fn create(&self, form: QuickTaskForm) -> KanbanResult<CreateOutcome> {
        let filter = self.surface.lock().active_filter().clone();
        let validated = {
            let directory = self.directory.read();
            form.validate(&directory, &filter, self.settings.default_sprint_id)
        };
        let payload = match validated {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(field = e.field(), error = %e, "quick-add rejected");
                self.notifier.alert(&e.to_string());
                return Err(e.into());
            }
        };

        let created = match self.api.create_task(&payload).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(error = %e, title = %payload.title, "task creation failed");
                self.notifier
                    .alert(&format!("Error creating task: {}", e.user_message()));
                return Err(e);
            }
        };

        let task_id = created.task_id;
        let server_task = payload.into_server_task(task_id);
        let ui = UiTask::from_server(&server_task, &self.directory.read());

        let outcome = {
            let mut surface = self.surface.lock();
            if !surface.active_filter().admits(&ui.project_id) {
                tracing::info!(task_id, project = %ui.project_id, "created task hidden by filter");
                CreateOutcome::Hidden { task_id }
            } else {
                let dom_id = ui.dom_id();
                if let Err(e) = self.renderer.render_into(&mut surface, &ui) {
                    // A concurrent load already rendered the card.
                    tracing::debug!(task_id, error = %e, "created card already on board");
                }
                surface.recompute_counts();
                CreateOutcome::Rendered { task_id, dom_id }
            }
        };

        tracing::info!(task_id, "task created");
        self.notifier
            .success(&format!("Task created successfully! (ID: {})", task_id));
        Ok(outcome)
    }

    /// Persists a move made by the drag controller, rolling it back on failure.
    pub async fn update_status(&self, pending: PendingMove) -> MoveResolution {
        let PendingMove {
            task_id,
            from,
            to,
            token,
        } = pending;
        tracing::info!(task_id, from = %from, to = %to, "updating task status");

        let result = self
            .api
            .update_status(task_id, StatusPatch { status: to })
            .await;

        let mut surface = self.surface.lock();
        if !surface.is_pending(task_id, token) {
            tracing::debug!(task_id, token, "discarding stale status response");
            return MoveResolution::Stale;
        }

        match result {
            Ok(()) => {
                let _ = surface.settle_pending(task_id);
                drop(surface);
                self.notifier
                    .success(&format!("Task WI-{} moved to {}", task_id, to));
                MoveResolution::Persisted
            }
            Err(e) => {
                if let Err(move_err) = surface.move_card(task_id, from) {
                    tracing::error!(task_id, error = %move_err, "rollback failed");
                }
                surface.recompute_counts();
                let _ = surface.settle_pending(task_id);
                drop(surface);

                let message = format!(
                    "Failed to move task WI-{} to {}: {}. It was moved back to {}.",
                    task_id,
                    to,
                    e.user_message(),
                    from
                );
                tracing::error!(task_id, error = %e, "status update failed, rolled back");
                self.notifier.alert(&message);
                MoveResolution::RolledBack {
                    restored_to: from,
                    message,
                }
            }
        }
    }

    pub async fn delete(&self, request: DeleteRequest) -> KanbanResult<DeleteOutcome> {
        let DeleteRequest { task_id, title } = request;
        if !self
            .confirm
            .confirm(&format!("Delete task \"{}\"? This cannot be undone.", title))
        {
            tracing::debug!(task_id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.surface.lock().begin_removal(task_id)?;

        match self.api.delete_task(task_id).await {
            Ok(()) => {
                {
                    let mut surface = self.surface.lock();
                    match surface.remove_card(task_id) {
                        Ok(_) => {}
                        Err(KanbanError::NotFound(_)) => {
                            tracing::debug!(task_id, "deleted card already gone from board")
                        }
                        Err(e) => return Err(e),
                    }
                    surface.recompute_counts();
                }
                tracing::info!(task_id, "task deleted");
                self.notifier
                    .success(&format!("Task \"{}\" deleted", title));
                Ok(DeleteOutcome::Deleted { task_id })
            }
            Err(e) => {
                {
                    let mut surface = self.surface.lock();
                    if surface.card(task_id).is_some() {
                        let _ = surface.abort_removal(task_id);
                    }
                }
                tracing::error!(task_id, error = %e, "task deletion failed");
                self.notifier
                    .alert(&format!("Failed to delete task: {}", e.user_message()));
                Err(e)
            }
        }
    }
}
