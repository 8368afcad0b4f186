use kanban_api::{TaskApi, UserApi};
use kanban_core::{Confirm, KanbanError, KanbanResult, Notifier};
use kanban_domain::{BoardFilter, QuickTaskForm, TaskId, TaskStatus, UserDirectory};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::drag::{DragController, DropOutcome};
use crate::engine::{CreateOutcome, DeleteOutcome, MoveResolution, SyncSettings, TaskSyncEngine};
use crate::loader::{BoardLoader, LoadReport, SharedDirectory};
use crate::surface::{BoardSurface, SharedSurface};

/// Event bindings for one kanban board page.
///
/// Synchronous handlers (`drag_*`, `drop_on`) mirror the page's drag events and
/// apply their surface changes immediately; the async ones talk to the API.
pub struct BoardPage {
    surface: SharedSurface,
    directory: SharedDirectory,
    drag: Mutex<DragController>,
    users: Arc<dyn UserApi>,
    loader: BoardLoader,
    engine: TaskSyncEngine,
}

impl BoardPage {
    pub fn new(
        tasks: Arc<dyn TaskApi>,
        users: Arc<dyn UserApi>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        settings: SyncSettings,
    ) -> Self {
        let surface = BoardSurface::new().shared();
        let directory: SharedDirectory = Arc::new(RwLock::new(UserDirectory::new()));
        let loader = BoardLoader::new(tasks.clone(), surface.clone(), directory.clone());
        let engine = TaskSyncEngine::new(
            tasks,
            surface.clone(),
            directory.clone(),
            notifier,
            confirm,
            settings,
        );
        Self {
            surface,
            directory,
            drag: Mutex::new(DragController::new()),
            users,
            loader,
            engine,
        }
    }

    pub fn surface(&self) -> SharedSurface {
        self.surface.clone()
    }

    pub fn snapshot(&self) -> BoardSurface {
        self.surface.lock().clone()
    }

    pub fn engine(&self) -> &TaskSyncEngine {
        &self.engine
    }

    /// Refreshes the assignee directory, then loads the board.
    pub async fn open(&self, filter: BoardFilter) -> LoadReport {
        self.refresh_directory().await;
        self.loader.load(filter).await
    }

    /// Returns `false` when the directory could not be fetched; names then fall back to ids.
    pub async fn refresh_directory(&self) -> bool {
        match self.users.list_users().await {
            Ok(users) => {
                let directory = UserDirectory::from_users(&users);
                tracing::debug!(users = directory.len(), "assignee directory refreshed");
                self.directory.write().replace(directory);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load users");
                false
            }
        }
    }

    pub async fn change_filter(&self, filter: BoardFilter) -> LoadReport {
        tracing::info!(%filter, "changing board filter");
        self.loader.load(filter).await
    }

    pub fn drag_start(&self, task_id: TaskId) -> KanbanResult<()> {
        self.drag.lock().begin(&mut self.surface.lock(), task_id)
    }

    pub fn drag_over(&self, column: TaskStatus) -> bool {
        self.drag.lock().over(&mut self.surface.lock(), column)
    }

    pub fn drag_leave(&self, column: TaskStatus) {
        self.drag.lock().leave(&mut self.surface.lock(), column)
    }

    pub fn drop_on(&self, column: TaskStatus) -> KanbanResult<DropOutcome> {
        self.drag.lock().drop_on(&mut self.surface.lock(), column)
    }

    pub fn drag_end(&self) {
        self.drag.lock().end(&mut self.surface.lock())
    }

    /// Persists a drop; `None` when the drop needed no server call.
    pub async fn sync_drop(&self, outcome: DropOutcome) -> Option<MoveResolution> {
        match outcome {
            DropOutcome::Moved(pending) => Some(self.engine.update_status(pending).await),
            DropOutcome::SameColumn | DropOutcome::Ignored => None,
        }
    }

    /// Runs a whole drag gesture for `task_id` onto `column`.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        column: TaskStatus,
    ) -> KanbanResult<Option<MoveResolution>> {
        self.drag_start(task_id)?;
        self.drag_over(column);
        let outcome = self.drop_on(column);
        self.drag_end();
        Ok(self.sync_drop(outcome?).await)
    }

    pub async fn submit_quick_add(&self, form: QuickTaskForm) -> KanbanResult<CreateOutcome> {
        self.engine.create(form).await
    }

    /// Activates the card's delete affordance.
    pub async fn activate_delete(&self, task_id: TaskId) -> KanbanResult<DeleteOutcome> {
        let request = self
            .surface
            .lock()
            .card(task_id)
            .and_then(|card| card.activate_delete())
            .ok_or_else(|| {
                KanbanError::NotFound(format!("task {} is not on the board", task_id))
            })?;
        self.engine.delete(request).await
    }
}
