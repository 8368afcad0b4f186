use kanban_api::TaskApi;
use kanban_domain::{BoardFilter, UiTask, UserDirectory};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::renderer::CardRenderer;
use crate::surface::SharedSurface;

pub type SharedDirectory = Arc<RwLock<UserDirectory>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LoadReport {
    Loaded { cards: usize, skipped: usize },
    /// The fetch failed; the board is left empty.
    Failed,
    /// A newer load started before this one finished.
    Superseded,
}

pub struct BoardLoader {
    api: Arc<dyn TaskApi>,
    surface: SharedSurface,
    directory: SharedDirectory,
    renderer: CardRenderer,
}

impl BoardLoader {
    pub fn new(api: Arc<dyn TaskApi>, surface: SharedSurface, directory: SharedDirectory) -> Self {
        Self {
            api,
            surface,
            directory,
            renderer: CardRenderer::new(),
        }
    }

    /// Replaces the visible set with the tasks under `filter`.
    ///
    /// Failures are logged, never alerted: an empty board is a valid state.
    pub async fn load(&self, filter: BoardFilter) -> LoadReport {
        let ticket = self.surface.lock().begin_load(filter.clone());
        tracing::debug!(%filter, "loading board");

        let result = self.api.list_tasks(&filter).await;

        let tasks: Vec<UiTask> = match result {
            Ok(tasks) => {
                let directory = self.directory.read();
                tasks
                    .iter()
                    .map(|t| UiTask::from_server(t, &directory))
                    .collect()
            }
            Err(e) => {
                let mut surface = self.surface.lock();
                if !surface.is_current(ticket) {
                    return LoadReport::Superseded;
                }
                tracing::warn!(%filter, error = %e, "failed to load tasks");
                surface.recompute_counts();
                return LoadReport::Failed;
            }
        };

        let mut surface = self.surface.lock();
        if !surface.is_current(ticket) {
            tracing::debug!(%filter, "discarding superseded board load");
            return LoadReport::Superseded;
        }

        surface.clear();
        let mut skipped = 0;
        for task in &tasks {
            if !filter.admits(&task.project_id) {
                tracing::debug!(task_id = task.id, %filter, "skipping task outside filter");
                skipped += 1;
                continue;
            }
            if let Err(e) = self.renderer.render_into(&mut surface, task) {
                tracing::warn!(task_id = task.id, error = %e, "skipping duplicate task");
                skipped += 1;
            }
        }
        surface.recompute_counts();

        let cards = surface.card_count();
        tracing::info!(%filter, cards, skipped, "board loaded");
        LoadReport::Loaded { cards, skipped }
    }
}
