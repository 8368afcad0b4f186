//! Drag-and-drop gesture tracking.
//!
//! The controller owns the "currently dragged card" and applies the
//! optimistic column move on drop. Persisting the move is left to
//! [`crate::TaskSyncEngine`], which receives the returned [`PendingMove`].

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{TaskId, TaskStatus};
use serde::Serialize;

use crate::surface::BoardSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { task_id: TaskId },
    /// Dropped, waiting for the drag-end event.
    Dropped { task_id: TaskId },
}

/// Everything needed to persist, or undo, an optimistic column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub token: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged, or the card is gone or being deleted.
    Ignored,
    SameColumn,
    Moved(PendingMove),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging { task_id } => Some(task_id),
            _ => None,
        }
    }

    /// Refused for a card that is being deleted.
    pub fn begin(&mut self, surface: &mut BoardSurface, task_id: TaskId) -> KanbanResult<()> {
        self.end(surface);
        if surface.card(task_id).is_some_and(|card| card.sync().is_removing()) {
            return Err(KanbanError::Validation(format!(
                "card task-{} is being deleted",
                task_id
            )));
        }
        surface.set_dragging(task_id, true)?;
        self.state = DragState::Dragging { task_id };
        tracing::trace!(task_id, "drag started");
        Ok(())
    }

    /// Returns whether a drop on `column` is permitted, marking it as a target if so.
    pub fn over(&self, surface: &mut BoardSurface, column: TaskStatus) -> bool {
        let Some(task_id) = self.dragged() else {
            return false;
        };
        let permitted = !surface.column(column).contains(task_id);
        if permitted {
            surface.set_drop_target(column, true);
        }
        permitted
    }

    pub fn leave(&self, surface: &mut BoardSurface, column: TaskStatus) {
        surface.set_drop_target(column, false);
    }

    /// Moves the dragged card into `column` before anything is sent to the server.
    pub fn drop_on(
        &mut self,
        surface: &mut BoardSurface,
        column: TaskStatus,
    ) -> KanbanResult<DropOutcome> {
        surface.set_drop_target(column, false);

        let Some(task_id) = self.dragged() else {
            return Ok(DropOutcome::Ignored);
        };
        let Some(from) = surface.locate(task_id) else {
            tracing::debug!(task_id, "dragged card left the board before drop");
            return Ok(DropOutcome::Ignored);
        };

        self.state = DragState::Dropped { task_id };
        if surface.card(task_id).is_some_and(|card| card.sync().is_removing()) {
            tracing::debug!(task_id, "card deleted mid-drag, ignoring drop");
            return Ok(DropOutcome::Ignored);
        }
        if from == column {
            return Ok(DropOutcome::SameColumn);
        }

        surface.move_card(task_id, column)?;
        surface.recompute_counts();
        let token = surface.begin_pending(task_id, from)?;
        tracing::info!(task_id, from = %from, to = %column, "card moved optimistically");

        Ok(DropOutcome::Moved(PendingMove {
            task_id,
            from,
            to: column,
            token,
        }))
    }

    /// Clears the dragging mark and the dragged reference, whatever happened.
    pub fn end(&mut self, surface: &mut BoardSurface) {
        let task_id = match self.state {
            DragState::Dragging { task_id } | DragState::Dropped { task_id } => Some(task_id),
            DragState::Idle => None,
        };
        if let Some(task_id) = task_id {
            // The card may have been removed meanwhile.
            let _ = surface.set_dragging(task_id, false);
        }
        self.state = DragState::Idle;
    }
}
