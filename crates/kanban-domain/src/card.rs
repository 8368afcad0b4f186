use serde::Serialize;

use crate::status::{TaskPriority, TaskStatus};
use crate::task::{TaskId, UiTask};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityBadge {
    pub label: &'static str,
    pub class: &'static str,
    pub icon: &'static str,
}

impl PriorityBadge {
    pub fn for_priority(priority: TaskPriority) -> Self {
        let (class, icon) = match priority {
            TaskPriority::Low => ("priority-low", "fa-arrow-down"),
            TaskPriority::Medium => ("priority-medium", "fa-equals"),
            TaskPriority::High => ("priority-high", "fa-arrow-up"),
        };
        Self {
            label: priority.label(),
            class,
            icon,
        }
    }
}

/// Typed view-model for one task card. Carries no interaction state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub task_id: TaskId,
    pub dom_id: String,
    pub reference: String,
    pub title: String,
    pub status: TaskStatus,
    pub badge: PriorityBadge,
    pub assignee: String,
    pub due: String,
    pub project_id: String,
}

impl CardView {
    pub fn build(task: &UiTask) -> Self {
        let reference = if task.project_id.is_empty() {
            format!("WI-{}", task.id)
        } else {
            format!("WI-{} (P-{})", task.id, task.project_id)
        };
        Self {
            task_id: task.id,
            dom_id: task.dom_id(),
            reference,
            title: task.title.clone(),
            status: task.status,
            badge: PriorityBadge::for_priority(task.priority),
            assignee: task.assignee.clone(),
            due: task.due.clone(),
            project_id: task.project_id.clone(),
        }
    }
}
