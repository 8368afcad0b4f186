use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::UserDirectory;
use crate::status::{TaskPriority, TaskStatus};

/// Server-assigned task identity.
pub type TaskId = i64;

pub type UserId = i64;

pub type SprintId = i64;

/// A task exactly as the task API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTask {
    pub task_id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub assigned_id: Option<UserId>,
    #[serde(default)]
    pub sprint_id: Option<SprintId>,
    #[serde(default)]
    pub estimate_hours: Option<f64>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaskPayload {
    pub title: String,
    pub sprint_id: SprintId,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub estimate_hours: f64,
    pub due_date: NaiveDate,
    pub assigned_id: Option<UserId>,
}

impl NewTaskPayload {
    pub fn into_server_task(self, task_id: TaskId) -> ServerTask {
        ServerTask {
            task_id,
            title: self.title,
            status: self.status,
            priority: self.priority,
            assigned_id: self.assigned_id,
            sprint_id: Some(self.sprint_id),
            estimate_hours: Some(self.estimate_hours),
            due_date: Some(self.due_date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Body of `PUT /tasks/{id}` for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    pub task_id: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerUser {
    pub user_id: UserId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Display-ready task, derived from [`ServerTask`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiTask {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: String,
    pub due: String,
    pub project_id: String,
}

impl UiTask {
    pub fn from_server(task: &ServerTask, directory: &UserDirectory) -> Self {
        Self {
            id: task.task_id,
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            assignee: directory.display_name(task.assigned_id),
            due: format_due(task.due_date.as_deref()),
            project_id: task.sprint_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    pub fn dom_id(&self) -> String {
        dom_id(self.id)
    }
}

pub fn dom_id(task_id: TaskId) -> String {
    format!("task-{}", task_id)
}

/// Short month/day form ("Dec 5"), or "TBD" when no date is set.
///
/// Accepts plain dates and datetime strings; anything unparseable is shown as sent.
pub fn format_due(due_date: Option<&str>) -> String {
    let Some(raw) = due_date.map(str::trim).filter(|d| !d.is_empty()) else {
        return "TBD".to_string();
    };
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d").to_string(),
        Err(_) => raw.to_string(),
    }
}
