//! Quick-add form and its client-side validation.

use chrono::NaiveDate;
use kanban_core::KanbanError;
use thiserror::Error;

use crate::directory::UserDirectory;
use crate::filter::BoardFilter;
use crate::status::{TaskPriority, TaskStatus};
use crate::task::{NewTaskPayload, SprintId};

/// Raw values as entered in the quick-add form. Labels are UI labels.
#[derive(Debug, Clone, Default)]
pub struct QuickTaskForm {
    pub title: String,
    pub assignee: Option<String>,
    pub priority: String,
    pub status: String,
    pub estimate_hours: Option<f64>,
    pub due_date: Option<NaiveDate>,
    /// Explicit sprint; otherwise derived from the active filter.
    pub sprint_id: Option<SprintId>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please enter a title for the task")]
    MissingTitle,
    #[error("Please choose a due date for the task")]
    MissingDueDate,
    #[error("Please enter an estimate for the task")]
    MissingEstimate,
    #[error("Estimate must be greater than zero hours (got {0})")]
    NonPositiveEstimate(f64),
    #[error("Filter '{0}' is not a valid sprint id")]
    InvalidSprint(String),
}

impl FormError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingTitle => "title",
            Self::MissingDueDate => "due_date",
            Self::MissingEstimate | Self::NonPositiveEstimate(_) => "estimate_hours",
            Self::InvalidSprint(_) => "sprint_id",
        }
    }
}

impl From<FormError> for KanbanError {
    fn from(err: FormError) -> Self {
        KanbanError::Validation(err.to_string())
    }
}

impl QuickTaskForm {
    pub fn chosen_status(&self) -> TaskStatus {
        TaskStatus::from_label(&self.status)
    }

    /// Checks the required fields in form order and builds the create payload.
    pub fn validate(
        &self,
        directory: &UserDirectory,
        filter: &BoardFilter,
        default_sprint_id: SprintId,
    ) -> Result<NewTaskPayload, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let due_date = self.due_date.ok_or(FormError::MissingDueDate)?;

        let estimate_hours = self.estimate_hours.ok_or(FormError::MissingEstimate)?;
        if !estimate_hours.is_finite() || estimate_hours <= 0.0 {
            return Err(FormError::NonPositiveEstimate(estimate_hours));
        }

        let sprint_id = match (self.sprint_id, filter.scope_id()) {
            (Some(id), _) => id,
            (None, Some(scope)) => scope
                .parse()
                .map_err(|_| FormError::InvalidSprint(scope.to_string()))?,
            (None, None) => default_sprint_id,
        };

        let assigned_id = self.assignee.as_deref().and_then(|a| directory.id_for(a));

        Ok(NewTaskPayload {
            title: title.to_string(),
            sprint_id,
            status: self.chosen_status(),
            priority: TaskPriority::from_label(&self.priority),
            estimate_hours,
            due_date,
            assigned_id,
        })
    }
}
