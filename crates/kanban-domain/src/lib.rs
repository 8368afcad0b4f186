pub mod card;
pub mod directory;
pub mod filter;
pub mod form;
pub mod status;
pub mod task;

pub use card::{CardView, PriorityBadge};
pub use directory::UserDirectory;
pub use filter::BoardFilter;
pub use form::{FormError, QuickTaskForm};
pub use status::{priority_to_backend, priority_to_ui, to_backend, to_ui, TaskPriority, TaskStatus};
pub use task::{
    dom_id, format_due, CreatedTask, NewTaskPayload, ServerTask, ServerUser, SprintId,
    StatusPatch, TaskId, UiTask, UserId,
};
