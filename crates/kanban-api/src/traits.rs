use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{
    BoardFilter, CreatedTask, NewTaskPayload, ServerTask, ServerUser, StatusPatch, TaskId,
};

/// Remote task store the board synchronizes against.
///
/// Every non-2xx response is reported as an error; implementations extract
/// the server's message from the body when one is present.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /tasks/` for [`BoardFilter::All`], `GET /tasks/sprint/{id}` otherwise.
    async fn list_tasks(&self, filter: &BoardFilter) -> KanbanResult<Vec<ServerTask>>;

    /// `POST /tasks/`; the server assigns the id.
    async fn create_task(&self, payload: &NewTaskPayload) -> KanbanResult<CreatedTask>;

    /// `PUT /tasks/{id}` with `{ status }`.
    async fn update_status(&self, task_id: TaskId, patch: StatusPatch) -> KanbanResult<()>;

    /// `DELETE /tasks/{id}`.
    async fn delete_task(&self, task_id: TaskId) -> KanbanResult<()>;
}

/// Source of assignee names.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> KanbanResult<Vec<ServerUser>>;
}
