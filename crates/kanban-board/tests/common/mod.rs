#![allow(dead_code)]

use async_trait::async_trait;
use kanban_api::{TaskApi, UserApi};
use kanban_core::{Confirm, KanbanError, KanbanResult, Notifier};
use kanban_domain::{
    BoardFilter, CreatedTask, NewTaskPayload, ServerTask, ServerUser, StatusPatch, TaskId,
    TaskPriority, TaskStatus,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::oneshot;

/// One canned reply, optionally held back until its gate is released.
pub struct Reply<T> {
    result: KanbanResult<T>,
    gate: Option<oneshot::Receiver<()>>,
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            gate: None,
        }
    }

    pub fn err(error: KanbanError) -> Self {
        Self {
            result: Err(error),
            gate: None,
        }
    }

    /// Returns the reply together with the sender that releases it.
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Some(rx),
                ..self
            },
            tx,
        )
    }

    async fn resolve(self) -> KanbanResult<T> {
        if let Some(gate) = self.gate {
            let _ = gate.await;
        }
        self.result
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(BoardFilter),
    Create(NewTaskPayload),
    Update(TaskId, TaskStatus),
    Delete(TaskId),
    Users,
}

/// Task and user API that replays scripted replies in call order.
#[derive(Default)]
pub struct ScriptedApi {
    lists: Mutex<VecDeque<Reply<Vec<ServerTask>>>>,
    creates: Mutex<VecDeque<Reply<CreatedTask>>>,
    updates: Mutex<VecDeque<Reply<()>>>,
    deletes: Mutex<VecDeque<Reply<()>>>,
    users: Mutex<Vec<ServerUser>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list(&self, reply: Reply<Vec<ServerTask>>) {
        self.lists.lock().push_back(reply);
    }

    pub fn push_create(&self, reply: Reply<CreatedTask>) {
        self.creates.lock().push_back(reply);
    }

    pub fn push_update(&self, reply: Reply<()>) {
        self.updates.lock().push_back(reply);
    }

    pub fn push_delete(&self, reply: Reply<()>) {
        self.deletes.lock().push_back(reply);
    }

    pub fn set_users(&self, users: Vec<ServerUser>) {
        *self.users.lock() = users;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn update_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Update(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

fn unscripted(what: &str) -> KanbanError {
    KanbanError::Internal(format!("no scripted reply for {}", what))
}

#[async_trait]
impl TaskApi for ScriptedApi {
    async fn list_tasks(&self, filter: &BoardFilter) -> KanbanResult<Vec<ServerTask>> {
        self.record(Call::List(filter.clone()));
        let reply = self.lists.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(unscripted("list_tasks")),
        }
    }

    async fn create_task(&self, payload: &NewTaskPayload) -> KanbanResult<CreatedTask> {
        self.record(Call::Create(payload.clone()));
        let reply = self.creates.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(unscripted("create_task")),
        }
    }

    async fn update_status(&self, task_id: TaskId, patch: StatusPatch) -> KanbanResult<()> {
        self.record(Call::Update(task_id, patch.status));
        let reply = self.updates.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(unscripted("update_status")),
        }
    }

    async fn delete_task(&self, task_id: TaskId) -> KanbanResult<()> {
        self.record(Call::Delete(task_id));
        let reply = self.deletes.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(unscripted("delete_task")),
        }
    }
}

#[async_trait]
impl UserApi for ScriptedApi {
    async fn list_users(&self) -> KanbanResult<Vec<ServerUser>> {
        self.record(Call::Users);
        Ok(self.users.lock().clone())
    }
}

/// Collects every notice and answers confirmations with a fixed reply.
pub struct RecordingFeedback {
    successes: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
    questions: Mutex<Vec<String>>,
    answer: bool,
}

impl RecordingFeedback {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            successes: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
            answer,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().clone()
    }
}

impl Notifier for RecordingFeedback {
    fn success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

impl Confirm for RecordingFeedback {
    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().push(question.to_string());
        self.answer
    }
}

pub fn server_task(id: TaskId, status: &str, sprint: i64) -> ServerTask {
    ServerTask {
        task_id: id,
        title: format!("Task {}", id),
        status: TaskStatus::from_code(status),
        priority: TaskPriority::Medium,
        assigned_id: Some(1),
        sprint_id: Some(sprint),
        estimate_hours: Some(3.0),
        due_date: Some("2025-12-05".to_string()),
    }
}

pub fn users() -> Vec<ServerUser> {
    vec![
        ServerUser {
            user_id: 1,
            name: Some("Alice J.".to_string()),
        },
        ServerUser {
            user_id: 2,
            name: Some("Bob S.".to_string()),
        },
    ]
}
