use async_trait::async_trait;
use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::{
    BoardFilter, CreatedTask, NewTaskPayload, ServerTask, ServerUser, StatusPatch, TaskId,
};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::response::error_from_body;
use crate::traits::{TaskApi, UserApi};

/// URL layout of the task API under a base such as `http://host/api/v1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn tasks(&self) -> String {
        format!("{}/tasks/", self.base)
    }

    pub fn tasks_for(&self, filter: &BoardFilter) -> String {
        match filter.scope_id() {
            None => self.tasks(),
            Some(id) => format!("{}/tasks/sprint/{}", self.base, id),
        }
    }

    pub fn task(&self, task_id: TaskId) -> String {
        format!("{}/tasks/{}", self.base, task_id)
    }

    pub fn users(&self) -> String {
        format!("{}/users/", self.base)
    }
}

pub struct HttpTaskApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints: Endpoints::new(base_url),
        }
    }

    pub fn from_config(config: &AppConfig) -> KanbanResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| KanbanError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoints: Endpoints::new(config.effective_api_base_url()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> KanbanResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| KanbanError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "task API returned failure");
        Err(error_from_body(status.as_u16(), &body, fallback))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> KanbanResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| KanbanError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self, filter: &BoardFilter) -> KanbanResult<Vec<ServerTask>> {
        let url = self.endpoints.tasks_for(filter);
        tracing::debug!(%url, "fetching tasks");
        let response = self
            .send(self.client.get(&url), "Failed to fetch tasks")
            .await?;
        Self::read_json(response).await
    }

    async fn create_task(&self, payload: &NewTaskPayload) -> KanbanResult<CreatedTask> {
        let url = self.endpoints.tasks();
        tracing::debug!(%url, title = %payload.title, "creating task");
        let response = self
            .send(
                self.client.post(&url).json(payload),
                "Unknown server error during creation.",
            )
            .await?;
        Self::read_json(response).await
    }

    async fn update_status(&self, task_id: TaskId, patch: StatusPatch) -> KanbanResult<()> {
        let url = self.endpoints.task(task_id);
        tracing::debug!(%url, status = patch.status.code(), "updating task status");
        self.send(self.client.put(&url).json(&patch), "Status update failed")
            .await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: TaskId) -> KanbanResult<()> {
        let url = self.endpoints.task(task_id);
        tracing::debug!(%url, "deleting task");
        self.send(self.client.delete(&url), "Failed to delete task")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserApi for HttpTaskApi {
    async fn list_users(&self) -> KanbanResult<Vec<ServerUser>> {
        let url = self.endpoints.users();
        let response = self
            .send(self.client.get(&url), "Failed to fetch users")
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::TaskStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one HTTP request with a canned response and hands back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{}/api/v1", addr), handle)
    }

    #[test]
    fn test_endpoints() {
        let endpoints = Endpoints::new("http://host/api/v1/");
        assert_eq!(endpoints.tasks(), "http://host/api/v1/tasks/");
        assert_eq!(endpoints.tasks_for(&BoardFilter::All), "http://host/api/v1/tasks/");
        assert_eq!(
            endpoints.tasks_for(&BoardFilter::parse("3")),
            "http://host/api/v1/tasks/sprint/3"
        );
        assert_eq!(endpoints.task(42), "http://host/api/v1/tasks/42");
        assert_eq!(endpoints.users(), "http://host/api/v1/users/");
    }

    #[tokio::test]
    async fn test_list_tasks_for_sprint() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"task_id": 1, "title": "A", "status": "DONE", "priority": "LOW", "sprint_id": 3}]"#,
        )
        .await;

        let api = HttpTaskApi::new(&base);
        let tasks = api.list_tasks(&BoardFilter::parse("3")).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Done);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/v1/tasks/sprint/3 "));
    }

    #[tokio::test]
    async fn test_update_status_sends_backend_code() {
        let (base, server) = serve_once("200 OK", r#"{"message": "Task updated successfully"}"#).await;

        let api = HttpTaskApi::new(&base);
        api.update_status(7, StatusPatch { status: TaskStatus::InReview })
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /api/v1/tasks/7 "));
        assert!(request.ends_with(r#"{"status":"IN_REVIEW"}"#));
    }

    #[tokio::test]
    async fn test_server_error_message_surfaces() {
        let (base, server) =
            serve_once("404 NOT FOUND", r#"{"error": "Task with ID 7 not found"}"#).await;

        let api = HttpTaskApi::new(&base);
        let err = api.delete_task(7).await.unwrap_err();
        assert!(matches!(
            err,
            KanbanError::Server { status: 404, ref message } if message == "Task with ID 7 not found"
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpTaskApi::new(&format!("http://{}/api/v1", addr));
        let err = api.list_tasks(&BoardFilter::All).await.unwrap_err();
        assert!(matches!(err, KanbanError::Network(_)));
    }
}
