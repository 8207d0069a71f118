//! Async facade over `TodoClient` + `Transport`: one method per endpoint.

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Health, Todo, TodoId, TodoInput};

#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl TodoApi<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            TodoClient::new(&config.base_url),
            ReqwestTransport::new(config)?,
        ))
    }
}

impl<T: Transport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn list_by_status(&self, completed: bool) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos_by_status(completed);
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn search(&self, title: &str) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_search_todos(title)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    pub async fn get(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.transport.execute(self.client.build_get_todo(id)).await?;
        self.client.parse_get_todo(response)
    }

    pub async fn create(&self, input: &TodoInput) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    pub async fn update(&self, id: TodoId, input: &TodoInput) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    pub async fn toggle(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.transport.execute(self.client.build_toggle_todo(id)).await?;
        self.client.parse_toggle_todo(response)
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }

    pub async fn delete_all(&self) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_all_todos()).await?;
        self.client.parse_delete_all_todos(response)
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        let response = self.transport.execute(self.client.build_health()).await?;
        self.client.parse_health(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::{todo_json, ScriptedTransport};

    fn api(transport: &ScriptedTransport) -> TodoApi<ScriptedTransport> {
        TodoApi::new(TodoClient::new("http://svc"), transport.clone())
    }

    #[tokio::test]
    async fn search_round_trip() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &format!("[{}]", todo_json(3, "Buy milk", false)));

        let found = api(&transport).search("milk").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(transport.requests()[0].path, "http://svc/todos/search?title=milk");
    }

    #[tokio::test]
    async fn list_by_status_round_trip() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &format!("[{}]", todo_json(1, "done", true)));

        let done = api(&transport).list_by_status(true).await.unwrap();
        assert!(done[0].completed);
        assert_eq!(transport.requests()[0].path, "http://svc/todos?completed=true");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let transport = ScriptedTransport::default();
        transport.reply(404, "");

        let err = api(&transport).get(TodoId(5)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn transport_failure_passes_through() {
        let transport = ScriptedTransport::default();
        transport.fail("connection refused");

        let err = api(&transport).delete_all().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(transport.requests()[0].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn health_reports_up() {
        let transport = ScriptedTransport::default();
        transport.reply(200, r#"{"status":"UP","message":"TODO API is running"}"#);
        assert!(api(&transport).health().await.unwrap().is_up());
    }
}
