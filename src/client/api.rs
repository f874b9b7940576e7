use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{
    envelope::{build_request, parse_response},
    error::ClientError,
    types::Todo,
};

pub const Q_TODOS: &str = r#"
  query Todos {
    todos { id userId title done createdAt updatedAt }
  }
"#;

pub const M_ADD: &str = r#"
  mutation AddTodo($title: String!) {
    addTodo(title: $title) { id userId title done createdAt updatedAt }
  }
"#;

pub const M_TOGGLE: &str = r#"
  mutation ToggleTodo($id: ID!) {
    toggleTodo(id: $id) { id userId title done createdAt updatedAt }
  }
"#;

pub const M_DELETE: &str = r#"
  mutation DeleteTodo($id: ID!) {
    deleteTodo(id: $id)
  }
"#;

/// The four todo operations as seen from the client.
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    async fn add(&self, title: &str) -> Result<Todo, ClientError>;
    async fn toggle(&self, id: &str) -> Result<Todo, ClientError>;
    async fn delete(&self, id: &str) -> Result<bool, ClientError>;
}

/// Executes GraphQL envelopes against one HTTP endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    bearer: Option<String>,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// One request/response exchange; returns `data` decoded as `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ClientError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&build_request(query, variables));
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "graphql response");

        parse_response(status, &body)
    }
}

#[derive(Deserialize)]
struct TodosData {
    todos: Vec<Todo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTodoData {
    add_todo: Todo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleTodoData {
    toggle_todo: Todo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteTodoData {
    delete_todo: bool,
}

impl TodoApi for GraphqlClient {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let data: TodosData = self.send(Q_TODOS, json!({})).await?;
        Ok(data.todos)
    }

    async fn add(&self, title: &str) -> Result<Todo, ClientError> {
        let data: AddTodoData = self.send(M_ADD, json!({ "title": title })).await?;
        Ok(data.add_todo)
    }

    async fn toggle(&self, id: &str) -> Result<Todo, ClientError> {
        let data: ToggleTodoData = self.send(M_TOGGLE, json!({ "id": id })).await?;
        Ok(data.toggle_todo)
    }

    async fn delete(&self, id: &str) -> Result<bool, ClientError> {
        let data: DeleteTodoData = self.send(M_DELETE, json!({ "id": id })).await?;
        Ok(data.delete_todo)
    }
}
