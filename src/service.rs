use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::TodoError,
    model::{next_write_time, Caller, Todo},
    store::TodoStore,
};

/// The four todo operations, scoped to the calling identity.
#[derive(Debug, Clone)]
pub struct TodoService {
    store: TodoStore,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, caller: &Caller) -> Result<Vec<Todo>, TodoError> {
        let todos = self.store.list_by_owner(&caller.user_id).await?;
        debug!(user_id = %caller.user_id, count = todos.len(), "listed todos");
        Ok(todos)
    }

    pub async fn create(&self, caller: &Caller, title: &str) -> Result<Todo, TodoError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TodoError::BadInput("title is required".to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let created = self
            .store
            .insert(&id, &caller.user_id, title, Utc::now())
            .await?
            .ok_or_else(|| TodoError::Internal("Failed to create todo".to_string()))?;

        info!(id = %created.id, user_id = %caller.user_id, "created todo");
        Ok(created)
    }

    pub async fn toggle(&self, caller: &Caller, id: &str) -> Result<Todo, TodoError> {
        let found = self.owned(caller, id).await?;

        let now = next_write_time(found.updated_at, Utc::now());
        let updated = self
            .store
            .toggle_owned(id, &caller.user_id, now)
            .await?
            .ok_or_else(|| TodoError::Internal("Failed to update todo".to_string()))?;

        info!(id = %updated.id, done = updated.done, "toggled todo");
        Ok(updated)
    }

    pub async fn delete(&self, caller: &Caller, id: &str) -> Result<bool, TodoError> {
        self.owned(caller, id).await?;

        let removed = self.store.delete_owned(id, &caller.user_id).await? > 0;
        info!(id, removed, "deleted todo");
        Ok(removed)
    }

    // Look up `id` and confirm the caller owns it
    async fn owned(&self, caller: &Caller, id: &str) -> Result<Todo, TodoError> {
        let todo = self.store.find(id).await?.ok_or(TodoError::NotFound)?;
        if todo.user_id != caller.user_id {
            return Err(TodoError::Forbidden);
        }
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::connect_in_memory, model::wire_timestamp};

    async fn service() -> TodoService {
        TodoService::new(TodoStore::new(connect_in_memory().await.unwrap()))
    }

    fn me() -> Caller {
        Caller::new("user-1")
    }

    #[tokio::test]
    async fn list_is_empty_for_new_store() {
        let service = service().await;
        assert!(service.list(&me()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_then_list_contains_exactly_the_new_todo() {
        let service = service().await;
        let created = service.create(&me(), "  buy milk  ").await.unwrap();

        assert_eq!(created.title, "buy milk");
        assert_eq!(created.user_id, "user-1");
        assert!(!created.done);
        assert_eq!(created.created_at, created.updated_at);

        let todos = service.list(&me()).await.unwrap();
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn blank_titles_are_rejected_and_not_persisted() {
        let service = service().await;
        for title in ["", "   ", "\t\n"] {
            let err = service.create(&me(), title).await.unwrap_err();
            assert_eq!(err, TodoError::BadInput("title is required".to_string()));
        }
        assert!(service.list(&me()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_twice_restores_done_and_advances_updated_at() {
        let service = service().await;
        let created = service.create(&me(), "walk dog").await.unwrap();

        let once = service.toggle(&me(), &created.id).await.unwrap();
        assert!(once.done);
        assert!(once.updated_at > created.updated_at);
        assert_eq!(once.created_at, created.created_at);

        let twice = service.toggle(&me(), &created.id).await.unwrap();
        assert_eq!(twice.done, created.done);
        assert!(twice.updated_at > once.updated_at);
    }

    #[tokio::test]
    async fn rapid_toggles_always_advance_wire_updated_at() {
        let service = service().await;
        let created = service.create(&me(), "flip").await.unwrap();

        let mut last = wire_timestamp(created.updated_at);
        for _ in 0..50 {
            let toggled = service.toggle(&me(), &created.id).await.unwrap();
            let stamp = wire_timestamp(toggled.updated_at);
            assert!(stamp > last, "updatedAt stood still at {stamp}");
            last = stamp;
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal() {
        let pool = connect_in_memory().await.unwrap();
        let service = TodoService::new(TodoStore::new(pool.clone()));
        pool.close().await;

        let internal = TodoError::Internal("Internal server error".to_string());
        assert_eq!(service.list(&me()).await.unwrap_err(), internal);
        assert_eq!(service.create(&me(), "x").await.unwrap_err(), internal);
        assert_eq!(service.toggle(&me(), "x").await.unwrap_err(), internal);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_not_found() {
        let service = service().await;
        let err = service.toggle(&me(), "missing").await.unwrap_err();
        assert_eq!(err, TodoError::NotFound);
    }

    #[tokio::test]
    async fn other_owner_is_forbidden() {
        let service = service().await;
        let created = service.create(&me(), "private").await.unwrap();
        let intruder = Caller::new("user-2");

        assert_eq!(
            service.toggle(&intruder, &created.id).await.unwrap_err(),
            TodoError::Forbidden
        );
        assert_eq!(
            service.delete(&intruder, &created.id).await.unwrap_err(),
            TodoError::Forbidden
        );
        assert!(service.list(&intruder).await.unwrap().is_empty());
        assert_eq!(service.list(&me()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_then_reports_not_found() {
        let service = service().await;
        let created = service.create(&me(), "once").await.unwrap();

        assert!(service.delete(&me(), &created.id).await.unwrap());
        assert_eq!(
            service.delete(&me(), &created.id).await.unwrap_err(),
            TodoError::NotFound
        );
        assert!(service.list(&me()).await.unwrap().is_empty());
    }
}
