//! In-memory todo list for one client session.
//!
//! Every mutation runs in two steps: a `begin_*` call applies the change
//! locally and returns a pending token, then `settle_*` takes the server's
//! answer and either confirms (adopting the server's record) or compensates
//! (restoring the pre-mutation state). The async `add`/`toggle`/`delete`
//! methods wrap one [`TodoApi`] call between the two steps.

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::client::{api::TodoApi, error::ClientError, types::Todo};

const LOCAL_PREFIX: &str = "local-";

#[derive(Debug)]
pub struct PendingAdd {
    provisional_id: String,
    title: String,
}

impl PendingAdd {
    /// Trimmed title to submit.
    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug)]
pub struct PendingToggle {
    id: String,
    prior: Option<bool>,
}

#[derive(Debug)]
pub struct PendingDelete {
    id: String,
    snapshot: Vec<Todo>,
}

#[derive(Debug, Default)]
pub struct TodoBoard {
    todos: Vec<Todo>,
    error: Option<String>,
}

impl TodoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_provisional(todo: &Todo) -> bool {
        todo.id.starts_with(LOCAL_PREFIX)
    }

    /// Todos in display order, newest first.
    pub fn view(&self) -> Vec<&Todo> {
        let mut view: Vec<&Todo> = self.todos.iter().collect();
        view.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        view
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            out.push_str(&format!("! {error}\n"));
        }
        if self.todos.is_empty() {
            out.push_str("No todos yet.\n");
        }
        for (n, todo) in self.view().into_iter().enumerate() {
            let mark = if todo.done { 'x' } else { ' ' };
            let pending = if Self::is_provisional(todo) { " (saving)" } else { "" };
            out.push_str(&format!("{:>3}. [{mark}] {}{pending}\n", n + 1, todo.title));
        }
        out
    }

    pub async fn refresh<A: TodoApi>(&mut self, api: &A) -> bool {
        self.error = None;
        match api.list().await {
            Ok(todos) => {
                self.todos = todos;
                true
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub fn begin_add(&mut self, title: &str) -> Option<PendingAdd> {
        let title = title.trim();
        if title.is_empty() {
            self.error = Some("Please enter a title".to_string());
            return None;
        }
        self.error = None;

        let now = Utc::now();
        let provisional_id = format!("{LOCAL_PREFIX}{}", Uuid::new_v4());
        self.todos.insert(
            0,
            Todo {
                id: provisional_id.clone(),
                user_id: String::new(),
                title: title.to_string(),
                done: false,
                created_at: now,
                updated_at: now,
            },
        );

        Some(PendingAdd {
            provisional_id,
            title: title.to_string(),
        })
    }

    pub fn settle_add(&mut self, pending: PendingAdd, outcome: Result<Todo, ClientError>) -> bool {
        let slot = self
            .todos
            .iter()
            .position(|t| t.id == pending.provisional_id);

        match outcome {
            Ok(todo) => {
                match slot {
                    Some(i) => self.todos[i] = todo,
                    None => self.todos.insert(0, todo),
                }
                true
            }
            Err(err) => {
                if let Some(i) = slot {
                    self.todos.remove(i);
                }
                self.fail(err.to_string())
            }
        }
    }

    pub async fn add<A: TodoApi>(&mut self, api: &A, title: &str) -> bool {
        let Some(pending) = self.begin_add(title) else {
            return false;
        };
        let outcome = api.add(pending.title()).await;
        self.settle_add(pending, outcome)
    }

    pub fn begin_toggle(&mut self, id: &str) -> PendingToggle {
        self.error = None;
        let prior = self.todos.iter_mut().find(|t| t.id == id).map(|todo| {
            let prior = todo.done;
            todo.done = !prior;
            prior
        });
        PendingToggle {
            id: id.to_string(),
            prior,
        }
    }

    pub fn settle_toggle(
        &mut self,
        pending: PendingToggle,
        outcome: Result<Todo, ClientError>,
    ) -> bool {
        let entry = self.todos.iter_mut().find(|t| t.id == pending.id);
        match outcome {
            Ok(todo) => {
                if let Some(entry) = entry {
                    *entry = todo;
                }
                true
            }
            Err(err) => {
                if let (Some(entry), Some(prior)) = (entry, pending.prior) {
                    entry.done = prior;
                }
                self.fail(err.to_string())
            }
        }
    }

    pub async fn toggle<A: TodoApi>(&mut self, api: &A, id: &str) -> bool {
        let pending = self.begin_toggle(id);
        let outcome = api.toggle(id).await;
        self.settle_toggle(pending, outcome)
    }

    pub fn begin_delete(&mut self, id: &str) -> PendingDelete {
        self.error = None;
        let snapshot = self.todos.clone();
        self.todos.retain(|t| t.id != id);
        PendingDelete {
            id: id.to_string(),
            snapshot,
        }
    }

    pub fn settle_delete(
        &mut self,
        pending: PendingDelete,
        outcome: Result<bool, ClientError>,
    ) -> bool {
        match outcome {
            Ok(true) => true,
            Ok(false) => {
                warn!(id = %pending.id, "server reported nothing deleted");
                self.todos = pending.snapshot;
                self.fail("Delete failed".to_string())
            }
            Err(err) => {
                self.todos = pending.snapshot;
                self.fail(err.to_string())
            }
        }
    }

    pub async fn delete<A: TodoApi>(&mut self, api: &A, id: &str) -> bool {
        let pending = self.begin_delete(id);
        let outcome = api.delete(id).await;
        self.settle_delete(pending, outcome)
    }

    fn fail(&mut self, message: String) -> bool {
        self.error = Some(message);
        false
    }
}
