//! Single-user todo list served over GraphQL, with a client that applies
//! optimistic updates.
//!
//! Server side: [`store`] (the `todos` table), [`service`] (the four
//! owner-scoped operations), [`schema`] (GraphQL surface), [`route`] and
//! [`handler`] (axum). Client side lives in [`client`].

use std::sync::Arc;

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
pub mod schema;
pub mod service;
pub mod store;

use middleware::IdentityResolver;
use schema::TodoSchema;

pub const GRAPHQL_PATH: &str = "/api/graphql";

// Struct representing the application state
pub struct AppState {
    pub schema: TodoSchema,
    pub identity: Arc<dyn IdentityResolver>,
}
