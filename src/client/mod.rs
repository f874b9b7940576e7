//! Client half: the GraphQL transport wrapper, the typed todo operations on
//! top of it, and the in-memory board that applies optimistic updates.

pub mod api;
pub mod board;
pub mod envelope;
pub mod error;
pub mod types;

pub use api::{GraphqlClient, TodoApi};
pub use board::TodoBoard;
pub use error::ClientError;
pub use types::Todo;
