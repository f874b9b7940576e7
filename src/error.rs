use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Failures of the four todo operations.
///
/// Each variant maps onto a stable code that is sent to clients in the
/// GraphQL error's `extensions.code`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("{0}")]
    BadInput(String),

    #[error("Todo not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Internal(String),
}

impl TodoError {
    pub fn code(&self) -> &'static str {
        match self {
            TodoError::BadInput(_) => "BAD_USER_INPUT",
            TodoError::NotFound => "NOT_FOUND",
            TodoError::Forbidden => "FORBIDDEN",
            TodoError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for TodoError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("store failure: {err}");
        TodoError::Internal("Internal server error".to_string())
    }
}
