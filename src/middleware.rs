use std::sync::Arc;

use axum::{
    extract::State,
    http::{self, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{model::Caller, AppState};

/// Resolves who a request acts as.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller>;
}

/// Every request acts as the same configured user.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: String,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve(&self, _headers: &HeaderMap) -> Option<Caller> {
        Some(Caller::new(self.user_id.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// HS256 bearer token; the `sub` claim is the caller.
pub struct BearerIdentity {
    key: DecodingKey,
    validation: Validation,
}

impl BearerIdentity {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

impl IdentityResolver for BearerIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Option<Caller> {
        let token = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))?;

        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Some(Caller::new(data.claims.sub)),
            Err(err) => {
                warn!("rejected bearer token: {err}");
                None
            }
        }
    }
}

// Attach the resolved caller to the request, or reject it
pub async fn mw_resolve_caller<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, StatusCode> {
    let caller = state
        .identity
        .resolve(request.headers())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
