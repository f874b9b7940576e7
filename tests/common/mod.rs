#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};
use todo_graphql::{
    config::IdentityMode, db::connect_in_memory, middleware::Claims, route::create_router,
    schema::build_schema, service::TodoService, store::TodoStore, AppState,
};

pub const SECRET: &str = "test-secret";

pub async fn app(identity: IdentityMode) -> axum::Router {
    let pool = connect_in_memory().await.unwrap();
    let state = Arc::new(AppState {
        schema: build_schema(TodoService::new(TodoStore::new(pool))),
        identity: identity.resolver(),
    });
    create_router(state)
}

pub fn static_user(user_id: &str) -> IdentityMode {
    IdentityMode::Static {
        user_id: user_id.to_string(),
    }
}

pub fn jwt() -> IdentityMode {
    IdentityMode::Jwt {
        secret: SECRET.to_string(),
    }
}

pub fn token_for(sub: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

/// Serve `app` on an ephemeral local port and return the GraphQL endpoint URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    format!("http://{addr}/api/graphql")
}
