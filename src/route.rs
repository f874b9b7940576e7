use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::{
    handler::*, middleware::mw_resolve_caller, AppState, GRAPHQL_PATH,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
        .route_layer(from_fn_with_state(app_state.clone(), mw_resolve_caller))
        .route("/", get(health_checker_handler))
        .with_state(app_state);
    app
}
