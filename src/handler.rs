use std::sync::Arc;

use async_graphql::{
    http::GraphiQLSource,
    parser::{parse_query, types::OperationType},
    Request as GraphqlRequest, Variables,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{model::Caller, AppState, GRAPHQL_PATH};

// Query-string form of the GraphQL envelope used by GET
#[derive(Debug, Deserialize)]
pub struct GraphqlParams {
    pub query: Option<String>,
    pub variables: Option<String>,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
}

// Handler for the health checker route
pub async fn health_checker_handler() -> impl IntoResponse {
    const MESSAGE: &str = "Todo GraphQL API with Rust, SQLX, SQLite, and Axum";

    let json_response = serde_json::json!({
        "status": "success",
        "message": MESSAGE
    });

    Json(json_response)
}

// Handler for submitted GraphQL envelopes
pub async fn graphql_post(
    State(data): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<GraphqlRequest>,
) -> impl IntoResponse {
    debug!(user_id = %caller.user_id, operation = ?request.operation_name, "graphql request");
    Json(data.schema.execute(request.data(caller)).await)
}

// Handler for read-only GraphQL over the query string, or the GraphiQL page
pub async fn graphql_get(
    State(data): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<GraphqlParams>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let Some(query) = params.query else {
        let page = GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish();
        return Ok(Html(page).into_response());
    };

    if !is_read_only(&query) {
        let error_response = json!({
            "status": "fail",
            "message": "Mutations must be submitted with POST",
        });
        return Err((StatusCode::METHOD_NOT_ALLOWED, Json(error_response)));
    }

    let mut request = GraphqlRequest::new(query);
    if let Some(raw) = params.variables.as_deref().filter(|raw| !raw.is_empty()) {
        let variables: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            let error_response = json!({
                "status": "fail",
                "message": format!("Invalid variables: {}", e),
            });
            (StatusCode::BAD_REQUEST, Json(error_response))
        })?;
        request = request.variables(Variables::from_json(variables));
    }
    if let Some(name) = params.operation_name {
        request = request.operation_name(name);
    }

    debug!(user_id = %caller.user_id, "graphql read");
    Ok(Json(data.schema.execute(request.data(caller)).await).into_response())
}

// Unparseable documents count as read-only; execution reports the syntax error
fn is_read_only(query: &str) -> bool {
    match parse_query(query) {
        Ok(document) => document
            .operations
            .iter()
            .all(|(_, operation)| matches!(operation.node.ty, OperationType::Query)),
        Err(_) => true,
    }
}
