use std::time::Duration;

use async_graphql::dynamic::Schema;
use async_graphql::parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use async_graphql_axum::GraphQLResponse;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use infra::Store;

use crate::error::AppError;
use crate::state::AppState;

/// Build the Axum router with the health endpoint and GraphQL over GET and POST.
pub fn build_router(state: AppState, schema: Schema) -> Router {
    let cors = {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true)
    };

    Router::new()
        // Liveness check; also proves the store answers.
        .route("/health", get(health))
        .route(
            "/graphql",
            get({
                let schema = schema.clone();
                move |params: Query<GetParams>| graphql_get(params, schema)
            })
            .post(move |body: Bytes| graphql_post(body, schema)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
}

/// `GET /graphql?query=...&operationName=...&variables=<json>`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetParams {
    query: String,
    operation_name: Option<String>,
    variables: Option<String>,
}

async fn graphql_get(
    Query(params): Query<GetParams>,
    schema: Schema,
) -> Result<GraphQLResponse, AppError> {
    if selects_mutation(&params.query, params.operation_name.as_deref()) {
        return Err(AppError::MethodNotAllowed(
            "mutations must be sent with POST".to_string(),
        ));
    }
    let mut request = async_graphql::Request::new(params.query);
    if let Some(name) = params.operation_name {
        request = request.operation_name(name);
    }
    if let Some(raw) = params.variables.filter(|v| !v.trim().is_empty()) {
        let json: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid variables: {e}")))?;
        request = request.variables(async_graphql::Variables::from_json(json));
    }
    Ok(schema.execute(request).await.into())
}

/// Whether the operation a GET would run is a mutation. Documents that fail to
/// parse, or name no operation they contain, are left to the executor to reject.
fn selects_mutation(query: &str, operation_name: Option<&str>) -> bool {
    let Ok(document) = parse_query(query) else {
        return false;
    };
    let selected = match (&document.operations, operation_name) {
        (DocumentOperations::Single(op), _) => Some(op),
        (DocumentOperations::Multiple(ops), Some(name)) => ops
            .iter()
            .find(|(op_name, _)| op_name.as_str() == name)
            .map(|(_, op)| op),
        (DocumentOperations::Multiple(ops), None) if ops.len() == 1 => ops.values().next(),
        (DocumentOperations::Multiple(_), None) => None,
    };
    selected.is_some_and(|op| op.node.ty == OperationType::Mutation)
}

async fn graphql_post(body: Bytes, schema: Schema) -> Result<GraphQLResponse, AppError> {
    let request: async_graphql::Request = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {e}")))?;
    Ok(schema.execute(request).await.into())
}

async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.ping().await?;
    Ok("ok")
}
