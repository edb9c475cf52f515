#![allow(dead_code)]

use std::sync::Arc;

use api::{gql::build_schema, AppConfig, AppState, StoreBackend};
use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response, Variables};
use infra::memory::MemoryStore;

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub schema: Schema,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        store_backend: StoreBackend::Memory,
        ..AppConfig::default()
    }
}

/// Schema over a fresh in-memory store.
pub fn setup_test_app() -> TestApp {
    setup_with_config(test_config())
}

pub fn setup_with_config(config: AppConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config);
    let schema = build_schema(&state).expect("Failed to build schema");
    TestApp {
        state,
        store,
        schema,
    }
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &Schema,
    query: &str,
    variables: Option<Variables>,
) -> Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Runs a document that is expected to succeed and returns its data as JSON.
pub async fn execute_ok(schema: &Schema, query: &str) -> serde_json::Value {
    let response = execute_graphql(schema, query, None).await;
    assert!(
        response.errors.is_empty(),
        "Query should succeed: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

/// `extensions.code` of every error in the response, in order.
pub fn error_codes(response: &Response) -> Vec<String> {
    response
        .errors
        .iter()
        .filter_map(|e| {
            let ext = serde_json::to_value(e.extensions.as_ref()?).ok()?;
            ext.get("code")?.as_str().map(str::to_string)
        })
        .collect()
}

/// Create a property through the API and return its id.
pub async fn create_test_property(
    schema: &Schema,
    address: &str,
    city: &str,
    state: &str,
    zipcode: &str,
) -> i64 {
    let query = format!(
        r#"mutation {{
            create(address: "{address}", city: "{city}", state: "{state}", zipcode: "{zipcode}") {{ id }}
        }}"#
    );
    let data = execute_ok(schema, &query).await;
    data["create"]["id"].as_i64().expect("Created property should have an id")
}
