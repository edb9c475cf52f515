use async_graphql::dynamic::Schema;
use tracing::info;

use super::composer::{finish, ComposeError, SchemaComposer};
use super::domains::{properties, rentals};
use crate::state::AppState;

/// Compose every entity into one executable schema. Resolvers capture the
/// store from `state` when they are registered.
pub fn build_schema(state: &AppState) -> Result<Schema, ComposeError> {
    let mut builder = SchemaComposer::new()
        .register(properties::registration(state))
        .register(rentals::registration(state))
        .compose()?
        .limit_depth(15)
        .limit_complexity(200);

    if !state.config.gql_introspection {
        builder = builder.disable_introspection();
    }

    let schema = finish(builder)?;
    info!(
        introspection = state.config.gql_introspection,
        "GraphQL schema ready"
    );
    Ok(schema)
}
