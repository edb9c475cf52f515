// Each domain contains: mod.rs (registration), resolvers.rs, types.rs

pub mod properties;
pub mod rentals;

use async_graphql::ErrorExtensions;
use infra::StoreError;

use super::error::GqlError;

pub(crate) fn not_found(entity: &'static str, id: i32) -> async_graphql::Error {
    GqlError::from(StoreError::not_found(entity, id)).extend()
}

/// Deleting with an unset id would match every row; refuse before the store
/// is reached.
pub(crate) fn ensure_persisted_id(entity: &'static str, id: i32) -> async_graphql::Result<()> {
    if id == 0 {
        tracing::warn!(entity, "Delete requested for row with unset id");
        return Err(GqlError::from(StoreError::UnsetId { entity }).extend());
    }
    Ok(())
}
