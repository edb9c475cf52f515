//! Resolver-facing errors.
//!
//! async-graphql has a blanket `impl<T: Display> From<T> for Error`, so a bare
//! `?` would turn a [`GqlError`] into a message without its code. Resolvers go
//! through [`IntoGqlResult::into_gql`] (or `ErrorExtensions::extend`) instead,
//! which attaches `extensions.code`.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use infra::patch::PatchError;
use infra::StoreError;
use thiserror::Error;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";

#[derive(Debug, Error)]
pub enum GqlError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A batched load failed; every key in the batch shares the error.
    #[error("{0}")]
    Loader(Arc<StoreError>),

    #[error("{0}")]
    Validation(String),
}

impl GqlError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GqlError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            GqlError::Store(e) => store_code(e),
            GqlError::Loader(e) => store_code(e),
            GqlError::Validation(_) => VALIDATION_ERROR,
        }
    }
}

fn store_code(e: &StoreError) -> &'static str {
    match e {
        StoreError::NotFound { .. } => NOT_FOUND,
        StoreError::UnsetId { .. } | StoreError::HasDependents { .. } => INVARIANT_VIOLATION,
        StoreError::Db(_) => PERSISTENCE_ERROR,
    }
}

impl From<PatchError> for GqlError {
    fn from(e: PatchError) -> Self {
        GqlError::Validation(e.to_string())
    }
}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        if code == PERSISTENCE_ERROR {
            tracing::error!(error = %self, "Store failure");
        }
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Converts a `Result` whose error maps onto [`GqlError`] into an
/// `async_graphql::Result`, keeping the error code.
///
/// Usage: `store.get_property(id).await.into_gql()?`
pub trait IntoGqlResult<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<GqlError>> IntoGqlResult<T> for Result<T, E> {
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}
