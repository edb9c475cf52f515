use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A delete was attempted on a row without a persisted id. Issuing it would
    /// match every row of the table.
    #[error("refusing to delete {entity} with unset id")]
    UnsetId { entity: &'static str },

    /// A delete would orphan rows that must keep pointing at this one.
    #[error("{entity} {id} still has live {dependents}")]
    HasDependents {
        entity: &'static str,
        id: i32,
        dependents: &'static str,
    },

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        StoreError::NotFound { entity, id }
    }
}
