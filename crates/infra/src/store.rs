//! Persistence port.
//!
//! The GraphQL layer only talks to these traits. [`crate::repos::PgStore`] is
//! the Postgres implementation and [`crate::memory::MemoryStore`] keeps
//! everything in process.
//!
//! Reads never return soft-deleted rows. `update_*` persists the whole row as
//! given (last write wins) and fails with [`StoreError::NotFound`] when the row
//! is gone. `delete_*` refuses rows whose id is unset and returns the row as it
//! was when deleted.
//!
//! [`StoreError::NotFound`]: crate::StoreError::NotFound

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{PropertyRow, RentalRow};
use crate::repos::{NewProperty, NewRental};

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn get_property(&self, id: i32) -> StoreResult<Option<PropertyRow>>;

    async fn list_properties(&self) -> StoreResult<Vec<PropertyRow>>;

    /// Batch lookup; missing ids are simply absent from the result.
    async fn properties_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<PropertyRow>>;

    async fn create_property(&self, data: NewProperty) -> StoreResult<PropertyRow>;

    async fn update_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow>;

    async fn delete_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow>;

    /// Returns the oldest property with the same address, city, state and
    /// zipcode, creating one from `data` when none exists. The lookup and the
    /// insert are separate statements: two concurrent calls can both miss and
    /// both insert.
    async fn first_or_create_property(&self, data: NewProperty) -> StoreResult<PropertyRow>;
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn get_rental(&self, id: i32) -> StoreResult<Option<RentalRow>>;

    async fn list_rentals(&self) -> StoreResult<Vec<RentalRow>>;

    async fn create_rental(&self, data: NewRental) -> StoreResult<RentalRow>;

    async fn update_rental(&self, row: &RentalRow) -> StoreResult<RentalRow>;

    async fn delete_rental(&self, row: &RentalRow) -> StoreResult<RentalRow>;
}

#[async_trait]
pub trait Store: PropertyStore + RentalStore {
    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}

pub type DynStore = Arc<dyn Store>;
