pub mod properties;
pub mod rentals;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

pub use properties::{NewProperty, PropertyPatch, PropertyRepo};
pub use rentals::{NewRental, RentalPatch, RentalRepo};

use crate::error::{StoreError, StoreResult};
use crate::models::{PropertyRow, RentalRow};
use crate::store::{PropertyStore, RentalStore, Store};

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
    properties: PropertyRepo,
    rentals: RentalRepo,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self {
            properties: PropertyRepo::new(db.clone()),
            rentals: RentalRepo::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl PropertyStore for PgStore {
    async fn get_property(&self, id: i32) -> StoreResult<Option<PropertyRow>> {
        Ok(self.properties.get_by_id(id).await?)
    }

    async fn list_properties(&self) -> StoreResult<Vec<PropertyRow>> {
        Ok(self.properties.list().await?)
    }

    async fn properties_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<PropertyRow>> {
        Ok(self.properties.list_by_ids(ids).await?)
    }

    async fn create_property(&self, data: NewProperty) -> StoreResult<PropertyRow> {
        Ok(self.properties.create(&data).await?)
    }

    async fn update_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow> {
        self.properties
            .save(row)
            .await?
            .ok_or_else(|| StoreError::not_found(PropertyRow::ENTITY, row.id))
    }

    async fn delete_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow> {
        if row.id == 0 {
            warn!("Rejected property delete with unset id");
            return Err(StoreError::UnsetId {
                entity: PropertyRow::ENTITY,
            });
        }
        if let Some(deleted) = self.properties.delete(row.id).await? {
            return Ok(deleted);
        }
        if self.rentals.has_live_for_property(row.id).await? {
            warn!(id = row.id, "Rejected delete of property with live rentals");
            return Err(StoreError::HasDependents {
                entity: PropertyRow::ENTITY,
                id: row.id,
                dependents: "rentals",
            });
        }
        Err(StoreError::not_found(PropertyRow::ENTITY, row.id))
    }

    async fn first_or_create_property(&self, data: NewProperty) -> StoreResult<PropertyRow> {
        if let Some(existing) = self.properties.find_by_address(&data).await? {
            return Ok(existing);
        }
        Ok(self.properties.create(&data).await?)
    }
}

#[async_trait]
impl RentalStore for PgStore {
    async fn get_rental(&self, id: i32) -> StoreResult<Option<RentalRow>> {
        Ok(self.rentals.get_by_id(id).await?)
    }

    async fn list_rentals(&self) -> StoreResult<Vec<RentalRow>> {
        Ok(self.rentals.list().await?)
    }

    async fn create_rental(&self, data: NewRental) -> StoreResult<RentalRow> {
        Ok(self.rentals.create(&data).await?)
    }

    async fn update_rental(&self, row: &RentalRow) -> StoreResult<RentalRow> {
        self.rentals
            .save(row)
            .await?
            .ok_or_else(|| StoreError::not_found(RentalRow::ENTITY, row.id))
    }

    async fn delete_rental(&self, row: &RentalRow) -> StoreResult<RentalRow> {
        if row.id == 0 {
            warn!("Rejected rental delete with unset id");
            return Err(StoreError::UnsetId {
                entity: RentalRow::ENTITY,
            });
        }
        self.rentals
            .delete(row.id)
            .await?
            .ok_or_else(|| StoreError::not_found(RentalRow::ENTITY, row.id))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.db).await?;
        Ok(())
    }
}
