//! In-process store with the same observable behaviour as [`crate::repos::PgStore`]:
//! ids start at 1, deletes are soft, reads skip deleted rows and rentals must
//! point at a live property.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{PropertyRow, RentalRow};
use crate::repos::{NewProperty, NewRental};
use crate::store::{PropertyStore, RentalStore, Store};

#[derive(Default)]
struct Tables {
    properties: BTreeMap<i32, PropertyRow>,
    rentals: BTreeMap<i32, RentalRow>,
    last_property_id: i32,
    last_rental_id: i32,
}

impl Tables {
    fn live_property(&self, id: i32) -> Option<&PropertyRow> {
        self.properties.get(&id).filter(|p| p.deleted_at.is_none())
    }

    fn live_rental(&self, id: i32) -> Option<&RentalRow> {
        self.rentals.get(&id).filter(|r| r.deleted_at.is_none())
    }

    fn insert_property(&mut self, data: NewProperty) -> PropertyRow {
        self.last_property_id += 1;
        let now = Utc::now();
        let row = PropertyRow {
            id: self.last_property_id,
            parcel: None,
            address: data.address,
            city: data.city,
            coordinates: None,
            lot_sqft: None,
            sqft: None,
            state: data.state,
            zipcode: data.zipcode,
            use_code: None,
            total_rooms: None,
            basement: None,
            style: None,
            bedrooms: None,
            grade: None,
            stories: None,
            full_baths: None,
            half_baths: None,
            condition: None,
            year_built: None,
            fireplaces: None,
            exterior_finish: None,
            heating_cooling: None,
            basement_garage: None,
            roof_type: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.properties.insert(row.id, row.clone());
        row
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored properties, soft-deleted ones included.
    pub fn property_row_count(&self) -> usize {
        self.tables.read().properties.len()
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn get_property(&self, id: i32) -> StoreResult<Option<PropertyRow>> {
        Ok(self.tables.read().live_property(id).cloned())
    }

    async fn list_properties(&self) -> StoreResult<Vec<PropertyRow>> {
        let tables = self.tables.read();
        Ok(tables
            .properties
            .values()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn properties_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<PropertyRow>> {
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.live_property(*id).cloned())
            .collect())
    }

    async fn create_property(&self, data: NewProperty) -> StoreResult<PropertyRow> {
        Ok(self.tables.write().insert_property(data))
    }

    async fn update_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow> {
        let mut tables = self.tables.write();
        let stored = tables
            .properties
            .get_mut(&row.id)
            .filter(|p| p.deleted_at.is_none())
            .ok_or_else(|| StoreError::not_found(PropertyRow::ENTITY, row.id))?;

        *stored = PropertyRow {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            deleted_at: None,
            ..row.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_property(&self, row: &PropertyRow) -> StoreResult<PropertyRow> {
        if row.id == 0 {
            return Err(StoreError::UnsetId {
                entity: PropertyRow::ENTITY,
            });
        }
        let mut tables = self.tables.write();
        if tables.live_property(row.id).is_none() {
            return Err(StoreError::not_found(PropertyRow::ENTITY, row.id));
        }
        if tables
            .rentals
            .values()
            .any(|r| r.property_id == row.id && r.deleted_at.is_none())
        {
            return Err(StoreError::HasDependents {
                entity: PropertyRow::ENTITY,
                id: row.id,
                dependents: "rentals",
            });
        }

        let stored = tables
            .properties
            .get_mut(&row.id)
            .ok_or_else(|| StoreError::not_found(PropertyRow::ENTITY, row.id))?;
        stored.deleted_at = Some(Utc::now());
        Ok(stored.clone())
    }

    async fn first_or_create_property(&self, data: NewProperty) -> StoreResult<PropertyRow> {
        let mut tables = self.tables.write();
        let existing = tables
            .properties
            .values()
            .filter(|p| p.deleted_at.is_none())
            .find(|p| p.matches_address(&data.address, &data.city, &data.state, &data.zipcode))
            .cloned();

        match existing {
            Some(row) => Ok(row),
            None => Ok(tables.insert_property(data)),
        }
    }
}

#[async_trait]
impl RentalStore for MemoryStore {
    async fn get_rental(&self, id: i32) -> StoreResult<Option<RentalRow>> {
        Ok(self.tables.read().live_rental(id).cloned())
    }

    async fn list_rentals(&self) -> StoreResult<Vec<RentalRow>> {
        let tables = self.tables.read();
        Ok(tables
            .rentals
            .values()
            .filter(|r| r.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn create_rental(&self, data: NewRental) -> StoreResult<RentalRow> {
        let mut tables = self.tables.write();
        if tables.live_property(data.property_id).is_none() {
            return Err(StoreError::not_found(PropertyRow::ENTITY, data.property_id));
        }

        tables.last_rental_id += 1;
        let now = Utc::now();
        let row = RentalRow {
            id: tables.last_rental_id,
            property_id: data.property_id,
            unit: data.unit,
            sqft: data.sqft,
            bedrooms: data.bedrooms,
            bathrooms: data.bathrooms,
            stories: data.stories,
            rent_deposit: data.rent_deposit,
            rent_monthly: data.rent_monthly,
            listing_date: data.listing_date,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.rentals.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_rental(&self, row: &RentalRow) -> StoreResult<RentalRow> {
        let mut tables = self.tables.write();
        let stored = tables
            .rentals
            .get_mut(&row.id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| StoreError::not_found(RentalRow::ENTITY, row.id))?;

        *stored = RentalRow {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            deleted_at: None,
            ..row.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_rental(&self, row: &RentalRow) -> StoreResult<RentalRow> {
        if row.id == 0 {
            return Err(StoreError::UnsetId {
                entity: RentalRow::ENTITY,
            });
        }
        let mut tables = self.tables.write();
        let stored = tables
            .rentals
            .get_mut(&row.id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| StoreError::not_found(RentalRow::ENTITY, row.id))?;

        stored.deleted_at = Some(Utc::now());
        Ok(stored.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
