use chrono::{DateTime, Utc};
use sqlx::{PgPool, Result};

use crate::models::RentalRow;
use crate::patch::{Patch, PatchError};
use crate::schema::RENTALS;

#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub property_id: i32,
    pub unit: Option<String>,
    pub sqft: Option<i32>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub stories: Option<i32>,
    pub rent_deposit: Option<f64>,
    pub rent_monthly: Option<f64>,
    pub listing_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalPatch {
    pub unit: Patch<String>,
    pub sqft: Patch<i32>,
    pub bedrooms: Patch<i32>,
    pub bathrooms: Patch<i32>,
    pub stories: Patch<i32>,
    pub rent_deposit: Patch<f64>,
    pub rent_monthly: Patch<f64>,
}

impl RentalPatch {
    /// Merge the supplied fields over `row`. On error `row` is left untouched.
    pub fn apply(self, row: &mut RentalRow) -> std::result::Result<(), PatchError> {
        self.bedrooms.check_required("bedrooms")?;
        self.bathrooms.check_required("bathrooms")?;

        self.bedrooms.apply("bedrooms", &mut row.bedrooms)?;
        self.bathrooms.apply("bathrooms", &mut row.bathrooms)?;
        self.unit.apply_optional(&mut row.unit);
        self.sqft.apply_optional(&mut row.sqft);
        self.stories.apply_optional(&mut row.stories);
        self.rent_deposit.apply_optional(&mut row.rent_deposit);
        self.rent_monthly.apply_optional(&mut row.rent_monthly);
        Ok(())
    }
}

#[derive(Clone)]
pub struct RentalRepo {
    db: PgPool,
}

impl RentalRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<RentalRow>> {
        let sql = format!(
            "SELECT {} FROM rentals WHERE id = $1 AND deleted_at IS NULL",
            RENTALS.select_list()
        );
        sqlx::query_as::<_, RentalRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<RentalRow>> {
        let sql = format!(
            "SELECT {} FROM rentals WHERE deleted_at IS NULL ORDER BY id ASC",
            RENTALS.select_list()
        );
        sqlx::query_as::<_, RentalRow>(&sql).fetch_all(&self.db).await
    }

    pub async fn has_live_for_property(&self, property_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM rentals WHERE property_id = $1 AND deleted_at IS NULL)",
        )
        .bind(property_id)
        .fetch_one(&self.db)
        .await
    }

    pub async fn create(&self, data: &NewRental) -> Result<RentalRow> {
        let sql = format!(
            r#"
            INSERT INTO rentals (
                property_id, unit, sqft, bedrooms, bathrooms, stories,
                rent_deposit, rent_monthly, listing_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            RENTALS.select_list()
        );
        sqlx::query_as::<_, RentalRow>(&sql)
            .bind(data.property_id)
            .bind(&data.unit)
            .bind(data.sqft)
            .bind(data.bedrooms)
            .bind(data.bathrooms)
            .bind(data.stories)
            .bind(data.rent_deposit)
            .bind(data.rent_monthly)
            .bind(data.listing_date)
            .fetch_one(&self.db)
            .await
    }

    pub async fn save(&self, row: &RentalRow) -> Result<Option<RentalRow>> {
        let sql = format!(
            r#"
            UPDATE rentals
            SET property_id = $2, unit = $3, sqft = $4, bedrooms = $5, bathrooms = $6,
                stories = $7, rent_deposit = $8, rent_monthly = $9, listing_date = $10,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            RENTALS.select_list()
        );
        sqlx::query_as::<_, RentalRow>(&sql)
            .bind(row.id)
            .bind(row.property_id)
            .bind(&row.unit)
            .bind(row.sqft)
            .bind(row.bedrooms)
            .bind(row.bathrooms)
            .bind(row.stories)
            .bind(row.rent_deposit)
            .bind(row.rent_monthly)
            .bind(row.listing_date)
            .fetch_optional(&self.db)
            .await
    }

    /// Soft delete.
    pub async fn delete(&self, id: i32) -> Result<Option<RentalRow>> {
        let sql = format!(
            r#"
            UPDATE rentals
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            RENTALS.select_list()
        );
        sqlx::query_as::<_, RentalRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }
}
