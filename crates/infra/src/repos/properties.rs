use sqlx::{PgPool, Result};

use crate::models::PropertyRow;
use crate::patch::{Patch, PatchError};
use crate::schema::PROPERTIES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProperty {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// Fields a caller may change on an existing property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPatch {
    pub address: Patch<String>,
    pub city: Patch<String>,
    pub state: Patch<String>,
    pub zipcode: Patch<String>,
}

impl PropertyPatch {
    /// Merge the supplied fields over `row`. On error `row` is left untouched.
    pub fn apply(self, row: &mut PropertyRow) -> std::result::Result<(), PatchError> {
        self.address.check_required("address")?;
        self.city.check_required("city")?;
        self.state.check_required("state")?;
        self.zipcode.check_required("zipcode")?;

        self.address.apply("address", &mut row.address)?;
        self.city.apply("city", &mut row.city)?;
        self.state.apply("state", &mut row.state)?;
        self.zipcode.apply("zipcode", &mut row.zipcode)?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PropertyRepo {
    db: PgPool,
}

impl PropertyRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<PropertyRow>> {
        let sql = format!(
            "SELECT {} FROM properties WHERE id = $1 AND deleted_at IS NULL",
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<PropertyRow>> {
        let sql = format!(
            "SELECT {} FROM properties WHERE deleted_at IS NULL ORDER BY id ASC",
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .fetch_all(&self.db)
            .await
    }

    pub async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<PropertyRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM properties WHERE id = ANY($1::int4[]) AND deleted_at IS NULL",
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(ids)
            .fetch_all(&self.db)
            .await
    }

    pub async fn find_by_address(&self, data: &NewProperty) -> Result<Option<PropertyRow>> {
        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE address = $1 AND city = $2 AND state = $3 AND zipcode = $4
              AND deleted_at IS NULL
            ORDER BY id ASC
            LIMIT 1
            "#,
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zipcode)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn create(&self, data: &NewProperty) -> Result<PropertyRow> {
        let sql = format!(
            r#"
            INSERT INTO properties (address, city, state, zipcode)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(&data.address)
            .bind(&data.city)
            .bind(&data.state)
            .bind(&data.zipcode)
            .fetch_one(&self.db)
            .await
    }

    /// Save every mutable column of `row`.
    pub async fn save(&self, row: &PropertyRow) -> Result<Option<PropertyRow>> {
        let sql = format!(
            r#"
            UPDATE properties
            SET parcel = $2, address = $3, city = $4, coordinates = $5,
                lot_sqft = $6, sqft = $7, state = $8, zipcode = $9,
                use_code = $10, total_rooms = $11, basement = $12, style = $13,
                bedrooms = $14, grade = $15, stories = $16, full_baths = $17,
                half_baths = $18, condition = $19, year_built = $20, fireplaces = $21,
                exterior_finish = $22, heating_cooling = $23, basement_garage = $24,
                roof_type = $25, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(row.id)
            .bind(&row.parcel)
            .bind(&row.address)
            .bind(&row.city)
            .bind(&row.coordinates)
            .bind(row.lot_sqft)
            .bind(row.sqft)
            .bind(&row.state)
            .bind(&row.zipcode)
            .bind(&row.use_code)
            .bind(row.total_rooms)
            .bind(&row.basement)
            .bind(&row.style)
            .bind(row.bedrooms)
            .bind(&row.grade)
            .bind(row.stories)
            .bind(row.full_baths)
            .bind(row.half_baths)
            .bind(&row.condition)
            .bind(row.year_built)
            .bind(row.fireplaces)
            .bind(&row.exterior_finish)
            .bind(&row.heating_cooling)
            .bind(row.basement_garage)
            .bind(&row.roof_type)
            .fetch_optional(&self.db)
            .await
    }

    /// Soft delete. Matches nothing while a live rental still points at the row.
    pub async fn delete(&self, id: i32) -> Result<Option<PropertyRow>> {
        let sql = format!(
            r#"
            UPDATE properties
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
              AND NOT EXISTS (
                  SELECT 1 FROM rentals WHERE property_id = $1 AND deleted_at IS NULL
              )
            RETURNING {}
            "#,
            PROPERTIES.select_list()
        );
        sqlx::query_as::<_, PropertyRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }
}
