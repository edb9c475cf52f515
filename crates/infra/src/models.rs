use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PropertyRow {
    pub id: i32,
    pub parcel: Option<String>,
    pub address: String,
    pub city: String,
    pub coordinates: Option<String>,
    pub lot_sqft: Option<i32>,
    pub sqft: Option<i32>,
    pub state: String,
    pub zipcode: String,
    pub use_code: Option<String>,
    pub total_rooms: Option<i32>,
    pub basement: Option<String>,
    pub style: Option<String>,
    pub bedrooms: Option<i32>,
    pub grade: Option<String>,
    pub stories: Option<i32>,
    pub full_baths: Option<i32>,
    pub half_baths: Option<i32>,
    pub condition: Option<String>,
    pub year_built: Option<i32>,
    pub fireplaces: Option<i32>,
    pub exterior_finish: Option<String>,
    pub heating_cooling: Option<String>,
    pub basement_garage: Option<i32>,
    pub roof_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PropertyRow {
    pub const ENTITY: &'static str = "Property";

    /// Natural key used by find-or-create.
    pub fn matches_address(&self, address: &str, city: &str, state: &str, zipcode: &str) -> bool {
        self.address == address && self.city == city && self.state == state && self.zipcode == zipcode
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RentalRow {
    pub id: i32,
    pub property_id: i32,
    pub unit: Option<String>,
    pub sqft: Option<i32>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub stories: Option<i32>,
    pub rent_deposit: Option<f64>,
    pub rent_monthly: Option<f64>,
    pub listing_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RentalRow {
    pub const ENTITY: &'static str = "Rental";
}
