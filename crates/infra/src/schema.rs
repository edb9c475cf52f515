//! Table declarations and the DDL derived from them.
//!
//! Each table is declared once, column by column. [`auto_migrate`] turns the
//! declarations into idempotent statements: the table is created when missing
//! and every declared column is added when missing, so a fresh database and an
//! older one converge on the same shape without migration files. Repositories
//! build their `SELECT` lists from the same declarations.

use tracing::{debug, info};

use crate::db::Db;

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn col(name: &'static str, sql_type: &'static str) -> Column {
    Column { name, sql_type }
}

#[derive(Debug, Clone, Copy)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
}

pub const PROPERTIES: Table = Table {
    name: "properties",
    columns: &[
        col("parcel", "TEXT"),
        col("address", "TEXT NOT NULL"),
        col("city", "TEXT NOT NULL"),
        col("coordinates", "TEXT"),
        col("lot_sqft", "INTEGER"),
        col("sqft", "INTEGER"),
        col("state", "TEXT NOT NULL"),
        col("zipcode", "TEXT NOT NULL"),
        col("use_code", "TEXT"),
        col("total_rooms", "INTEGER"),
        col("basement", "TEXT"),
        col("style", "TEXT"),
        col("bedrooms", "INTEGER"),
        col("grade", "TEXT"),
        col("stories", "INTEGER"),
        col("full_baths", "INTEGER"),
        col("half_baths", "INTEGER"),
        col("condition", "TEXT"),
        col("year_built", "INTEGER"),
        col("fireplaces", "INTEGER"),
        col("exterior_finish", "TEXT"),
        col("heating_cooling", "TEXT"),
        col("basement_garage", "INTEGER"),
        col("roof_type", "TEXT"),
        col("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        col("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        col("deleted_at", "TIMESTAMPTZ"),
    ],
    indexes: &[Index {
        name: "idx_properties_address",
        columns: "address, city, state, zipcode",
    }],
};

pub const RENTALS: Table = Table {
    name: "rentals",
    columns: &[
        col("property_id", "INTEGER NOT NULL REFERENCES properties(id)"),
        col("unit", "TEXT"),
        col("sqft", "INTEGER"),
        col("bedrooms", "INTEGER NOT NULL"),
        col("bathrooms", "INTEGER NOT NULL"),
        col("stories", "INTEGER"),
        col("rent_deposit", "DOUBLE PRECISION"),
        col("rent_monthly", "DOUBLE PRECISION"),
        col("listing_date", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        col("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        col("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        col("deleted_at", "TIMESTAMPTZ"),
    ],
    indexes: &[Index {
        name: "idx_rentals_property_id",
        columns: "property_id",
    }],
};

/// Tables in dependency order.
pub const TABLES: &[Table] = &[PROPERTIES, RENTALS];

impl Table {
    /// `id` followed by every declared column, in declaration order.
    pub fn select_list(&self) -> String {
        std::iter::once("id")
            .chain(self.columns.iter().map(|c| c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn create_statement(&self) -> String {
        let columns = std::iter::once("id SERIAL PRIMARY KEY".to_string())
            .chain(self.columns.iter().map(|c| format!("{} {}", c.name, c.sql_type)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    pub fn add_column_statements(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                format!(
                    "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                    self.name, c.name, c.sql_type
                )
            })
            .collect()
    }

    pub fn index_statements(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|i| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    i.name, self.name, i.columns
                )
            })
            .collect()
    }

    pub fn statements(&self) -> Vec<String> {
        let mut statements = vec![self.create_statement()];
        statements.extend(self.add_column_statements());
        statements.extend(self.index_statements());
        statements
    }
}

/// Bring the database in line with [`TABLES`].
pub async fn auto_migrate(db: &Db) -> Result<(), sqlx::Error> {
    for table in TABLES {
        for statement in table.statements() {
            debug!(table = table.name, %statement, "Applying schema statement");
            sqlx::query(&statement).execute(db).await?;
        }
        info!(table = table.name, "Table schema up to date");
    }
    Ok(())
}
