//! Root operations on `Rental`.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use chrono::Utc;
use infra::models::RentalRow;
use infra::repos::{NewProperty, NewRental, RentalPatch};
use infra::{DynStore, PropertyStore, RentalStore};
use tracing::debug;

use crate::gql::args::{
    lenient_id, optional_f64, optional_i32, optional_string, patch_f64, patch_i32, patch_string,
    required_i32, required_id, required_string,
};
use crate::gql::domains::{ensure_persisted_id, not_found};
use crate::gql::error::IntoGqlResult;

pub fn rental(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let Some(id) = lenient_id(&ctx.args) else {
                debug!("rental: no usable id, resolving to null");
                return Ok(None);
            };
            debug!(id, "Resolving rental");

            let row = store.get_rental(id).await.into_gql()?;
            Ok(row.map(FieldValue::owned_any))
        })
    }
}

pub fn rentals(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |_ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let rows = store.list_rentals().await.into_gql()?;
            debug!(count = rows.len(), "Listing rentals");
            Ok(Some(FieldValue::list(rows.into_iter().map(FieldValue::owned_any))))
        })
    }
}

/// Resolves the owning property by address (creating it on a miss), then
/// creates the rental under it. The two steps are not one transaction.
pub fn create_rental(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let args = &ctx.args;
            let address = NewProperty {
                address: required_string(args, "address")?,
                city: required_string(args, "city")?,
                state: required_string(args, "state")?,
                zipcode: required_string(args, "zipcode")?,
            };
            let bedrooms = required_i32(args, "bedrooms")?;
            let bathrooms = required_i32(args, "bathrooms")?;
            let unit = optional_string(args, "unit")?;
            let sqft = optional_i32(args, "sqft")?;
            let stories = optional_i32(args, "stories")?;
            let rent_deposit = optional_f64(args, "rentDeposit")?;
            let rent_monthly = optional_f64(args, "rentMonthly")?;

            let property = store.first_or_create_property(address).await.into_gql()?;
            debug!(property_id = property.id, "Resolved property for rental");

            let row = store
                .create_rental(NewRental {
                    property_id: property.id,
                    unit,
                    sqft,
                    bedrooms,
                    bathrooms,
                    stories,
                    rent_deposit,
                    rent_monthly,
                    listing_date: Utc::now(),
                })
                .await
                .into_gql()?;
            debug!(id = row.id, "Created rental");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}

pub fn update_rental(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let args = &ctx.args;
            let id = required_id(args)?;
            let patch = RentalPatch {
                unit: patch_string(args, "unit")?,
                sqft: patch_i32(args, "sqft")?,
                bedrooms: patch_i32(args, "bedrooms")?,
                bathrooms: patch_i32(args, "bathrooms")?,
                stories: patch_i32(args, "stories")?,
                rent_deposit: patch_f64(args, "rentDeposit")?,
                rent_monthly: patch_f64(args, "rentMonthly")?,
            };

            let mut row = store
                .get_rental(id)
                .await
                .into_gql()?
                .ok_or_else(|| not_found(RentalRow::ENTITY, id))?;
            patch.apply(&mut row).into_gql()?;

            let row = store.update_rental(&row).await.into_gql()?;
            debug!(id, "Updated rental");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}

pub fn delete_rental(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let id = required_id(&ctx.args)?;
            let row = store
                .get_rental(id)
                .await
                .into_gql()?
                .ok_or_else(|| not_found(RentalRow::ENTITY, id))?;
            ensure_persisted_id(RentalRow::ENTITY, row.id)?;

            let row = store.delete_rental(&row).await.into_gql()?;
            debug!(id, "Deleted rental");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}
