use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::dynamic::TypeRef;
use async_graphql::ErrorExtensions;
use futures_util::FutureExt;
use infra::models::RentalRow;

use crate::gql::common::helpers::{int, opt_float, opt_int, opt_text, timestamp, ty};
use crate::gql::domains::properties::PROPERTY;
use crate::gql::error::GqlError;
use crate::gql::loaders::PropertyLoader;
use crate::gql::registry::EntityType;

pub const RENTAL: &str = "Rental";

pub fn rental_type(properties: Arc<DataLoader<PropertyLoader>>) -> EntityType<RentalRow> {
    EntityType::<RentalRow>::new(RENTAL)
        .description("A unit offered for rent within a property")
        .field("id", ty::int_nn(), |r| int(r.id))
        .relation("property", TypeRef::named(PROPERTY), move |r: &RentalRow| {
            let loader = properties.clone();
            let property_id = r.property_id;
            async move {
                loader
                    .load_one(property_id)
                    .await
                    .map_err(|e| GqlError::Loader(e).extend())
            }
            .boxed()
        })
        .field("unit", ty::string(), |r| opt_text(&r.unit))
        .field("sqft", ty::int(), |r| opt_int(r.sqft))
        .field("bedrooms", ty::int_nn(), |r| int(r.bedrooms))
        .field("bathrooms", ty::int_nn(), |r| int(r.bathrooms))
        .field("stories", ty::int(), |r| opt_int(r.stories))
        .field("rentDeposit", ty::float(), |r| opt_float(r.rent_deposit))
        .field("rentMonthly", ty::float(), |r| opt_float(r.rent_monthly))
        .field("listingDate", ty::date_time_nn(), |r| timestamp(&r.listing_date))
        .field("createdAt", ty::date_time_nn(), |r| timestamp(&r.created_at))
        .field("updatedAt", ty::date_time_nn(), |r| timestamp(&r.updated_at))
}
