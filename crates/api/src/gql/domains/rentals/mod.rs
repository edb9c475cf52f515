pub mod resolvers;
pub mod types;

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::dynamic::TypeRef;

use crate::gql::common::helpers::ty;
use crate::gql::loaders::PropertyLoader;
use crate::gql::registry::{EntityRegistration, Operation};
use crate::state::AppState;

pub use types::RENTAL;

/// `Rental`, its lookups and lifecycle mutations. `Rental.property` is served
/// through a per-schema batching loader.
pub fn registration(state: &AppState) -> EntityRegistration {
    let store = state.store.clone();
    let properties = Arc::new(DataLoader::new(PropertyLoader::new(store.clone()), tokio::spawn));

    types::rental_type(properties)
        .into_registration()
        .query(
            Operation::new("rental", TypeRef::named(RENTAL), resolvers::rental(store.clone()))
                .description("Rental by id; null when the id is missing or unknown")
                .argument("id", ty::int()),
        )
        .query(Operation::new(
            "rentals",
            TypeRef::named_nn_list_nn(RENTAL),
            resolvers::rentals(store.clone()),
        ))
        .mutation(
            Operation::new(
                "createRental",
                TypeRef::named(RENTAL),
                resolvers::create_rental(store.clone()),
            )
            .description("Creates a rental, reusing the property at the same address when one exists")
            .argument("address", ty::string_nn())
            .argument("city", ty::string_nn())
            .argument("state", ty::string_nn())
            .argument("zipcode", ty::string_nn())
            .argument("bedrooms", ty::int_nn())
            .argument("bathrooms", ty::int_nn())
            .argument("unit", ty::string())
            .argument("sqft", ty::int())
            .argument("stories", ty::int())
            .argument("rentDeposit", ty::float())
            .argument("rentMonthly", ty::float()),
        )
        .mutation(
            Operation::new(
                "updateRental",
                TypeRef::named(RENTAL),
                resolvers::update_rental(store.clone()),
            )
            .description("Overwrites only the supplied fields")
            .argument("id", ty::int_nn())
            .argument("unit", ty::string())
            .argument("sqft", ty::int())
            .argument("bedrooms", ty::int())
            .argument("bathrooms", ty::int())
            .argument("stories", ty::int())
            .argument("rentDeposit", ty::float())
            .argument("rentMonthly", ty::float()),
        )
        .mutation(
            Operation::new("deleteRental", TypeRef::named(RENTAL), resolvers::delete_rental(store))
                .argument("id", ty::int_nn()),
        )
}
