pub mod resolvers;
pub mod types;

use async_graphql::dynamic::TypeRef;

use crate::gql::common::helpers::ty;
use crate::gql::registry::{EntityRegistration, Operation};
use crate::state::AppState;

pub use types::PROPERTY;

/// `Property` with its lookups and the `create`/`update`/`delete` mutations.
pub fn registration(state: &AppState) -> EntityRegistration {
    let store = state.store.clone();

    types::property_type()
        .into_registration()
        .query(
            Operation::new("property", TypeRef::named(PROPERTY), resolvers::property(store.clone()))
                .description("Property by id; null when the id is missing or unknown")
                .argument("id", ty::int()),
        )
        .query(Operation::new(
            "properties",
            TypeRef::named_nn_list_nn(PROPERTY),
            resolvers::properties(store.clone()),
        ))
        .mutation(
            Operation::new("create", TypeRef::named(PROPERTY), resolvers::create(store.clone()))
                .argument("address", ty::string_nn())
                .argument("city", ty::string_nn())
                .argument("state", ty::string_nn())
                .argument("zipcode", ty::string_nn()),
        )
        .mutation(
            Operation::new("update", TypeRef::named(PROPERTY), resolvers::update(store.clone()))
                .description("Overwrites only the supplied fields")
                .argument("id", ty::int_nn())
                .argument("address", ty::string())
                .argument("city", ty::string())
                .argument("state", ty::string())
                .argument("zipcode", ty::string()),
        )
        .mutation(
            Operation::new("delete", TypeRef::named(PROPERTY), resolvers::delete(store))
                .argument("id", ty::int_nn()),
        )
}
