use infra::models::PropertyRow;

use crate::gql::common::helpers::{int, opt_int, opt_text, text, timestamp, ty};
use crate::gql::registry::EntityType;

pub const PROPERTY: &str = "Property";

pub fn property_type() -> EntityType<PropertyRow> {
    EntityType::<PropertyRow>::new(PROPERTY)
        .description("A parcel of real estate")
        .field("id", ty::int_nn(), |p| int(p.id))
        .field("parcel", ty::string(), |p| opt_text(&p.parcel))
        .field("address", ty::string_nn(), |p| text(&p.address))
        .field("city", ty::string_nn(), |p| text(&p.city))
        .field("state", ty::string_nn(), |p| text(&p.state))
        .field("zipcode", ty::string_nn(), |p| text(&p.zipcode))
        .field("coordinates", ty::string(), |p| opt_text(&p.coordinates))
        .field("lotSqft", ty::int(), |p| opt_int(p.lot_sqft))
        .field("sqft", ty::int(), |p| opt_int(p.sqft))
        .field("useCode", ty::string(), |p| opt_text(&p.use_code))
        .field("totalRooms", ty::int(), |p| opt_int(p.total_rooms))
        .field("basement", ty::string(), |p| opt_text(&p.basement))
        .field("style", ty::string(), |p| opt_text(&p.style))
        .field("bedrooms", ty::int(), |p| opt_int(p.bedrooms))
        .field("grade", ty::string(), |p| opt_text(&p.grade))
        .field("stories", ty::int(), |p| opt_int(p.stories))
        .field("fullBaths", ty::int(), |p| opt_int(p.full_baths))
        .field("halfBaths", ty::int(), |p| opt_int(p.half_baths))
        .field("condition", ty::string(), |p| opt_text(&p.condition))
        .field("yearBuilt", ty::int(), |p| opt_int(p.year_built))
        .field("fireplaces", ty::int(), |p| opt_int(p.fireplaces))
        .field("exteriorFinish", ty::string(), |p| opt_text(&p.exterior_finish))
        .field("heatingCooling", ty::string(), |p| opt_text(&p.heating_cooling))
        .field("basementGarage", ty::int(), |p| opt_int(p.basement_garage))
        .field("roofType", ty::string(), |p| opt_text(&p.roof_type))
        .field("createdAt", ty::date_time_nn(), |p| timestamp(&p.created_at))
        .field("updatedAt", ty::date_time_nn(), |p| timestamp(&p.updated_at))
}
