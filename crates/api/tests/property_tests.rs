mod common;

use async_graphql::Variables;
use common::*;
use serde_json::json;

const PROPERTY_FIELDS: &str = "id address city state zipcode parcel sqft createdAt updatedAt";

#[tokio::test]
async fn test_create_then_fetch_returns_same_data() {
    let app = setup_test_app();

    let query = format!(
        r#"mutation {{
            create(address: "12 Oak St", city: "Dayton", state: "OH", zipcode: "45402") {{ {PROPERTY_FIELDS} }}
        }}"#
    );
    let created = execute_ok(&app.schema, &query).await["create"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 0, "Persisted id should be non-zero");

    let query = format!("{{ property(id: {id}) {{ {PROPERTY_FIELDS} }} }}");
    let fetched = execute_ok(&app.schema, &query).await["property"].clone();

    assert_eq!(fetched, created);
    assert_eq!(fetched["address"], "12 Oak St");
    assert_eq!(fetched["parcel"], json!(null));
}

#[tokio::test]
async fn test_update_leaves_unsupplied_fields_unchanged() {
    let app = setup_test_app();
    let id = create_test_property(&app.schema, "A", "B", "OH", "45402").await;

    let query = format!(r#"mutation {{ update(id: {id}, city: "C") {{ address city state zipcode }} }}"#);
    let updated = execute_ok(&app.schema, &query).await;

    assert_eq!(
        updated["update"],
        json!({ "address": "A", "city": "C", "state": "OH", "zipcode": "45402" })
    );

    let query = format!("{{ property(id: {id}) {{ address city }} }}");
    let fetched = execute_ok(&app.schema, &query).await;
    assert_eq!(fetched["property"], json!({ "address": "A", "city": "C" }));
}

#[tokio::test]
async fn test_update_with_variables() {
    let app = setup_test_app();
    let id = create_test_property(&app.schema, "A", "B", "OH", "45402").await;

    let query = r#"
        mutation Move($id: Int!, $zipcode: String) {
            update(id: $id, zipcode: $zipcode) { zipcode city }
        }
    "#;
    let variables = Variables::from_json(json!({ "id": id, "zipcode": "45410" }));
    let response = execute_graphql(&app.schema, query, Some(variables)).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["update"], json!({ "zipcode": "45410", "city": "B" }));
}

#[tokio::test]
async fn test_update_rejects_null_for_required_field() {
    let app = setup_test_app();
    let id = create_test_property(&app.schema, "A", "B", "OH", "45402").await;

    let query = format!(r#"mutation {{ update(id: {id}, address: "Z", city: null) {{ id }} }}"#);
    let response = execute_graphql(&app.schema, &query, None).await;

    assert_eq!(error_codes(&response), ["VALIDATION_ERROR"]);
    assert_eq!(response.data.into_json().unwrap()["update"], json!(null));

    let query = format!("{{ property(id: {id}) {{ address city }} }}");
    let fetched = execute_ok(&app.schema, &query).await;
    assert_eq!(
        fetched["property"],
        json!({ "address": "A", "city": "B" }),
        "Nothing should be persisted when validation fails"
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = setup_test_app();

    let response = execute_graphql(
        &app.schema,
        r#"mutation { update(id: 42, city: "C") { id } }"#,
        None,
    )
    .await;

    assert_eq!(error_codes(&response), ["NOT_FOUND"]);
    assert_eq!(response.errors[0].message, "Property 42 not found");
    assert_eq!(response.data.into_json().unwrap(), json!({ "update": null }));
}

#[tokio::test]
async fn test_delete_returns_last_state_and_hides_row() {
    let app = setup_test_app();
    let id = create_test_property(&app.schema, "9 Pine Rd", "Akron", "OH", "44308").await;

    let query = format!("mutation {{ delete(id: {id}) {{ id address }} }}");
    let deleted = execute_ok(&app.schema, &query).await;
    assert_eq!(deleted["delete"], json!({ "id": id, "address": "9 Pine Rd" }));

    let query = format!("{{ property(id: {id}) {{ id }} properties {{ id }} }}");
    let data = execute_ok(&app.schema, &query).await;
    assert_eq!(data, json!({ "property": null, "properties": [] }));

    // A second delete finds nothing
    let query = format!("mutation {{ delete(id: {id}) {{ id }} }}");
    let response = execute_graphql(&app.schema, &query, None).await;
    assert_eq!(error_codes(&response), ["NOT_FOUND"]);
}

#[tokio::test]
async fn test_delete_with_zero_id_leaves_table_unchanged() {
    let app = setup_test_app();
    create_test_property(&app.schema, "1 First St", "Dayton", "OH", "45402").await;
    create_test_property(&app.schema, "2 Second St", "Dayton", "OH", "45402").await;

    let listing = "{ properties { id address city state zipcode updatedAt } }";
    let before = execute_ok(&app.schema, listing).await;

    let response = execute_graphql(&app.schema, "mutation { delete(id: 0) { id } }", None).await;
    assert!(!response.errors.is_empty(), "Deleting id 0 must fail");
    assert_eq!(response.data.into_json().unwrap(), json!({ "delete": null }));

    let after = execute_ok(&app.schema, listing).await;
    assert_eq!(after, before);
    assert_eq!(after["properties"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_properties_on_empty_table_is_empty_list() {
    let app = setup_test_app();

    let data = execute_ok(&app.schema, "{ properties { id } }").await;
    assert_eq!(data, json!({ "properties": [] }));
}

#[tokio::test]
async fn test_properties_lists_in_id_order() {
    let app = setup_test_app();
    let first = create_test_property(&app.schema, "1 First St", "Dayton", "OH", "45402").await;
    let second = create_test_property(&app.schema, "2 Second St", "Dayton", "OH", "45402").await;

    let data = execute_ok(&app.schema, "{ properties { id } }").await;
    assert_eq!(data["properties"], json!([{ "id": first }, { "id": second }]));
}

#[tokio::test]
async fn test_property_lookup_is_lenient() {
    let app = setup_test_app();
    create_test_property(&app.schema, "1 First St", "Dayton", "OH", "45402").await;

    for query in [
        "{ property { id } }",
        "{ property(id: null) { id } }",
        "{ property(id: 999) { id } }",
    ] {
        let data = execute_ok(&app.schema, query).await;
        assert_eq!(data, json!({ "property": null }), "{query}");
    }
}

#[tokio::test]
async fn test_create_requires_address_fields() {
    let app = setup_test_app();

    let response = execute_graphql(
        &app.schema,
        r#"mutation { create(address: "1 First St", city: "Dayton", state: "OH") { id } }"#,
        None,
    )
    .await;

    assert!(!response.errors.is_empty(), "Missing zipcode should be rejected");
    assert_eq!(app.store.property_row_count(), 0);
}
