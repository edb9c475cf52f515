use infra::db::{connect, DbConfig};
use infra::repos::{NewProperty, NewRental, PgStore, PropertyPatch};
use infra::schema::auto_migrate;
use infra::{PropertyStore, RentalStore, Store, StoreError};
use testcontainers_modules::{postgres::Postgres, testcontainers::runners::AsyncRunner};

fn address(street: &str) -> NewProperty {
    NewProperty {
        address: street.to_string(),
        city: "Orlando".to_string(),
        state: "FL".to_string(),
        zipcode: "32801".to_string(),
    }
}

#[tokio::test]
#[ignore = "starts a Postgres container; needs Docker"]
async fn pg_store_round_trip() {
    let node = Postgres::default()
        .start()
        .await
        .expect("Failed to start postgres container");
    let url = format!(
        "postgres://postgres:postgres@{}:{}/postgres",
        node.get_host().await.expect("container host"),
        node.get_host_port_ipv4(5432).await.expect("container port"),
    );

    let db = connect(&DbConfig {
        url,
        max_connections: 2,
    })
    .await
    .expect("Failed to connect to test database");

    auto_migrate(&db).await.expect("first migration");
    // Running it again must be a no-op.
    auto_migrate(&db).await.expect("second migration");

    let store = PgStore::new(db);
    store.ping().await.expect("ping");
    assert!(store.list_properties().await.unwrap().is_empty());

    let created = store.create_property(address("1 Main St")).await.unwrap();
    assert!(created.id > 0);
    let fetched = store.get_property(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.address, "1 Main St");

    let reused = store
        .first_or_create_property(address("1 Main St"))
        .await
        .unwrap();
    assert_eq!(reused.id, created.id);

    let mut patched = fetched.clone();
    PropertyPatch {
        city: Some("Tampa".to_string()).into(),
        ..Default::default()
    }
    .apply(&mut patched)
    .unwrap();
    let updated = store.update_property(&patched).await.unwrap();
    assert_eq!(updated.city, "Tampa");
    assert_eq!(updated.address, "1 Main St");

    let unset = infra::models::PropertyRow { id: 0, ..updated.clone() };
    assert!(matches!(
        store.delete_property(&unset).await,
        Err(StoreError::UnsetId { .. })
    ));
    assert_eq!(store.list_properties().await.unwrap().len(), 1);

    let rental = store
        .create_rental(NewRental {
            property_id: updated.id,
            unit: Some("2B".to_string()),
            sqft: None,
            bedrooms: 2,
            bathrooms: 1,
            stories: None,
            rent_deposit: None,
            rent_monthly: Some(1400.0),
            listing_date: chrono::Utc::now(),
        })
        .await
        .unwrap();
    assert!(matches!(
        store.delete_property(&updated).await,
        Err(StoreError::HasDependents { dependents: "rentals", .. })
    ));
    assert!(store.get_property(created.id).await.unwrap().is_some());
    store.delete_rental(&rental).await.unwrap();

    let deleted = store.delete_property(&updated).await.unwrap();
    assert!(deleted.deleted_at.is_some());
    assert!(store.get_property(created.id).await.unwrap().is_none());
}
