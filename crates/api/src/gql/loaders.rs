use std::{collections::HashMap, future::Future, sync::Arc};

use async_graphql::dataloader::Loader;
use infra::{models::PropertyRow, DynStore, PropertyStore, StoreError};

/// Batch loads properties by id for `Rental.property`.
#[derive(Clone)]
pub struct PropertyLoader {
    store: DynStore,
}

impl PropertyLoader {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }
}

impl Loader<i32> for PropertyLoader {
    type Value = PropertyRow;
    type Error = Arc<StoreError>;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = std::result::Result<HashMap<i32, Self::Value>, Self::Error>> + Send
    {
        let store = self.store.clone();
        let ids: Vec<i32> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            tracing::debug!(count = ids.len(), "Loading properties");
            let rows = store.properties_by_ids(&ids).await.map_err(Arc::new)?;

            Ok(rows.into_iter().map(|r| (r.id, r)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::dataloader::DataLoader;
    use infra::memory::MemoryStore;
    use infra::repos::NewProperty;

    use super::*;

    fn new_property(address: &str) -> NewProperty {
        NewProperty {
            address: address.into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zipcode: "62701".into(),
        }
    }

    #[tokio::test]
    async fn loads_live_properties_only() {
        let store = Arc::new(MemoryStore::new());
        let kept = store.create_property(new_property("1 Elm St")).await.unwrap();
        let gone = store.create_property(new_property("2 Elm St")).await.unwrap();
        store.delete_property(&gone).await.unwrap();

        let loader = DataLoader::new(PropertyLoader::new(store), tokio::spawn);
        let found = loader.load_many([kept.id, gone.id, 99]).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found.get(&kept.id), Some(&kept));
    }
}
