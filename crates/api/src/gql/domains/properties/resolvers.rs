//! Root operations on `Property`.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use infra::models::PropertyRow;
use infra::repos::{NewProperty, PropertyPatch};
use infra::{DynStore, PropertyStore};
use tracing::debug;

use crate::gql::args::{lenient_id, patch_string, required_id, required_string};
use crate::gql::domains::{ensure_persisted_id, not_found};
use crate::gql::error::IntoGqlResult;

pub fn property(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let Some(id) = lenient_id(&ctx.args) else {
                debug!("property: no usable id, resolving to null");
                return Ok(None);
            };
            debug!(id, "Resolving property");

            let row = store.get_property(id).await.into_gql()?;
            Ok(row.map(FieldValue::owned_any))
        })
    }
}

pub fn properties(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |_ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let rows = store.list_properties().await.into_gql()?;
            debug!(count = rows.len(), "Listing properties");
            Ok(Some(FieldValue::list(rows.into_iter().map(FieldValue::owned_any))))
        })
    }
}

pub fn create(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let data = NewProperty {
                address: required_string(&ctx.args, "address")?,
                city: required_string(&ctx.args, "city")?,
                state: required_string(&ctx.args, "state")?,
                zipcode: required_string(&ctx.args, "zipcode")?,
            };
            let row = store.create_property(data).await.into_gql()?;
            debug!(id = row.id, "Created property");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}

pub fn update(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let id = required_id(&ctx.args)?;
            let patch = PropertyPatch {
                address: patch_string(&ctx.args, "address")?,
                city: patch_string(&ctx.args, "city")?,
                state: patch_string(&ctx.args, "state")?,
                zipcode: patch_string(&ctx.args, "zipcode")?,
            };

            let mut row = store
                .get_property(id)
                .await
                .into_gql()?
                .ok_or_else(|| not_found(PropertyRow::ENTITY, id))?;
            patch.apply(&mut row).into_gql()?;

            let row = store.update_property(&row).await.into_gql()?;
            debug!(id, "Updated property");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}

pub fn delete(store: DynStore) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let store = store.clone();
        FieldFuture::new(async move {
            let id = required_id(&ctx.args)?;
            let row = store
                .get_property(id)
                .await
                .into_gql()?
                .ok_or_else(|| not_found(PropertyRow::ENTITY, id))?;
            ensure_persisted_id(PropertyRow::ENTITY, row.id)?;

            let row = store.delete_property(&row).await.into_gql()?;
            debug!(id, "Deleted property");
            Ok(Some(FieldValue::owned_any(row)))
        })
    }
}
