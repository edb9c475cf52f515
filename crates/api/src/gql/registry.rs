//! Entity registrations.
//!
//! Every entity module hands the composer one [`EntityRegistration`]: its
//! object type plus the root operations that belong to it. Object fields are
//! declared through [`EntityType`], which fixes the Rust type behind the
//! GraphQL object when the field is registered; resolvers receive `&T` instead
//! of casting an untyped parent value themselves.
//!
//! Every type a field, argument or operation refers to is recorded so the
//! composer can reject dangling references before the schema is built.

use std::marker::PhantomData;
use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, TypeRef,
};
use async_graphql::Value;
use futures_util::future::BoxFuture;

/// A reference from a field, argument or operation to a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeUse {
    /// `Type.field`, `operation` or `operation(argument)`.
    pub owner: String,
    pub type_name: String,
}

impl TypeUse {
    fn new(owner: String, ty: &TypeRef) -> Self {
        Self {
            owner,
            type_name: ty.type_name().to_string(),
        }
    }
}

/// The parent object of a field, as the concrete type it was registered with.
pub fn source<'a, T: 'static>(ctx: &'a ResolverContext<'_>) -> async_graphql::Result<&'a T> {
    ctx.parent_value.try_downcast_ref::<T>()
}

/// A root field (query or mutation).
pub struct Operation {
    name: String,
    field: Field,
    uses: Vec<TypeUse>,
}

impl Operation {
    pub fn new<F>(name: &str, ty: TypeRef, resolver: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            uses: vec![TypeUse::new(name.to_string(), &ty)],
            field: Field::new(name, ty, resolver),
        }
    }

    pub fn argument(mut self, name: &str, ty: TypeRef) -> Self {
        self.uses
            .push(TypeUse::new(format!("{}({})", self.name, name), &ty));
        self.field = self.field.argument(InputValue::new(name, ty));
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.field = self.field.description(text);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Field, Vec<TypeUse>) {
        (self.name, self.field, self.uses)
    }
}

/// Typed builder for an entity's object type.
pub struct EntityType<T> {
    name: String,
    object: Object,
    uses: Vec<TypeUse>,
    _source: PhantomData<fn(&T)>,
}

impl<T: Send + Sync + 'static> EntityType<T> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            object: Object::new(name),
            uses: Vec::new(),
            _source: PhantomData,
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.object = self.object.description(text);
        self
    }

    /// A leaf field computed from the source row. `None` resolves to `null`.
    pub fn field<F>(self, name: &str, ty: TypeRef, get: F) -> Self
    where
        F: Fn(&T) -> Option<Value> + Send + Sync + 'static,
    {
        let get = Arc::new(get);
        self.push(name, ty, move |ctx| {
            let get = get.clone();
            FieldFuture::new(async move {
                let row = source::<T>(&ctx)?;
                Ok(get(row).map(FieldValue::value))
            })
        })
    }

    /// A field resolving to another registered object. The closure reads what
    /// it needs from the source row and returns an owned future.
    pub fn relation<U, F>(self, name: &str, ty: TypeRef, load: F) -> Self
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> BoxFuture<'static, async_graphql::Result<Option<U>>> + Send + Sync + 'static,
    {
        let load = Arc::new(load);
        self.push(name, ty, move |ctx| {
            let load = load.clone();
            FieldFuture::new(async move {
                let pending = load(source::<T>(&ctx)?);
                Ok(pending.await?.map(FieldValue::owned_any))
            })
        })
    }

    fn push<F>(mut self, name: &str, ty: TypeRef, resolver: F) -> Self
    where
        F: for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync + 'static,
    {
        self.uses
            .push(TypeUse::new(format!("{}.{}", self.name, name), &ty));
        self.object = self.object.field(Field::new(name, ty, resolver));
        self
    }

    pub fn into_registration(self) -> EntityRegistration {
        EntityRegistration {
            name: self.name,
            object: self.object,
            uses: self.uses,
            queries: Vec::new(),
            mutations: Vec::new(),
        }
    }
}

/// One entity's contribution to the schema.
pub struct EntityRegistration {
    name: String,
    object: Object,
    uses: Vec<TypeUse>,
    queries: Vec<Operation>,
    mutations: Vec<Operation>,
}

impl EntityRegistration {
    pub fn query(mut self, operation: Operation) -> Self {
        self.queries.push(operation);
        self
    }

    pub fn mutation(mut self, operation: Operation) -> Self {
        self.mutations.push(operation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn query_names(&self) -> impl Iterator<Item = &str> {
        self.queries.iter().map(Operation::name)
    }

    pub fn mutation_names(&self) -> impl Iterator<Item = &str> {
        self.mutations.iter().map(Operation::name)
    }

    pub(crate) fn into_parts(self) -> RegistrationParts {
        RegistrationParts {
            name: self.name,
            object: self.object,
            uses: self.uses,
            queries: self.queries,
            mutations: self.mutations,
        }
    }
}

pub(crate) struct RegistrationParts {
    pub name: String,
    pub object: Object,
    pub uses: Vec<TypeUse>,
    pub queries: Vec<Operation>,
    pub mutations: Vec<Operation>,
}
