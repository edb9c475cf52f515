//! Merges entity registrations into the `Query` and `Mutation` roots.
//!
//! Composition runs once at startup. Every problem it can detect (a type
//! declared twice, a root operation declared by two entities, a reference to
//! a type nobody provides) is reported here so the process never starts
//! serving a broken schema.

use std::collections::{HashMap, HashSet};
use std::fmt;

use async_graphql::dynamic::{Object, Scalar, Schema, SchemaBuilder, TypeRef};
use thiserror::Error;
use tracing::{debug, info};

use super::registry::{EntityRegistration, Operation, TypeUse};

pub const QUERY: &str = "Query";
pub const MUTATION: &str = "Mutation";
pub const DATE_TIME: &str = "DateTime";

const BUILTIN_SCALARS: &[&str] = &[
    TypeRef::INT,
    TypeRef::FLOAT,
    TypeRef::STRING,
    TypeRef::BOOLEAN,
    TypeRef::ID,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Query,
    Mutation,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Query => f.write_str(QUERY),
            RootKind::Mutation => f.write_str(MUTATION),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("{root} operation `{name}` is declared by both `{first}` and `{second}`")]
    DuplicateOperation {
        root: RootKind,
        name: String,
        first: String,
        second: String,
    },

    #[error("`{owner}` refers to unknown type `{type_name}`")]
    UnknownType { owner: String, type_name: String },

    #[error("no query operations registered")]
    EmptyQuery,

    #[error("schema validation failed: {0}")]
    Invalid(String),
}

pub struct SchemaComposer {
    scalars: Vec<(&'static str, &'static str)>,
    entities: Vec<EntityRegistration>,
}

impl Default for SchemaComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaComposer {
    pub fn new() -> Self {
        Self {
            scalars: vec![(DATE_TIME, "An RFC 3339 timestamp")],
            entities: Vec::new(),
        }
    }

    pub fn register(mut self, entity: EntityRegistration) -> Self {
        debug!(entity = entity.name(), "Registering entity");
        self.entities.push(entity);
        self
    }

    /// Validate the registrations and assemble the root objects. The caller
    /// adds data and limits and calls `finish`; see [`finish`].
    pub fn compose(self) -> Result<SchemaBuilder, ComposeError> {
        let mut known: HashSet<String> = BUILTIN_SCALARS.iter().map(|s| s.to_string()).collect();
        known.insert(QUERY.to_string());
        known.insert(MUTATION.to_string());
        for (name, _) in &self.scalars {
            known.insert(name.to_string());
        }

        let entities: Vec<_> = self
            .entities
            .into_iter()
            .map(EntityRegistration::into_parts)
            .collect();

        for entity in &entities {
            if !known.insert(entity.name.clone()) {
                return Err(ComposeError::DuplicateType {
                    name: entity.name.clone(),
                });
            }
        }

        let mut uses: Vec<TypeUse> = Vec::new();
        let mut query = RootFields::new(RootKind::Query);
        let mut mutation = RootFields::new(RootKind::Mutation);
        let mut objects = Vec::with_capacity(entities.len());

        for entity in entities {
            uses.extend(entity.uses);
            for operation in entity.queries {
                uses.extend(query.insert(&entity.name, operation)?);
            }
            for operation in entity.mutations {
                uses.extend(mutation.insert(&entity.name, operation)?);
            }
            objects.push(entity.object);
        }

        if let Some(unknown) = uses.into_iter().find(|u| !known.contains(&u.type_name)) {
            return Err(ComposeError::UnknownType {
                owner: unknown.owner,
                type_name: unknown.type_name,
            });
        }

        if query.is_empty() {
            return Err(ComposeError::EmptyQuery);
        }

        info!(
            entities = objects.len(),
            queries = query.len(),
            mutations = mutation.len(),
            "Composed GraphQL roots"
        );

        let mut builder = Schema::build(
            QUERY,
            (!mutation.is_empty()).then_some(MUTATION),
            None,
        );
        for (name, description) in self.scalars {
            builder = builder.register(Scalar::new(name).description(description));
        }
        for object in objects {
            builder = builder.register(object);
        }
        builder = builder.register(query.object);
        if !mutation.is_empty() {
            builder = builder.register(mutation.object);
        }
        Ok(builder)
    }
}

/// Run the execution engine's own validation on a composed builder.
pub fn finish(builder: SchemaBuilder) -> Result<Schema, ComposeError> {
    builder
        .finish()
        .map_err(|e| ComposeError::Invalid(e.to_string()))
}

struct RootFields {
    kind: RootKind,
    object: Object,
    owners: HashMap<String, String>,
}

impl RootFields {
    fn new(kind: RootKind) -> Self {
        Self {
            kind,
            object: Object::new(kind.to_string()),
            owners: HashMap::new(),
        }
    }

    fn insert(&mut self, entity: &str, operation: Operation) -> Result<Vec<TypeUse>, ComposeError> {
        let (name, field, uses) = operation.into_parts();
        if let Some(first) = self.owners.get(&name) {
            return Err(ComposeError::DuplicateOperation {
                root: self.kind,
                name,
                first: first.clone(),
                second: entity.to_string(),
            });
        }
        self.owners.insert(name, entity.to_string());
        self.object = std::mem::replace(&mut self.object, Object::new(self.kind.to_string())).field(field);
        Ok(uses)
    }

    fn len(&self) -> usize {
        self.owners.len()
    }

    fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::dynamic::{FieldFuture, ResolverContext};
    use async_graphql::Value;

    use super::*;
    use crate::gql::registry::EntityType;

    struct Row;

    fn noop(_: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async { Ok(None::<Value>) })
    }

    fn entity(name: &str) -> EntityRegistration {
        EntityType::<Row>::new(name)
            .field("id", TypeRef::named_nn(TypeRef::INT), |_| Some(Value::from(1)))
            .into_registration()
    }

    fn lookup(name: &str, ty: &str) -> Operation {
        Operation::new(name, TypeRef::named(ty), noop).argument("id", TypeRef::named(TypeRef::INT))
    }

    #[test]
    fn duplicate_mutation_name_is_rejected() {
        let err = SchemaComposer::new()
            .register(
                entity("House")
                    .query(lookup("house", "House"))
                    .mutation(Operation::new("create", TypeRef::named("House"), noop)),
            )
            .register(
                entity("Shed")
                    .query(lookup("shed", "Shed"))
                    .mutation(Operation::new("create", TypeRef::named("Shed"), noop)),
            )
            .compose()
            .err()
            .unwrap();

        assert_eq!(
            err,
            ComposeError::DuplicateOperation {
                root: RootKind::Mutation,
                name: "create".into(),
                first: "House".into(),
                second: "Shed".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Mutation operation `create` is declared by both `House` and `Shed`"
        );
    }

    #[test]
    fn duplicate_query_name_is_rejected() {
        let err = SchemaComposer::new()
            .register(entity("House").query(lookup("find", "House")))
            .register(entity("Shed").query(lookup("find", "Shed")))
            .compose()
            .err()
            .unwrap();

        assert!(matches!(
            err,
            ComposeError::DuplicateOperation { root: RootKind::Query, ref name, .. } if name == "find"
        ));
    }

    #[test]
    fn same_name_on_different_roots_is_allowed() {
        let schema = SchemaComposer::new()
            .register(
                entity("House")
                    .query(lookup("house", "House"))
                    .mutation(Operation::new("house", TypeRef::named("House"), noop)),
            )
            .compose()
            .and_then(finish);
        assert!(schema.is_ok());
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let err = SchemaComposer::new()
            .register(entity("House").query(lookup("house", "House")))
            .register(entity("House").query(lookup("otherHouse", "House")))
            .compose()
            .err()
            .unwrap();
        assert_eq!(err, ComposeError::DuplicateType { name: "House".into() });
    }

    #[test]
    fn reserved_root_names_cannot_be_entities() {
        let err = SchemaComposer::new()
            .register(entity("Query").query(lookup("q", "Query")))
            .compose()
            .err()
            .unwrap();
        assert_eq!(err, ComposeError::DuplicateType { name: "Query".into() });
    }

    #[test]
    fn unknown_types_are_rejected() {
        let err = SchemaComposer::new()
            .register(entity("House").query(lookup("house", "Garage")))
            .compose()
            .err()
            .unwrap();
        assert_eq!(
            err,
            ComposeError::UnknownType {
                owner: "house".into(),
                type_name: "Garage".into(),
            }
        );

        let err = SchemaComposer::new()
            .register(
                entity("House")
                    .query(Operation::new("house", TypeRef::named("House"), noop).argument("near", TypeRef::named("Point"))),
            )
            .compose()
            .err()
            .unwrap();
        assert!(matches!(err, ComposeError::UnknownType { ref owner, .. } if owner == "house(near)"));
    }

    #[test]
    fn schema_needs_a_query() {
        let err = SchemaComposer::new()
            .register(entity("House").mutation(Operation::new("build", TypeRef::named("House"), noop)))
            .compose()
            .err()
            .unwrap();
        assert_eq!(err, ComposeError::EmptyQuery);
    }

    #[test]
    fn scalars_are_registered() {
        let schema = SchemaComposer::new()
            .register(entity("House").query(lookup("house", "House")))
            .register(
                EntityType::<Row>::new("Clock")
                    .field("now", TypeRef::named_nn(DATE_TIME), |_| None)
                    .into_registration()
                    .query(Operation::new("clock", TypeRef::named("Clock"), noop)),
            )
            .compose()
            .and_then(finish);
        assert!(schema.is_ok());
    }

    #[test]
    fn engine_validation_failure_is_invalid() {
        let err = SchemaComposer::new()
            .register(entity("House").query(lookup("house", "House")))
            .register(
                EntityType::<Row>::new("Empty")
                    .into_registration()
                    .query(Operation::new("empty", TypeRef::named("Empty"), noop)),
            )
            .compose()
            .and_then(finish)
            .err()
            .unwrap();

        match err {
            ComposeError::Invalid(message) => assert!(message.contains("Empty"), "{message}"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
