pub mod args;
pub mod common;
pub mod composer;
pub mod domains;
pub mod error;
pub mod loaders;
pub mod registry;
pub mod schema;

pub use composer::{ComposeError, SchemaComposer};
pub use schema::build_schema;
