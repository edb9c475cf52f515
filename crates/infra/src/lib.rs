pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod patch;
pub mod repos;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{DynStore, PropertyStore, RentalStore, Store};
