// file: src/database/mod.rs
// description: database operations module exports
// reference: internal module structure

pub mod client;
pub mod schema;

pub use client::LanceDbClient;
pub use schema::{REQUIRED_COLUMNS, SchemaManager};
