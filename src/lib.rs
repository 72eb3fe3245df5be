//! # People API
//!
//! A small person registry served over HTTP and backed by SQLite.
//!
//! ## Core Components
//!
//! - **Record Store (db)**: one parameterized statement per operation
//! - **Table Initializer (schema)**: idempotent `CREATE TABLE IF NOT EXISTS`
//! - **People API (api)**: create/list/update/delete handlers via Axum
//! - **API Docs (docs)**: OpenAPI document and Swagger UI at `/docs`

pub mod api;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod schema;

pub use error::{PeopleError, PeopleResult};
