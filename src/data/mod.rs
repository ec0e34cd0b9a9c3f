//! Data layer module
//!
//! Handles all data persistence in SQLite:
//! - Credential store (users)
//! - Follow graph store
//! - Tweet store

mod database;
mod follows;
mod models;
mod tweets;
mod users;

pub use database::Database;
pub use models::*;
