//! # Roster API Library
//!
//! Core of the Roster service: entity declarations, schema
//! synchronization, the generic soft-delete repository and the HTTP
//! handlers built on it.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod telemetry;
pub use migration;
