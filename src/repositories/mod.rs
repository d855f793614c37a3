//! # Repository Layer
//!
//! Repository implementations that encapsulate SeaORM operations for the
//! persisted entities.

pub mod resource;

pub use resource::ResourceRepository;
