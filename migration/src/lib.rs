//! Schema reconciliation for the Roster API.
//!
//! Rather than a list of versioned migrations, storage is brought in line
//! with the declared entities at startup: missing tables are created and
//! missing columns are added. Nothing is ever dropped or renamed, so rows
//! written under an older declaration survive a shrinking one.

pub use sea_orm_migration::prelude::*;

mod additive;

pub use additive::{EnsureOutcome, ensure_entity, ensure_table};
