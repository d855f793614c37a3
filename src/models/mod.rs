//! # Data Models
//!
//! Entity declarations for every resource the Roster API persists, plus the
//! shared soft-deletable [`Record`] shape they are exposed through.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod company;
pub mod record;
pub mod user;

pub use company::{Company, CompanyFields, CompanyPatch};
pub use record::{Lifecycle, Record, SoftDeletable};
pub use user::{User, UserFields, UserPatch};

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "roster".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
