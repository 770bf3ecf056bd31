//! Data Models
//!
//! Records and payloads exchanged with the school-health backend.

pub mod health_event;
pub mod import;
pub mod medication;
pub mod parent;
pub mod staff;
pub mod user;
pub mod vaccination;

pub use health_event::*;
pub use import::*;
pub use medication::*;
pub use parent::*;
pub use staff::*;
pub use user::*;
pub use vaccination::*;

use thiserror::Error;

/// Returned when a filter value does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
