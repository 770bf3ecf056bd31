//! Shared types for the school health console
//!
//! Wire types used by the console client: list queries, response
//! envelopes, pagination helpers, domain records and form payloads.

pub mod models;
pub mod request;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use request::{DEFAULT_PAGE_SIZE, ListQuery, SortDirection};
pub use response::{ApiResponse, ListResponse, PageButton, page_buttons, total_pages};
