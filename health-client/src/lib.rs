//! Health Client - admin console client for the school-health backend
//!
//! Provides the HTTP transport, typed resource APIs and the UI-side state
//! of the console screens: paginated lists, dialogs, dynamic form rows and
//! validated forms. Rendering is left to the host UI.

pub mod api;
pub mod config;
pub mod dialog;
pub mod error;
pub mod forms;
pub mod http;
pub mod list;
pub mod logger;
pub mod rows;
pub mod screen;

pub use api::SchoolHealthApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::{ApiResponse, ListQuery, ListResponse, PageButton, SortDirection};
