//! # LibraryCloud Search
//!
//! Search the Harvard LibraryCloud item API and render the returned Dublin
//! Core records as HTML fragments.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Wire types, display records and the validated search query
//! - [`sources`]: The catalog source trait and the LibraryCloud HTTP source
//! - [`render`]: Pure HTML rendering and the results containers it writes to
//! - [`flow`]: Input guard → request → render, with user notices on failure
//! - [`ui`]: Notices, status lines and the request spinner
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod config;
pub mod flow;
pub mod models;
pub mod render;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use flow::{SearchError, SearchFlow, SearchOutcome};
pub use models::{ResultItem, ResultSet, SearchQuery};
pub use sources::{CatalogSource, LibraryCloudSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
