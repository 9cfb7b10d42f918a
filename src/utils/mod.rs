//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: shared HTTP client, optionally with a request timeout
//!
//! ```rust,no_run
//! use librarycloud_search::utils::HttpClient;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::builder()
//!     .timeout(Some(Duration::from_secs(20)))
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpClient, HttpClientBuilder, DEFAULT_USER_AGENT};
