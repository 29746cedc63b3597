//! facectl Core - client library for a face detection and recognition web API.
//!
//! Provides a typed API client, config bootstrap, single-image enrollment,
//! bounded-concurrency batch enrollment and training-session polling.
//!
//! # Architecture
//!
//! ```text
//! Config → FaceppClient (FaceApi) → enroll / BatchUploader / training
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use facectl_core::{Config, FaceppClient, LoadOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let LoadOutcome::Ready(config) = Config::load_or_bootstrap(&Config::default_path())? else {
//!         return Ok(());
//!     };
//!     let client = FaceppClient::from_config(&config.faceplusplus);
//!     let enrolled = facectl_core::enroll::enroll_from_url(&client, "Alice", "http://x/y.jpg").await?;
//!     println!("added {} face", enrolled.added);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod batch;
pub mod config;
pub mod enroll;
pub mod error;
pub mod training;

// Re-exports for convenient access
pub use api::{FaceApi, FaceppClient};
pub use batch::{BatchSummary, BatchUploader, EnrollOutcome};
pub use config::{Config, FaceppConfig, LoadOutcome};
pub use enroll::Enrolled;
pub use error::{ApiError, BatchError, ConfigError, EnrollError, TrainingError};
pub use training::PollOptions;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
