//! physique Client Library
//!
//! Provides a typed HTTP client for the physique analysis service.
//!
//! # Example
//!
//! ```rust,no_run
//! use physique_client::PhysiqueClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PhysiqueClient::new("http://localhost:8000")?;
//!
//!     let result = client.analyze_file("portrait.jpg").await?;
//!     println!("{} / {}", result.face_structure, result.body_structure);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides utilities for integration testing:
//!
//! ```rust,ignore
//! use physique_client::testing::TestServer;
//! use physique_api::{create_router, AppState};
//!
//! let server = TestServer::start(|scratch| create_router(AppState::new(scratch))).await?;
//! let result = server.client.analyze_bytes("face.png", bytes).await?;
//! assert!(server.scratch_entries().is_empty());
//! ```

mod client;
mod error;
pub mod testing;

pub use client::{guess_mime, PhysiqueClient};
pub use error::{ClientError, Result};

// Re-export core types for convenience
pub use physique_core::AnalysisResult;
