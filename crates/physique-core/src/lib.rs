//! physique-core - Core traits and types for the physique analysis service
//!
//! This crate provides the pieces the HTTP layer is built on: the
//! [`AnalysisResult`] record, the [`Analyzer`] trait that produces it, and the
//! scratch directory that stages uploaded images for the lifetime of a single
//! request.

pub mod analyzer;
pub mod error;
pub mod models;
pub mod scratch;

pub use analyzer::{Analyzer, PlaceholderAnalyzer};
pub use error::{AnalyzerError, ScratchError, ScratchResult};
pub use models::*;
pub use scratch::{ScratchDir, StagedFile, STAGED_EXTENSION};
