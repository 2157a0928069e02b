//! HTTP request handlers
//!
//! Handlers depend only on the [`Analyzer`](physique_core::Analyzer) trait and
//! the scratch directory held in [`AppState`](crate::AppState).

pub mod analyze;
