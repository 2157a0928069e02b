//! Command implementations for physique-cli

pub mod analyze;

pub use analyze::analyze;
