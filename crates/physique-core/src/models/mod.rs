//! Shared data models

mod analysis;

pub use analysis::*;
