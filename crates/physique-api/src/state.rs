//! Application state for the API

use std::sync::Arc;
use std::time::Duration;

use physique_core::{Analyzer, PlaceholderAnalyzer, ScratchDir};

/// Limits applied to incoming uploads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum request body size in bytes (`None` = unlimited)
    pub max_bytes: Option<usize>,
    /// Maximum time to handle one request (`None` = no timeout)
    pub request_timeout: Option<Duration>,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<dyn Analyzer>,
    scratch: Arc<ScratchDir>,
    limits: UploadLimits,
}

impl AppState {
    /// Create a new AppState using the placeholder analyzer
    pub fn new(scratch: ScratchDir) -> Self {
        Self::with_analyzer(scratch, Arc::new(PlaceholderAnalyzer))
    }

    /// Create a new AppState with a specific analyzer
    pub fn with_analyzer(scratch: ScratchDir, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            scratch: Arc::new(scratch),
            limits: UploadLimits::default(),
        }
    }

    /// Replace the upload limits
    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the analyzer
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Get the scratch directory
    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Get the upload limits
    pub fn limits(&self) -> UploadLimits {
        self.limits
    }
}
