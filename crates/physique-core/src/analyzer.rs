//! Analyzer trait - the seam where an image model plugs in

use async_trait::async_trait;

use crate::error::AnalyzerError;
use crate::models::AnalysisResult;
use crate::scratch::StagedFile;

/// Produces an [`AnalysisResult`] for a staged image
///
/// The staged file is only valid for the duration of the call; implementations
/// must not keep its path around.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Analyze the staged image
    async fn analyze(&self, image: &StagedFile) -> Result<AnalysisResult, AnalyzerError>;
}

/// Analyzer that ignores the image and returns [`AnalysisResult::placeholder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAnalyzer;

#[async_trait]
impl Analyzer for PlaceholderAnalyzer {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn analyze(&self, image: &StagedFile) -> Result<AnalysisResult, AnalyzerError> {
        tracing::debug!(staged_id = %image.id(), size = image.size(), "Returning placeholder analysis");
        Ok(AnalysisResult::placeholder())
    }
}
