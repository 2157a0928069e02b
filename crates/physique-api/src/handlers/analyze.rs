//! Image analysis handler
//!
//! Stages the uploaded image, runs the analyzer on it and removes the staged
//! file before responding.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use physique_core::AnalysisResult;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the multipart field carrying the image
pub const UPLOAD_FIELD: &str = "file";

/// POST /analyze
/// Analyze an uploaded image
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mut multipart = multipart?;

    // Only the first `file` field is analyzed
    let mut field = loop {
        match multipart.next_field().await? {
            Some(field) if field.name() == Some(UPLOAD_FIELD) => break field,
            Some(field) => {
                tracing::debug!(name = ?field.name(), "Skipping multipart field");
            }
            None => {
                return Err(ApiError::BadRequest(format!(
                    "Missing multipart field '{}'",
                    UPLOAD_FIELD
                )));
            }
        }
    };

    // Client-supplied name is only logged
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);

    let mut staged = state.scratch().stage().await?;
    while let Some(chunk) = field.chunk().await? {
        staged.write_chunk(&chunk).await?;
    }
    staged.finish().await?;

    tracing::info!(
        staged_id = %staged.id(),
        file_name = ?file_name,
        content_type = ?content_type,
        size = staged.size(),
        "Upload staged"
    );

    let analyzer = state.analyzer();
    let result = analyzer.analyze(&staged).await?;
    result.validate()?;

    let staged_id = staged.id();
    staged.discard().await?;

    tracing::info!(
        staged_id = %staged_id,
        analyzer = analyzer.name(),
        "Image analyzed"
    );

    Ok(Json(result))
}
