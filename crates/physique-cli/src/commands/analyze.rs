//! Analyze command - upload a photo and print its analysis

use std::path::Path;

use anyhow::{bail, Context, Result};
use physique_client::{guess_mime, PhysiqueClient};

use crate::output::OutputContext;

/// Upload `image` and print the analysis
pub async fn analyze(client: &PhysiqueClient, image: &Path, ctx: &OutputContext) -> Result<()> {
    if !image.is_file() {
        bail!("Not a file: {}", image.display());
    }

    let name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if !guess_mime(name).starts_with("image/") {
        ctx.warn(&format!(
            "{} does not look like an image; uploading anyway",
            image.display()
        ));
    }

    ctx.info(&format!("Analyzing {} ...", image.display()));

    let result = client
        .analyze_file(image)
        .await
        .with_context(|| format!("Failed to analyze {}", image.display()))?;

    ctx.print_analysis(&result);
    Ok(())
}
