use crate::{error::Result, models::Creation};
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "ai-composition";
const STEM_CHARS: usize = 30;

/// `<first 30 prompt chars, whitespace as '_'>-<id>.<ext>`, with a fixed stem
/// for an empty prompt.
pub fn download_filename(creation: &Creation) -> String {
    let stem: String = creation
        .prompt
        .chars()
        .take(STEM_CHARS)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    let stem = if stem.is_empty() { DEFAULT_STEM } else { stem.as_str() };

    format!("{}-{}.{}", stem, creation.id, creation.image.extension())
}

/// Writes the creation's image into `dir` and returns the file path.
pub async fn save_creation(creation: &Creation, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(download_filename(creation));
    tokio::fs::write(&path, &creation.image.bytes).await?;
    log::info!("Image saved to: {}", path.display());
    Ok(path)
}
