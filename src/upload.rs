use log::{info, warn};
use serde::Serialize;

use crate::errors::LyricsError;
use crate::lyrics_parser::{TimedDocument, is_blank, validate_lyrics};

// @module: Acceptance of uploaded lyrics content

/// Accepted lyrics upload, ready to be stored alongside a song
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    // @field: Number of recognized timed lines
    pub line_count: usize,

    // @field: Raw content as uploaded, stored verbatim
    pub content: String,

    // @field: Parsed lines for immediate display
    pub parsed: TimedDocument,
}

/// Check uploaded lyrics content.
///
/// The content is judged by what it contains, never by a file name or MIME
/// type. Content holding only whitespace (or a byte order mark) and content
/// without any recognizable timestamp are rejected.
pub fn accept_lyrics(content: &str) -> Result<UploadSummary, LyricsError> {
    if is_blank(content) {
        warn!("Rejected lyrics upload: empty content");
        return Err(LyricsError::EmptyContent);
    }

    let validation = validate_lyrics(content);
    if !validation.valid {
        warn!("Rejected lyrics upload: no timestamps recognized ({} bytes)", content.len());
        return Err(LyricsError::UnrecognizedFormat);
    }

    info!("Accepted lyrics upload with {} lines", validation.line_count);
    Ok(UploadSummary {
        line_count: validation.line_count,
        content: content.to_string(),
        parsed: validation.entries,
    })
}
