/*!
 * Tests for lyrics upload acceptance
 */

use lyricsync::errors::LyricsError;
use lyricsync::upload::accept_lyrics;
use crate::common;

/// Test recognized content is accepted with its line count
#[test]
fn test_accept_lyrics_withLrcContent_shouldReturnSummary() {
    let summary = accept_lyrics(common::SAMPLE_LRC).unwrap();

    assert_eq!(summary.line_count, 4);
    assert_eq!(summary.content, common::SAMPLE_LRC);
    assert_eq!(summary.parsed.len(), 4);
}

/// Test whitespace-only content is rejected as empty
#[test]
fn test_accept_lyrics_withBlankContent_shouldRejectAsEmpty() {
    assert_eq!(accept_lyrics(""), Err(LyricsError::EmptyContent));
    assert_eq!(accept_lyrics(" \n\t "), Err(LyricsError::EmptyContent));
}

/// Test a lone byte order mark counts as empty content
#[test]
fn test_accept_lyrics_withBomAndWhitespace_shouldRejectAsEmpty() {
    assert_eq!(accept_lyrics("\u{FEFF}"), Err(LyricsError::EmptyContent));
    assert_eq!(accept_lyrics("\u{FEFF}\n  "), Err(LyricsError::EmptyContent));
}

/// Test BOM-prefixed content parses clean text but is stored verbatim
#[test]
fn test_accept_lyrics_withBomPrefixedLrc_shouldParseCleanText() {
    let content = "\u{FEFF}[00:01.00]hello\n[00:02.00]world";
    let summary = accept_lyrics(content).unwrap();

    assert_eq!(summary.line_count, 2);
    assert_eq!(summary.parsed[0].text, "hello");
    assert_eq!(summary.content, content);
}

/// Test content without timestamps gets the generic rejection
#[test]
fn test_accept_lyrics_withUntimedContent_shouldRejectAsUnrecognized() {
    let result = accept_lyrics("Just some words\nwithout any timing");

    assert_eq!(result, Err(LyricsError::UnrecognizedFormat));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("LRC"));
    assert!(message.contains("SRT"));
}

/// Test the summary serializes with camelCase fields
#[test]
fn test_upload_summary_serialization_shouldExposeParsedLines() {
    let summary = accept_lyrics("[00:01.50]hello").unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["lineCount"], 1);
    assert_eq!(json["content"], "[00:01.50]hello");
    assert_eq!(json["parsed"][0]["text"], "hello");
}
