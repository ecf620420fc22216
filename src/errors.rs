/*!
 * Error types for the lyricsync application.
 *
 * The parser and the synchronization engine never fail: every problem they
 * meet is expressed as data (`valid: false`, no active line). The types here
 * cover the edges around them, namely accepting an uploaded lyrics file,
 * loading configuration and the command-line application itself.
 */

use thiserror::Error;

/// Errors raised when accepting lyrics content from a caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LyricsError {
    /// Nothing but whitespace was supplied
    #[error("Lyrics content must not be empty")]
    EmptyContent,

    /// No recognizable timestamps were found.
    ///
    /// Deliberately carries no detail: callers show one generic message.
    #[error("Unable to parse lyrics: make sure the file contains valid timestamps (LRC, SRT or VTT)")]
    UnrecognizedFormat,
}

/// Errors raised while validating configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Skip distance must be a positive number of seconds
    #[error("Invalid skip distance: {0} seconds (must be greater than zero)")]
    InvalidSkipSeconds(f64),

    /// Playback tick interval must be at least one millisecond
    #[error("Invalid tick interval: {0} ms (must be greater than zero)")]
    InvalidTickInterval(u64),

    /// Playback rate must be a positive multiplier
    #[error("Invalid playback rate: {0} (must be greater than zero)")]
    InvalidPlaybackRate(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from lyrics acceptance
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
