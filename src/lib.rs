/*!
 * # lyricsync - timed lyrics parsing and playback synchronization
 *
 * A Rust library that reads timed-text files of unknown format and keeps
 * the right line highlighted while audio plays.
 *
 * ## Features
 *
 * - Format-agnostic parsing of timed text:
 *   - LRC style bracket tags (`[mm:ss.xx]`)
 *   - SRT/VTT style cue blocks (`00:00:12,500 --> 00:00:15,000`)
 * - Deduplicated, time-ordered documents
 * - Active line tracking under continuous playback and arbitrary seeks
 * - Scrub handling with optional live preview
 * - Distance-based emphasis and centering requests for several views
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `lyrics_parser`: timed-text parsing and validation
 * - `sync`: synchronization engine:
 *   - `sync::cursor`: active line computation
 *   - `sync::emphasis`: distance buckets for presentation
 *   - `sync::views`: centering requests for concurrent views
 *   - `sync::session`: transport, cursor and views wired together
 *   - `sync::clock`: simulated transport for headless playback
 * - `upload`: acceptance checks for uploaded lyrics
 * - `app_config`: configuration management
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod lyrics_parser;
pub mod sync;
pub mod upload;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, LyricsError};
pub use lyrics_parser::{LyricsValidation, TimedDocument, TimedEntry, parse_lyrics, validate_lyrics};
pub use sync::{CursorChange, Emphasis, MediaTransport, PlaybackCursor, PlayerSession};
pub use upload::{UploadSummary, accept_lyrics};
