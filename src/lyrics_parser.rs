use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: Format-agnostic timed-text parsing

// @const: Cue range separator used by SRT/VTT style files
const RANGE_SEPARATOR: &str = "-->";

// @const: Byte order mark some editors write at the start of text files
const BYTE_ORDER_MARK: char = '\u{FEFF}';

// @const: Blank-line block separator
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @const: Caption start timestamp (HH:MM:SS,mmm or HH:MM:SS.mmm)
static CAPTION_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{2}):([0-9]{2}):([0-9]{2})[,.]([0-9]{3})").unwrap()
});

// @const: Bracketed line tag ([mm:ss.xx] or [mm:ss.xxx])
static BRACKET_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{2}):([0-9]{2})[.:]([0-9]{2,3})\]").unwrap()
});

// @struct: Single timed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEntry {
    // @field: Offset from the start of the track, in seconds
    pub time: f64,

    // @field: Display text, trimmed
    pub text: String,
}

impl TimedEntry {
    /// Creates a new entry
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        TimedEntry {
            time,
            text: text.into(),
        }
    }

    /// Key used to merge entries that land on the same millisecond
    pub fn dedup_key(&self) -> String {
        format!("{:.3}", self.time)
    }
}

impl fmt::Display for TimedEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>9.3}  {}", self.time, self.text)
    }
}

/// Ordered, deduplicated sequence of timed lines.
///
/// Entries are strictly increasing by `time`. The only ways to build one are
/// [`parse_lyrics`] and [`TimedDocument::from_entries`], both of which go
/// through the same merge step, so the ordering invariant always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimedDocument {
    entries: Vec<TimedEntry>,
}

impl TimedDocument {
    /// Create an empty document
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from raw entries, deduplicating and sorting them
    pub fn from_entries(entries: Vec<TimedEntry>) -> Self {
        merge_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimedEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TimedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedEntry> {
        self.entries.iter()
    }

    /// Entry times in document order
    pub fn times(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.time).collect()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.entries.first().map(|e| e.time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.entries.last().map(|e| e.time)
    }

    pub fn into_entries(self) -> Vec<TimedEntry> {
        self.entries
    }
}

impl Index<usize> for TimedDocument {
    type Output = TimedEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a TimedDocument {
    type Item = &'a TimedEntry;
    type IntoIter = std::slice::Iter<'a, TimedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of validating a lyrics blob
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsValidation {
    /// True iff at least one entry was recognized
    pub valid: bool,

    /// Number of parsed entries
    pub line_count: usize,

    /// The parsed document
    #[serde(rename = "lyrics")]
    pub entries: TimedDocument,
}

/// Parse timed-text content of unknown format.
///
/// Both the caption pass (SRT/VTT style `-->` cues) and the bracket pass
/// (LRC style `[mm:ss.xx]` tags) run over the same normalized text and their
/// results are merged. Never fails: unrecognized input yields an empty
/// document.
pub fn parse_lyrics(content: &str) -> TimedDocument {
    if is_blank(content) {
        return TimedDocument::empty();
    }

    let normalized = normalize_line_endings(content);

    let mut raw = extract_caption_style(&normalized);
    let caption_count = raw.len();
    raw.extend(extract_bracket_style(&normalized));
    let bracket_count = raw.len() - caption_count;

    let document = merge_entries(raw);
    debug!(
        "Parsed lyrics: {} caption entries, {} bracket entries, {} after merge",
        caption_count,
        bracket_count,
        document.len()
    );
    document
}

/// Parse content and summarize whether it was recognized
pub fn validate_lyrics(content: &str) -> LyricsValidation {
    let entries = parse_lyrics(content);
    LyricsValidation {
        valid: !entries.is_empty(),
        line_count: entries.len(),
        entries,
    }
}

/// Extract entries from SRT/VTT style cue blocks.
///
/// Only runs when the range separator appears somewhere in the content.
/// Expects `\n` line endings.
pub fn extract_caption_style(content: &str) -> Vec<TimedEntry> {
    if !content.contains(RANGE_SEPARATOR) {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for block in BLOCK_SEPARATOR_REGEX.split(content) {
        let lines: Vec<&str> = block
            .split('\n')
            .map(trim_text)
            .filter(|l| !l.is_empty())
            .collect();

        let Some(time_index) = lines.iter().position(|l| l.contains(RANGE_SEPARATOR)) else {
            continue;
        };

        // A cue without text is a partial match and contributes nothing
        if time_index + 1 >= lines.len() {
            continue;
        }

        if let Some(time) = caption_start_time(lines[time_index]) {
            let text = lines[time_index + 1..].join(" ");
            entries.push(TimedEntry::new(time, text));
        }
    }
    entries
}

/// Extract entries from LRC style bracket tags, one per line.
///
/// Only the first tag on a line is honored. Lines whose text is empty once
/// the tag is stripped are dropped. Expects `\n` line endings.
pub fn extract_bracket_style(content: &str) -> Vec<TimedEntry> {
    let mut entries = Vec::new();
    for line in content.split('\n') {
        let Some(caps) = BRACKET_TAG_REGEX.captures(line) else {
            continue;
        };

        let Some(time) = bracket_time(&caps[1], &caps[2], &caps[3]) else {
            continue;
        };

        let text = BRACKET_TAG_REGEX.replacen(line, 1, "");
        let text = trim_text(&text);
        if !text.is_empty() {
            entries.push(TimedEntry::new(time, text));
        }
    }
    entries
}

/// Deduplicate by millisecond key (last write wins) and sort by time
pub fn merge_entries(entries: Vec<TimedEntry>) -> TimedDocument {
    let mut by_key: HashMap<String, TimedEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_key.insert(entry.dedup_key(), entry);
    }

    let mut merged: Vec<TimedEntry> = by_key.into_values().collect();
    merged.sort_by(|a, b| a.time.total_cmp(&b.time));
    TimedDocument { entries: merged }
}

/// True when the content holds nothing but whitespace and byte order marks
pub fn is_blank(content: &str) -> bool {
    trim_text(content).is_empty()
}

// @normalizes: Leading BOM dropped, CRLF and lone CR to LF
fn normalize_line_endings(content: &str) -> String {
    content
        .trim_start_matches(BYTE_ORDER_MARK)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

// @returns: Text without surrounding whitespace or stray byte order marks
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

// @returns: Start time in seconds from a cue timing line
fn caption_start_time(line: &str) -> Option<f64> {
    let caps = CAPTION_TIMESTAMP_REGEX.captures(line)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    let millis: u64 = caps[4].parse().ok()?;

    Some((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

// @returns: Time in seconds from bracket tag components
fn bracket_time(minutes: &str, seconds: &str, fraction: &str) -> Option<f64> {
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    Some((minutes * 60 + seconds) as f64 + fraction_seconds(fraction)?)
}

// Three digits are milliseconds, two are centiseconds
fn fraction_seconds(fraction: &str) -> Option<f64> {
    let value: u64 = fraction.parse().ok()?;
    let divisor = if fraction.len() == 3 { 1000.0 } else { 100.0 };
    Some(value as f64 / divisor)
}
