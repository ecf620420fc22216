/*!
 * Playback cursor: tracks which timed line is active for a playback position.
 *
 * The active index is always derived from `(document, current_time)` and is
 * never set directly. Lookups are biased toward forward playback: when the
 * position moved by at most one line from the held index the answer is found
 * without searching, otherwise a binary search over entry times is used.
 */

use std::sync::Arc;

use log::{debug, trace};

use crate::lyrics_parser::{TimedDocument, TimedEntry};

/// Index change reported by the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorChange {
    /// Index held before the update
    pub previous: Option<usize>,

    /// Index held after the update
    pub current: Option<usize>,
}

impl CursorChange {
    /// Current index with `-1` standing for "no active line"
    pub fn signed(&self) -> i64 {
        to_signed(self.current)
    }
}

/// Convert an optional index to the `-1` sentinel form used by presentation code
pub fn to_signed(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

/// Whether a reported playback time can match any entry
pub fn is_playable_time(time: f64) -> bool {
    !time.is_nan() && time >= 0.0
}

/// Index of the last entry at or before `time`, found by binary search.
///
/// NaN and negative times never match.
pub fn locate_active_index(document: &TimedDocument, time: f64) -> Option<usize> {
    if !is_playable_time(time) {
        return None;
    }
    document
        .entries()
        .partition_point(|e| e.time <= time)
        .checked_sub(1)
}

// @struct: In-progress user scrub
#[derive(Debug, Clone, Copy)]
struct ScrubState {
    // @field: Latest drag position
    position: f64,
}

/// Active-line state for one timeline
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    document: Arc<TimedDocument>,
    current_time: f64,
    active_index: Option<usize>,
    scrub: Option<ScrubState>,
}

impl PlaybackCursor {
    /// Create a cursor positioned at the start of the track
    pub fn new(document: Arc<TimedDocument>) -> Self {
        let active_index = locate_active_index(&document, 0.0);
        PlaybackCursor {
            document,
            current_time: 0.0,
            active_index,
            scrub: None,
        }
    }

    pub fn document(&self) -> &Arc<TimedDocument> {
        &self.document
    }

    /// Latest reported playback position
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Active index with `-1` standing for "no active line"
    pub fn active_index_signed(&self) -> i64 {
        to_signed(self.active_index)
    }

    pub fn active_entry(&self) -> Option<&TimedEntry> {
        self.active_index.and_then(|i| self.document.get(i))
    }

    /// Record a media time update.
    ///
    /// Returns a change only when the active index moved. While a scrub is in
    /// progress the time is recorded but the index is held.
    pub fn update_time(&mut self, time: f64) -> Option<CursorChange> {
        self.current_time = time;
        if self.scrub.is_some() {
            return None;
        }
        let next = self.resolve(time);
        self.apply(next)
    }

    /// Swap in a new document and recompute against the current time
    pub fn replace_document(&mut self, document: Arc<TimedDocument>) -> Option<CursorChange> {
        debug!(
            "Replacing cursor document ({} -> {} entries) at {:.3}s",
            self.document.len(),
            document.len(),
            self.current_time
        );
        self.document = document;
        let next = locate_active_index(&self.document, self.current_time);
        self.apply(next)
    }

    /// Start a user scrub at the current position
    pub fn begin_scrub(&mut self) {
        self.scrub = Some(ScrubState {
            position: self.current_time,
        });
    }

    /// Move the scrub position.
    ///
    /// The active index only follows the drag when `live_preview` is set.
    pub fn scrub_to(&mut self, time: f64, live_preview: bool) -> Option<CursorChange> {
        match self.scrub.as_mut() {
            Some(scrub) => scrub.position = time,
            None => self.scrub = Some(ScrubState { position: time }),
        }
        if live_preview {
            let next = locate_active_index(&self.document, time);
            self.apply(next)
        } else {
            None
        }
    }

    /// Release the scrub and apply one authoritative time
    pub fn end_scrub(&mut self, time: f64) -> Option<CursorChange> {
        self.scrub = None;
        self.current_time = time;
        let next = locate_active_index(&self.document, time);
        self.apply(next)
    }

    /// Abandon the scrub and return to the last reported media time
    pub fn cancel_scrub(&mut self) -> Option<CursorChange> {
        self.scrub = None;
        let next = locate_active_index(&self.document, self.current_time);
        self.apply(next)
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_some()
    }

    /// Drag position while scrubbing
    pub fn scrub_time(&self) -> Option<f64> {
        self.scrub.map(|s| s.position)
    }

    /// Position to show on a progress display: the drag position while
    /// scrubbing, otherwise the media time
    pub fn display_time(&self) -> f64 {
        self.scrub_time().unwrap_or(self.current_time)
    }

    // @returns: Active index for time, checking the held line and its successor first
    fn resolve(&self, time: f64) -> Option<usize> {
        if !is_playable_time(time) {
            return None;
        }

        let entries = self.document.entries();
        if let Some(held) = self.active_index {
            if held < entries.len() && entries[held].time <= time {
                match entries.get(held + 1) {
                    None => return Some(held),
                    Some(next) if next.time > time => return Some(held),
                    Some(_) => {
                        if entries.get(held + 2).is_none_or(|after| after.time > time) {
                            return Some(held + 1);
                        }
                    }
                }
            }
        } else if let Some(first) = entries.first() {
            if time < first.time {
                return None;
            }
        }

        locate_active_index(&self.document, time)
    }

    fn apply(&mut self, next: Option<usize>) -> Option<CursorChange> {
        if next == self.active_index {
            return None;
        }
        let change = CursorChange {
            previous: self.active_index,
            current: next,
        };
        self.active_index = next;
        trace!("Active line {:?} -> {:?}", change.previous, change.current);
        Some(change)
    }
}
