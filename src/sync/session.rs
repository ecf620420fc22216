/*!
 * Player session: one cursor, its views and the media transport.
 *
 * The session is the single place where transport events turn into cursor
 * updates and cursor changes turn into view centering requests. Everything
 * runs on the caller's thread; there is no locking.
 */

use std::sync::Arc;

use log::{debug, warn};

use crate::app_config::{RepeatMode, SyncConfig};
use crate::lyrics_parser::{LyricsValidation, TimedDocument, validate_lyrics};
use crate::sync::cursor::{CursorChange, PlaybackCursor};
use crate::sync::emphasis::{Emphasis, emphasis_for, emphasis_window};
use crate::sync::views::{LyricView, ViewRegistry};

/// Audio driver contract the session depends on
pub trait MediaTransport {
    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Track length in seconds; NaN or zero when unknown
    fn duration(&self) -> f64;

    /// Move playback to `time` seconds
    fn seek(&mut self, time: f64);

    /// Start or resume playback
    fn play(&mut self);

    /// Stop advancing the position
    fn pause(&mut self);
}

/// Clamp a requested position to the track bounds.
///
/// The upper bound only applies when the duration is known.
pub fn clamp_time(time: f64, duration: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    let time = time.max(0.0);
    if duration.is_finite() && duration > 0.0 {
        time.min(duration)
    } else {
        time
    }
}

/// Render seconds as `m:ss`
pub fn format_time(time: f64) -> String {
    if time.is_nan() || time <= 0.0 {
        return "0:00".to_string();
    }
    let minutes = (time / 60.0).floor() as u64;
    let seconds = (time % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, seconds)
}

/// Synchronized playback of one track and its lyrics
pub struct PlayerSession<T: MediaTransport> {
    transport: T,
    cursor: PlaybackCursor,
    views: ViewRegistry,
    config: SyncConfig,
}

impl<T: MediaTransport> PlayerSession<T> {
    /// Create a session for an already parsed document
    pub fn new(transport: T, document: Arc<TimedDocument>, config: SyncConfig) -> Self {
        let mut cursor = PlaybackCursor::new(document);
        cursor.update_time(transport.current_time());
        PlayerSession {
            transport,
            cursor,
            views: ViewRegistry::new(),
            config,
        }
    }

    /// Create a session by parsing raw lyrics content
    pub fn with_lyrics(transport: T, content: &str, config: SyncConfig) -> (Self, LyricsValidation) {
        let validation = validate_lyrics(content);
        if !validation.valid {
            warn!("No timed lines recognized; lyrics will stay inactive");
        }
        let session = Self::new(transport, Arc::new(validation.entries.clone()), config);
        (session, validation)
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn document(&self) -> &Arc<TimedDocument> {
        self.cursor.document()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.cursor.active_index()
    }

    /// Register a view and center it on the active line if it is visible
    pub fn attach_view(&mut self, view: Box<dyn LyricView>, visible: bool) {
        let name = view.name().to_string();
        self.views.attach(view, false);
        if visible {
            self.views.set_visible(&name, true, self.cursor.active_index());
        }
    }

    /// Show or hide a view; returns false for an unknown view
    pub fn set_view_visible(&mut self, name: &str, visible: bool) -> bool {
        self.views.set_visible(name, visible, self.cursor.active_index())
    }

    /// Pull the transport position into the cursor
    pub fn on_time_update(&mut self) -> Option<CursorChange> {
        let time = self.transport.current_time();
        let change = self.cursor.update_time(time);
        self.dispatch(change)
    }

    /// Seek to `time`, clamped to the track bounds
    pub fn seek(&mut self, time: f64) -> Option<CursorChange> {
        if self.cursor.is_scrubbing() {
            return self.end_scrub(time);
        }
        let target = clamp_time(time, self.transport.duration());
        self.transport.seek(target);
        let change = self.cursor.update_time(target);
        self.dispatch(change)
    }

    /// Jump forward by the configured skip distance
    pub fn skip_forward(&mut self) -> Option<CursorChange> {
        let target = self.transport.current_time() + self.config.skip_seconds;
        self.seek(target)
    }

    /// Jump backward by the configured skip distance
    pub fn skip_backward(&mut self) -> Option<CursorChange> {
        let target = self.transport.current_time() - self.config.skip_seconds;
        self.seek(target)
    }

    /// Seek to the start of line `index`; no-op for an unknown line
    pub fn seek_to_line(&mut self, index: usize) -> Option<CursorChange> {
        let time = self.cursor.document().get(index)?.time;
        self.seek(time)
    }

    pub fn begin_scrub(&mut self) {
        self.cursor.begin_scrub();
    }

    /// Follow a drag; lines only move when live preview is configured
    pub fn scrub_to(&mut self, time: f64) -> Option<CursorChange> {
        let target = clamp_time(time, self.transport.duration());
        let change = self.cursor.scrub_to(target, self.config.live_scrub_preview);
        self.dispatch(change)
    }

    /// Release a drag: seek the transport once and resync
    pub fn end_scrub(&mut self, time: f64) -> Option<CursorChange> {
        let target = clamp_time(time, self.transport.duration());
        self.transport.seek(target);
        let change = self.cursor.end_scrub(target);
        self.dispatch(change)
    }

    /// Abandon a drag without seeking
    pub fn cancel_scrub(&mut self) -> Option<CursorChange> {
        let change = self.cursor.cancel_scrub();
        self.dispatch(change)
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.config.repeat
    }

    /// Switch between stopping and repeating at the end of the track
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.config.repeat = self.config.repeat.toggled();
        debug!("Repeat mode is now {:?}", self.config.repeat);
        self.config.repeat
    }

    /// Handle the end of the track.
    ///
    /// With repeat on the track restarts from zero and keeps playing.
    /// Otherwise playback stops and rewinds to zero. Either way the cursor
    /// resyncs to the start of the track.
    pub fn on_ended(&mut self) -> Option<CursorChange> {
        self.transport.seek(0.0);
        match self.config.repeat {
            RepeatMode::One => self.transport.play(),
            RepeatMode::Off => self.transport.pause(),
        }
        let change = if self.cursor.is_scrubbing() {
            self.cursor.end_scrub(0.0)
        } else {
            self.cursor.update_time(0.0)
        };
        self.dispatch(change)
    }

    /// Replace the lyrics mid-session.
    ///
    /// The new document is swapped in even when nothing was recognized, in
    /// which case no line is active from then on.
    pub fn load_lyrics(&mut self, content: &str) -> LyricsValidation {
        let validation = validate_lyrics(content);
        self.replace_document(Arc::new(validation.entries.clone()));
        validation
    }

    /// Swap the document and recenter views on the recomputed line
    pub fn replace_document(&mut self, document: Arc<TimedDocument>) -> Option<CursorChange> {
        let change = self.cursor.replace_document(document);
        if let Some(index) = self.cursor.active_index() {
            let centered = self.views.center_visible(index);
            debug!("Recentered {} view(s) on line {} after document swap", centered, index);
        }
        change
    }

    pub fn emphasis_for(&self, index: usize) -> Emphasis {
        emphasis_for(index, self.cursor.active_index())
    }

    /// Emphasis for every line of the current document
    pub fn emphasis_window(&self) -> Vec<Emphasis> {
        emphasis_window(self.cursor.document().len(), self.cursor.active_index())
    }

    /// Position shown on a progress display
    pub fn display_time(&self) -> f64 {
        self.cursor.display_time()
    }

    /// Time left until the end of the track, from the display position
    pub fn remaining_time(&self) -> f64 {
        let duration = self.transport.duration();
        if duration.is_finite() && duration > 0.0 {
            (duration - self.display_time()).max(0.0)
        } else {
            0.0
        }
    }

    fn dispatch(&mut self, change: Option<CursorChange>) -> Option<CursorChange> {
        if let Some(change) = &change {
            self.views.notify(change);
        }
        change
    }
}
