use std::time::Duration;

use crate::sync::session::MediaTransport;

// @module: Wall-clock driven media transport for headless playback

/// Transport that advances its position from elapsed wall time
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    // @field: Current position in seconds
    position: f64,

    // @field: Track length in seconds
    duration: f64,

    // @field: Playback speed multiplier
    rate: f64,

    // @field: Whether time advances
    playing: bool,
}

impl SimulatedClock {
    /// Create a paused clock at position zero
    pub fn new(duration: f64, rate: f64) -> Self {
        SimulatedClock {
            position: 0.0,
            duration: duration.max(0.0),
            rate,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once the position reached the end of the track
    pub fn is_finished(&self) -> bool {
        self.position >= self.duration
    }

    /// Move the position forward by `elapsed` scaled by the playback rate.
    ///
    /// Stops playing at the end of the track.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        self.position = (self.position + elapsed.as_secs_f64() * self.rate).min(self.duration);
        if self.is_finished() {
            self.playing = false;
        }
    }
}

impl MediaTransport for SimulatedClock {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn seek(&mut self, time: f64) {
        self.position = time.clamp(0.0, self.duration);
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
