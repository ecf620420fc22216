/*!
 * Synchronization engine: keeps the active timed line in step with playback.
 *
 * - `cursor`: active index as a pure function of document and time
 * - `emphasis`: distance buckets for rendering lines around the active one
 * - `views`: fan-out of centering requests to concurrent views
 * - `session`: transport, cursor and views wired together
 * - `clock`: wall-clock transport for headless playback
 */

pub mod clock;
pub mod cursor;
pub mod emphasis;
pub mod session;
pub mod views;

pub use clock::SimulatedClock;
pub use cursor::{CursorChange, PlaybackCursor, locate_active_index};
pub use emphasis::{Emphasis, emphasis_for, emphasis_window};
pub use session::{MediaTransport, PlayerSession, clamp_time, format_time};
pub use views::{LyricView, ViewRegistry};
