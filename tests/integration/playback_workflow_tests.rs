/*!
 * End-to-end tests: upload, parse, then follow playback on a clock
 */

use std::time::Duration;

use anyhow::Result;
use lyricsync::app_config::{Config, RepeatMode};
use lyricsync::file_utils::FileManager;
use lyricsync::sync::{MediaTransport, PlayerSession, SimulatedClock};
use lyricsync::upload::accept_lyrics;
use crate::common::{self, RecordingView};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Test a full play-through visits every line once, in order, on both views
#[test]
fn test_playback_withLrcFile_shouldVisitEveryLineInOrder() -> Result<()> {
    init_logging();
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "song.txt", common::SAMPLE_LRC)?;

    let content = FileManager::read_lyrics_file(&path)?;
    let summary = accept_lyrics(&content)?;
    let config = Config::default();

    let (mut session, validation) =
        PlayerSession::with_lyrics(SimulatedClock::new(16.0, 1.0), &summary.content, config.sync.clone());
    assert_eq!(validation.line_count, 4);

    let (compact, compact_log) = RecordingView::new("compact");
    let (immersive, immersive_log) = RecordingView::new("immersive");
    session.attach_view(compact, true);
    session.attach_view(immersive, true);

    session.transport_mut().play();
    let tick = Duration::from_millis(config.sync.tick_interval_ms);
    let mut ticks = 0;
    while !session.transport().is_finished() {
        session.transport_mut().advance(tick);
        session.on_time_update();
        ticks += 1;
        assert!(ticks < 1000, "playback never finished");
    }

    assert_eq!(session.transport().current_time(), 16.0);
    assert!(!session.transport().is_playing());
    assert_eq!(session.active_index(), Some(3));
    assert_eq!(*compact_log.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(*immersive_log.borrow(), vec![0, 1, 2, 3]);
    Ok(())
}

/// Test seeking back mid-playback resyncs instead of keeping a stale line
#[test]
fn test_playback_withBackwardSeek_shouldResync() -> Result<()> {
    init_logging();
    let (mut session, _) = PlayerSession::with_lyrics(
        SimulatedClock::new(20.0, 2.0),
        common::SAMPLE_SRT,
        Config::default().sync,
    );
    let (view, log) = RecordingView::new("compact");
    session.attach_view(view, true);

    session.transport_mut().play();
    // Six seconds of wall time at double speed reaches the last cue
    for _ in 0..6 {
        session.transport_mut().advance(Duration::from_secs(1));
        session.on_time_update();
    }
    assert_eq!(session.transport().current_time(), 12.0);
    assert_eq!(session.active_index(), Some(2));

    session.seek(0.5);
    assert_eq!(session.active_index(), None);

    session.transport_mut().advance(Duration::from_millis(500));
    session.on_time_update();
    assert_eq!(session.active_index(), Some(0));
    assert_eq!(*log.borrow(), vec![0, 1, 2, 0]);
    Ok(())
}

/// Test a paused clock never moves the line
#[test]
fn test_playback_withPausedClock_shouldHoldPosition() {
    let (mut session, _) = PlayerSession::with_lyrics(
        SimulatedClock::new(20.0, 1.0),
        common::SAMPLE_VTT,
        Config::default().sync,
    );

    session.seek(3.0);
    session.transport_mut().pause();
    session.transport_mut().advance(Duration::from_secs(10));
    session.on_time_update();

    assert_eq!(session.transport().current_time(), 3.0);
    assert_eq!(session.active_index(), Some(0));
}

/// Test repeat plays the track again from the first line after it ends
#[test]
fn test_playback_withRepeatOne_shouldLoopToFirstLine() {
    init_logging();
    let mut config = Config::default();
    config.sync.repeat = RepeatMode::One;
    let (mut session, _) = PlayerSession::with_lyrics(SimulatedClock::new(16.0, 1.0), common::SAMPLE_LRC, config.sync);
    let (view, log) = RecordingView::new("compact");
    session.attach_view(view, true);

    session.transport_mut().play();
    session.transport_mut().advance(Duration::from_secs(20));
    session.on_time_update();
    assert!(session.transport().is_finished());
    assert_eq!(session.active_index(), Some(3));

    session.on_ended();
    assert!(session.transport().is_playing());
    assert_eq!(session.transport().current_time(), 0.0);
    assert_eq!(session.active_index(), None);

    session.transport_mut().advance(Duration::from_secs(2));
    session.on_time_update();
    assert_eq!(session.active_index(), Some(0));
    assert_eq!(*log.borrow(), vec![3, 0]);
}

/// Test without repeat the end of the track leaves the clock stopped at zero
#[test]
fn test_playback_withRepeatOff_shouldStopAtStart() {
    let (mut session, _) =
        PlayerSession::with_lyrics(SimulatedClock::new(16.0, 1.0), common::SAMPLE_LRC, Config::default().sync);

    session.transport_mut().play();
    session.transport_mut().advance(Duration::from_secs(20));
    session.on_time_update();
    session.on_ended();

    assert!(!session.transport().is_playing());
    assert_eq!(session.transport().current_time(), 0.0);
    assert_eq!(session.active_index(), None);

    session.transport_mut().advance(Duration::from_secs(2));
    session.on_time_update();
    assert_eq!(session.active_index(), None);
}
