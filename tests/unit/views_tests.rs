/*!
 * Tests for centering request fan-out
 */

use lyricsync::sync::cursor::CursorChange;
use lyricsync::sync::views::ViewRegistry;
use crate::common::RecordingView;

/// Test every visible view receives the request
#[test]
fn test_notify_withTwoVisibleViews_shouldCenterBoth() {
    let mut registry = ViewRegistry::new();
    let (compact, compact_log) = RecordingView::new("compact");
    let (immersive, immersive_log) = RecordingView::new("immersive");
    registry.attach(compact, true);
    registry.attach(immersive, true);

    let centered = registry.notify(&CursorChange { previous: None, current: Some(4) });

    assert_eq!(centered, 2);
    assert_eq!(*compact_log.borrow(), vec![4]);
    assert_eq!(*immersive_log.borrow(), vec![4]);
}

/// Test hidden views and "none" changes are skipped
#[test]
fn test_notify_withHiddenViewOrNoLine_shouldSkip() {
    let mut registry = ViewRegistry::new();
    let (compact, compact_log) = RecordingView::new("compact");
    let (immersive, immersive_log) = RecordingView::new("immersive");
    registry.attach(compact, true);
    registry.attach(immersive, false);

    assert_eq!(registry.notify(&CursorChange { previous: None, current: Some(1) }), 1);
    assert_eq!(registry.notify(&CursorChange { previous: Some(1), current: None }), 0);

    assert_eq!(*compact_log.borrow(), vec![1]);
    assert!(immersive_log.borrow().is_empty());
}

/// Test showing a view centers it on the active line
#[test]
fn test_set_visible_withActiveLine_shouldCenterNewlyShownView() {
    let mut registry = ViewRegistry::new();
    let (immersive, immersive_log) = RecordingView::new("immersive");
    registry.attach(immersive, false);

    assert!(registry.set_visible("immersive", true, Some(6)));
    assert!(registry.set_visible("immersive", true, Some(7)));
    assert_eq!(registry.is_visible("immersive"), Some(true));
    assert_eq!(*immersive_log.borrow(), vec![6]);

    assert!(!registry.set_visible("missing", true, Some(6)));
    assert_eq!(registry.is_visible("missing"), None);
}

/// Test attaching a view with an existing name replaces it
#[test]
fn test_attach_withSameName_shouldReplaceView() {
    let mut registry = ViewRegistry::new();
    let (first, first_log) = RecordingView::new("compact");
    let (second, second_log) = RecordingView::new("compact");
    registry.attach(first, true);
    registry.attach(second, true);

    assert_eq!(registry.len(), 1);
    registry.center_visible(2);
    assert!(first_log.borrow().is_empty());
    assert_eq!(*second_log.borrow(), vec![2]);

    assert!(registry.detach("compact").is_some());
    assert!(registry.is_empty());
    assert!(registry.detach("compact").is_none());
}
