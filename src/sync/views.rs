/*!
 * Fan-out of centering requests to the views showing a document.
 *
 * Several views may render the same lines at once (a compact list next to
 * the artwork and a full-screen immersive list). One cursor drives all of
 * them: each index change becomes a request to bring that line into view,
 * delivered to every view that is currently visible.
 */

use log::debug;

use crate::sync::cursor::CursorChange;

/// A rendered list of timed lines that can scroll a line into view
pub trait LyricView {
    /// Stable name used to address the view
    fn name(&self) -> &str;

    /// Bring the line at `index` to the center of the view
    fn center_on(&mut self, index: usize);
}

// @struct: Registered view and its visibility
struct ViewSlot {
    view: Box<dyn LyricView>,
    visible: bool,
}

/// Views kept in sync with one cursor
#[derive(Default)]
pub struct ViewRegistry {
    slots: Vec<ViewSlot>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view; a view with the same name is replaced
    pub fn attach(&mut self, view: Box<dyn LyricView>, visible: bool) {
        let name = view.name().to_string();
        self.slots.retain(|s| s.view.name() != name);
        debug!("Attached lyric view '{}' (visible: {})", name, visible);
        self.slots.push(ViewSlot { view, visible });
    }

    /// Remove a view by name
    pub fn detach(&mut self, name: &str) -> Option<Box<dyn LyricView>> {
        let position = self.slots.iter().position(|s| s.view.name() == name)?;
        Some(self.slots.remove(position).view)
    }

    /// Show or hide a view.
    ///
    /// A view that becomes visible is centered on `active` right away.
    /// Returns false when no view has that name.
    pub fn set_visible(&mut self, name: &str, visible: bool, active: Option<usize>) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.view.name() == name) else {
            return false;
        };
        let was_visible = slot.visible;
        slot.visible = visible;
        if visible && !was_visible {
            if let Some(index) = active {
                slot.view.center_on(index);
            }
        }
        true
    }

    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.slots.iter().find(|s| s.view.name() == name).map(|s| s.visible)
    }

    /// Forward an index change to every visible view.
    ///
    /// Returns the number of views asked to center.
    pub fn notify(&mut self, change: &CursorChange) -> usize {
        match change.current {
            Some(index) => self.center_visible(index),
            None => 0,
        }
    }

    /// Ask every visible view to center `index`
    pub fn center_visible(&mut self, index: usize) -> usize {
        let mut centered = 0;
        for slot in self.slots.iter_mut().filter(|s| s.visible) {
            slot.view.center_on(index);
            centered += 1;
        }
        centered
    }

    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.view.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
