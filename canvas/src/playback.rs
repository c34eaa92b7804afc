//! Live playback handles (e.g. `<video>` nodes) keyed by element.
//!
//! The rendering layer owns one handle per mounted video element. After
//! every change to the visible element set it calls [`PlaybackRegistry::sync`],
//! which mounts handles for new videos and hands back the handles of videos
//! that are gone so the caller can tear them down.

#[cfg(test)]
#[path = "playback_test.rs"]
mod playback_test;

use std::collections::{HashMap, HashSet};

use crate::doc::{Element, ElementId, MediaKind};

/// Map from element id to its mounted playback handle.
#[derive(Debug)]
pub struct PlaybackRegistry<H> {
    handles: HashMap<ElementId, H>,
}

impl<H> PlaybackRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self { handles: HashMap::new() }
    }

    /// Reconcile with the currently visible elements.
    ///
    /// `mount` is called once for each video element without a handle.
    /// Returns the handles whose elements are no longer visible (or are no
    /// longer videos); the caller is responsible for releasing them.
    pub fn sync<'a, I, F>(&mut self, visible: I, mut mount: F) -> Vec<H>
    where
        I: IntoIterator<Item = &'a Element>,
        F: FnMut(&Element) -> H,
    {
        let mut live: HashSet<ElementId> = HashSet::new();
        for el in visible {
            if el.kind != MediaKind::Video {
                continue;
            }
            live.insert(el.id);
            if !self.handles.contains_key(&el.id) {
                self.handles.insert(el.id, mount(el));
            }
        }

        let stale: Vec<ElementId> = self.handles.keys().filter(|id| !live.contains(id)).copied().collect();
        stale.iter().filter_map(|id| self.handles.remove(id)).collect()
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&H> {
        self.handles.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut H> {
        self.handles.get_mut(id)
    }

    /// Release every handle, e.g. when leaving playback.
    pub fn clear(&mut self) -> Vec<H> {
        self.handles.drain().map(|(_, h)| h).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H> Default for PlaybackRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
