// Selection tracking for the floating toolbar.
// The current range and its screen anchor are stored as one unit so no
// observer ever sees a range without its anchor, or vice versa.

use crate::surface::EditingSurface;

/// A contiguous span of the document, addressed by char offset and length.
///
/// A zero-length range is a caret: no active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub length: usize,
}

impl SelectionRange {
    pub fn new(start: usize, length: usize) -> Self {
        SelectionRange { start, length }
    }

    pub fn is_caret(&self) -> bool {
        self.length == 0
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Screen coordinates used to position the overlay relative to a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

/// An active selection: a non-caret range together with its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSelection {
    pub range: SelectionRange,
    pub anchor: AnchorPoint,
}

/// Observes selection-change notifications from the editing surface and
/// derives the anchor point the overlay is positioned at.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    active: Option<ActiveSelection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        SelectionTracker { active: None }
    }

    /// The current selection with its anchor, if any.
    pub fn active(&self) -> Option<ActiveSelection> {
        self.active
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.active.map(|a| a.range)
    }

    pub fn anchor(&self) -> Option<AnchorPoint> {
        self.active.map(|a| a.anchor)
    }

    /// Handle a selection-change notification.
    ///
    /// A missing or zero-length range clears the active selection, which is
    /// the signal that hides the overlay. A failing bounds query (the range
    /// no longer resolves in the document) is treated the same way rather
    /// than keeping a stale anchor around.
    pub fn handle_selection_change<S: EditingSurface>(
        &mut self,
        surface: &S,
        range: Option<SelectionRange>,
    ) {
        self.active = match range {
            Some(range) if !range.is_caret() => surface
                .bounds(range.start, range.length)
                .ok()
                .map(|b| ActiveSelection {
                    range,
                    anchor: AnchorPoint {
                        x: b.left,
                        y: b.top,
                    },
                }),
            _ => None,
        };
    }

    /// Re-derive the anchor for the current range after a content change.
    pub fn refresh<S: EditingSurface>(&mut self, surface: &S) {
        let range = self.range();
        self.handle_selection_change(surface, range);
    }

    /// Drop the active selection without consulting the surface.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_surface::MemorySurface;
    use crate::surface::SurfaceConfig;

    fn surface() -> MemorySurface {
        MemorySurface::with_text("Hello world", SurfaceConfig::default())
    }

    #[test]
    fn test_caret_clears_selection() {
        let surface = surface();
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(5, 3)));
        assert!(tracker.active().is_some());

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(5, 0)));
        assert!(tracker.active().is_none());
        assert!(tracker.anchor().is_none());
    }

    #[test]
    fn test_missing_range_clears_selection() {
        let surface = surface();
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(0, 5)));
        tracker.handle_selection_change(&surface, None);
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_range_and_anchor_update_together() {
        let surface = surface();
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(5, 3)));
        let active = tracker.active().unwrap();
        assert_eq!(active.range, SelectionRange::new(5, 3));
        // Default grid metrics: 8px per column, line 0 starts at y=10.
        assert_eq!(active.anchor, AnchorPoint { x: 40.0, y: 10.0 });
    }

    #[test]
    fn test_failed_bounds_query_treated_as_no_selection() {
        let surface = surface();
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(5, 3)));
        assert!(tracker.active().is_some());

        // Range past the end of the document.
        tracker.handle_selection_change(&surface, Some(SelectionRange::new(20, 4)));
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_refresh_clears_when_range_no_longer_resolves() {
        let mut surface = surface();
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(6, 5)));
        assert!(tracker.active().is_some());

        surface.delete_range(SelectionRange::new(5, 6));
        tracker.refresh(&surface);
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_anchor_on_second_line() {
        let surface = MemorySurface::with_text("ab\ncd", SurfaceConfig::default());
        let mut tracker = SelectionTracker::new();

        tracker.handle_selection_change(&surface, Some(SelectionRange::new(3, 2)));
        let anchor = tracker.anchor().unwrap();
        assert_eq!(anchor, AnchorPoint { x: 0.0, y: 26.0 });
    }
}
