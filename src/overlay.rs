// Overlay presentation state for the floating toolbar.
// Two states: Hidden while nothing is selected, Visible at the most recent
// anchor, offset downward so the popover does not cover the selection.

use crate::selection::{ActiveSelection, AnchorPoint};

/// Vertical distance between the selection anchor and the overlay.
pub const OVERLAY_GAP: f64 = 50.0;

/// The controls rendered while the overlay is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayControl {
    Undo,
    Redo,
    ToggleBold,
    BackgroundIntensity,
    Comment,
}

/// All controls, in toolbar order.
pub const OVERLAY_CONTROLS: [OverlayControl; 5] = [
    OverlayControl::Undo,
    OverlayControl::Redo,
    OverlayControl::ToggleBold,
    OverlayControl::BackgroundIntensity,
    OverlayControl::Comment,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    Hidden,
    Visible { position: AnchorPoint },
}

#[derive(Debug, Default)]
pub struct OverlayPresenter {
    state: OverlayState,
}

impl Default for OverlayState {
    fn default() -> Self {
        OverlayState::Hidden
    }
}

impl OverlayPresenter {
    pub fn new() -> Self {
        OverlayPresenter {
            state: OverlayState::Hidden,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, OverlayState::Visible { .. })
    }

    /// Overlay position while visible.
    pub fn position(&self) -> Option<AnchorPoint> {
        match self.state {
            OverlayState::Visible { position } => Some(position),
            OverlayState::Hidden => None,
        }
    }

    /// Controls to render; empty while hidden.
    pub fn controls(&self) -> &'static [OverlayControl] {
        if self.is_visible() {
            &OVERLAY_CONTROLS
        } else {
            &[]
        }
    }

    /// Follow the tracker: visible at the most recent anchor (plus gap) when
    /// a selection is active, hidden otherwise.
    pub fn sync(&mut self, active: Option<ActiveSelection>) {
        self.state = match active {
            Some(active) => OverlayState::Visible {
                position: AnchorPoint {
                    x: active.anchor.x,
                    y: active.anchor.y + OVERLAY_GAP,
                },
            },
            None => OverlayState::Hidden,
        };
    }

    /// Explicit dismiss (click outside / close button).
    pub fn dismiss(&mut self) {
        self.state = OverlayState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionRange;

    fn active(x: f64, y: f64) -> ActiveSelection {
        ActiveSelection {
            range: SelectionRange::new(5, 3),
            anchor: AnchorPoint { x, y },
        }
    }

    #[test]
    fn test_starts_hidden_with_no_controls() {
        let presenter = OverlayPresenter::new();
        assert_eq!(presenter.state(), OverlayState::Hidden);
        assert!(presenter.controls().is_empty());
        assert!(presenter.position().is_none());
    }

    #[test]
    fn test_visible_at_anchor_plus_gap() {
        let mut presenter = OverlayPresenter::new();
        presenter.sync(Some(active(40.0, 10.0)));

        assert!(presenter.is_visible());
        assert_eq!(presenter.position(), Some(AnchorPoint { x: 40.0, y: 60.0 }));
        assert_eq!(presenter.controls().len(), 5);
    }

    #[test]
    fn test_sync_none_hides() {
        let mut presenter = OverlayPresenter::new();
        presenter.sync(Some(active(40.0, 10.0)));
        presenter.sync(None);
        assert_eq!(presenter.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_new_anchor_replaces_old_position() {
        let mut presenter = OverlayPresenter::new();
        presenter.sync(Some(active(40.0, 10.0)));
        presenter.sync(Some(active(104.0, 42.0)));
        assert_eq!(
            presenter.position(),
            Some(AnchorPoint { x: 104.0, y: 92.0 })
        );
    }

    #[test]
    fn test_dismiss_hides() {
        let mut presenter = OverlayPresenter::new();
        presenter.sync(Some(active(40.0, 10.0)));
        presenter.dismiss();
        assert!(!presenter.is_visible());
        assert!(presenter.controls().is_empty());
    }
}
