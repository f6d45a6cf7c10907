// Floating toolbar glue.
// Owns the surface handle, wires the tracker, presenter and controllers,
// and drives the event pump. Component errors are absorbed here: a failed
// command produces no observable change.

use std::cell::RefCell;
use std::rc::Rc;

use crate::comment::{CommentEvent, CommentSink, LogCommentSink};
use crate::formatting::{FormatCommand, FormattingController};
use crate::history::HistoryController;
use crate::overlay::{OverlayPresenter, OverlayState};
use crate::selection::{SelectionRange, SelectionTracker};
use crate::surface::{EditingSurface, SurfaceEvent};

pub struct FloatingToolbar<S: EditingSurface, C: CommentSink = LogCommentSink> {
    surface: Rc<RefCell<S>>,
    tracker: SelectionTracker,
    presenter: OverlayPresenter,
    formatting: FormattingController<S>,
    history: HistoryController<S>,
    comments: C,
}

impl<S: EditingSurface> FloatingToolbar<S> {
    pub fn new(surface: Rc<RefCell<S>>) -> Self {
        Self::with_comment_sink(surface, LogCommentSink)
    }
}

impl<S: EditingSurface, C: CommentSink> FloatingToolbar<S, C> {
    pub fn with_comment_sink(surface: Rc<RefCell<S>>, comments: C) -> Self {
        FloatingToolbar {
            formatting: FormattingController::new(surface.clone()),
            history: HistoryController::new(surface.clone()),
            tracker: SelectionTracker::new(),
            presenter: OverlayPresenter::new(),
            surface,
            comments,
        }
    }

    /// Drain surface notifications and bring tracker and overlay up to
    /// date, in the order the document was mutated.
    pub fn pump(&mut self) {
        let events = self.surface.borrow_mut().take_events();
        for event in events {
            {
                let surface = self.surface.borrow();
                match event {
                    SurfaceEvent::SelectionChanged(range) => {
                        self.tracker.handle_selection_change(&*surface, range);
                    }
                    SurfaceEvent::TextChanged => {
                        self.tracker.refresh(&*surface);
                    }
                }
            }
            self.presenter.sync(self.tracker.active());
        }
    }

    pub fn overlay(&self) -> &OverlayPresenter {
        &self.presenter
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.presenter.state()
    }

    /// Close the overlay without touching the selection. It reappears on
    /// the next selection change.
    pub fn dismiss_overlay(&mut self) {
        self.presenter.dismiss();
    }

    /// The tracked selection the commands below operate on.
    pub fn selection(&self) -> Option<SelectionRange> {
        self.tracker.range()
    }

    pub fn undo(&mut self) {
        self.history.undo();
        self.pump();
    }

    pub fn redo(&mut self) {
        self.history.redo();
        self.pump();
    }

    /// Toggle bold on the current selection. No-op without one.
    pub fn toggle_bold(&mut self) {
        self.run_format(FormatCommand::ToggleBold);
    }

    /// Apply the background ramp at `intensity` to the current selection.
    /// No-op without one.
    pub fn set_background(&mut self, intensity: f64) {
        self.run_format(FormatCommand::SetBackground { intensity });
    }

    fn run_format(&mut self, command: FormatCommand) {
        let Some(range) = self.tracker.range() else {
            return;
        };
        if let Err(err) = self.formatting.apply(range, &command) {
            log::warn!("formatting skipped: {err}");
        }
        // The command has fully completed, including selection
        // re-assertion, before queued notifications are handled.
        self.pump();
    }

    /// Submit free-text as a comment. Returns whether an event was emitted;
    /// empty or whitespace-only input is discarded.
    pub fn add_comment(&mut self, input: &str) -> bool {
        match CommentEvent::from_input(input) {
            Some(event) => {
                self.comments.submit(event);
                true
            }
            None => false,
        }
    }

    pub fn surface(&self) -> Rc<RefCell<S>> {
        self.surface.clone()
    }
}
