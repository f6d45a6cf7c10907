// Undo/redo commands layered over the editing surface's native history.
// Deliberately stateless: a second stack kept here would drift from the
// surface's actual buffer, so this only issues requests and checks the
// surface's own reporting for underflow.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::EditingSurface;

pub struct HistoryController<S: EditingSurface> {
    surface: Rc<RefCell<S>>,
}

impl<S: EditingSurface> HistoryController<S> {
    pub fn new(surface: Rc<RefCell<S>>) -> Self {
        HistoryController { surface }
    }

    /// Undo one history step. Silent no-op when the stack is empty.
    pub fn undo(&self) {
        let mut surface = self.surface.borrow_mut();
        if surface.can_undo() {
            surface.undo();
        } else {
            log::debug!("undo requested with empty history, ignoring");
        }
    }

    /// Redo one history step. Silent no-op when the stack is empty.
    pub fn redo(&self) {
        let mut surface = self.surface.borrow_mut();
        if surface.can_redo() {
            surface.redo();
        } else {
            log::debug!("redo requested with empty history, ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_surface::MemorySurface;
    use crate::surface::SurfaceConfig;

    fn shared(text: &str) -> Rc<RefCell<MemorySurface>> {
        Rc::new(RefCell::new(MemorySurface::with_text(
            text,
            SurfaceConfig::default(),
        )))
    }

    #[test]
    fn test_undo_on_empty_stack_changes_nothing() {
        let surface = shared("Hello");
        let history = HistoryController::new(surface.clone());

        history.undo();
        assert_eq!(surface.borrow().text(), "Hello");

        history.redo();
        assert_eq!(surface.borrow().text(), "Hello");
    }

    #[test]
    fn test_undo_and_redo_round_trip() {
        let surface = shared("Hello");
        let history = HistoryController::new(surface.clone());

        surface.borrow_mut().insert_text(5, " world");
        assert_eq!(surface.borrow().text(), "Hello world");

        history.undo();
        assert_eq!(surface.borrow().text(), "Hello");

        history.redo();
        assert_eq!(surface.borrow().text(), "Hello world");
    }
}
