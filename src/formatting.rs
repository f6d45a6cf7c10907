// Formatting commands for the selected range.
// Every mutation re-asserts the selection afterwards: some engines collapse
// the selection when an attribute changes, and callers must never observe
// the selection vanish as a side effect of formatting.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::selection::SelectionRange;
use crate::surface::{EditingSurface, FORMAT_BACKGROUND, FORMAT_BOLD, FormatValue};

/// A single formatting mutation, built transiently from a control event.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatCommand {
    ToggleBold,
    SetBackground { intensity: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// The range no longer matches the document; nothing was mutated.
    #[error("selection is stale, formatting skipped")]
    StaleSelection,
}

/// Clamp a slider intensity to [0, 100]. NaN maps to 0.
pub fn clamp_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 100.0)
    }
}

/// Map a slider intensity to the background color ramp: the hue follows the
/// clamped intensity, at full saturation and 50% lightness.
pub fn background_color(intensity: f64) -> String {
    format!("hsl({}, 100%, 50%)", clamp_intensity(intensity))
}

pub struct FormattingController<S: EditingSurface> {
    surface: Rc<RefCell<S>>,
}

impl<S: EditingSurface> FormattingController<S> {
    pub fn new(surface: Rc<RefCell<S>>) -> Self {
        FormattingController { surface }
    }

    pub fn apply(&self, range: SelectionRange, command: &FormatCommand) -> Result<(), FormatError> {
        match command {
            FormatCommand::ToggleBold => self.apply_bold(range),
            FormatCommand::SetBackground { intensity } => self.apply_background(range, *intensity),
        }
    }

    /// Toggle bold over the whole range.
    ///
    /// The decision is a single representative format read at the range
    /// anchor: a mixed range reads as "not bold" and is set bold uniformly.
    pub fn apply_bold(&self, range: SelectionRange) -> Result<(), FormatError> {
        if range.is_caret() {
            return Ok(());
        }
        let mut surface = self.surface.borrow_mut();
        let bold = surface
            .format_at(range)
            .map_err(|_| FormatError::StaleSelection)?
            .bold;
        surface
            .format_range(range, FORMAT_BOLD, FormatValue::Bool(!bold))
            .map_err(|_| FormatError::StaleSelection)?;
        surface.set_selection(range);
        Ok(())
    }

    /// Apply the intensity-driven background color to the range.
    /// Idempotent for a fixed intensity.
    pub fn apply_background(
        &self,
        range: SelectionRange,
        intensity: f64,
    ) -> Result<(), FormatError> {
        if range.is_caret() {
            return Ok(());
        }
        let color = background_color(intensity);
        let mut surface = self.surface.borrow_mut();
        surface
            .format_range(range, FORMAT_BACKGROUND, FormatValue::Text(color))
            .map_err(|_| FormatError::StaleSelection)?;
        surface.set_selection(range);
        Ok(())
    }
}
