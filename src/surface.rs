// Editing-surface capability trait.
// The toolbar owns no text data: it observes and mutates an external
// rich-text engine through this interface only. The engine keeps the
// authoritative document, selection and history buffer.

use std::collections::HashSet;

use thiserror::Error;

use crate::selection::SelectionRange;

/// Attribute name for the bold toggle.
pub const FORMAT_BOLD: &str = "bold";
/// Attribute name for the background color.
pub const FORMAT_BACKGROUND: &str = "background";

/// Top-left corner of the bounding box of a range, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
}

/// Formatting state reported for a range.
///
/// This is a representative read at the range anchor; mixed ranges are not
/// resolved further.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatState {
    pub bold: bool,
    pub background: Option<String>,
}

/// Value for a single format attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("range {start}+{length} is outside the document")]
    OutOfBounds { start: usize, length: usize },
    #[error("format {0:?} is not enabled on this surface")]
    FormatNotAllowed(String),
    #[error("invalid value for format {attribute:?}")]
    InvalidValue { attribute: String },
}

/// Configuration handed to the surface at construction.
///
/// The history knobs tune the surface's native buffer; the toolbar itself
/// implements neither coalescing nor a stack of its own.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Edits closer together than this collapse into one history step.
    pub history_coalesce_delay_ms: u64,
    /// Oldest history entries are evicted beyond this depth.
    pub history_max_depth: usize,
    /// Only these attributes may be applied through `format_range`.
    pub allowed_formats: HashSet<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            history_coalesce_delay_ms: 1000,
            history_max_depth: 100,
            allowed_formats: [FORMAT_BOLD, FORMAT_BACKGROUND]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Notifications from the surface, delivered in document-mutation order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The selection moved. `None` means it disappeared entirely (blur);
    /// a zero-length range is a caret move.
    SelectionChanged(Option<SelectionRange>),
    /// Document content (including format attributes) changed.
    TextChanged,
}

pub trait EditingSurface {
    fn selection(&self) -> Option<SelectionRange>;

    /// Bounding-box top-left of `[start, start + length)`. Fails if the
    /// range lies outside the current document.
    fn bounds(&self, start: usize, length: usize) -> Result<Bounds, SurfaceError>;

    /// Representative format read for a range.
    fn format_at(&self, range: SelectionRange) -> Result<FormatState, SurfaceError>;

    /// Apply one format attribute uniformly over a range.
    fn format_range(
        &mut self,
        range: SelectionRange,
        attribute: &str,
        value: FormatValue,
    ) -> Result<(), SurfaceError>;

    fn set_selection(&mut self, range: SelectionRange);

    fn undo(&mut self);
    fn redo(&mut self);
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    /// Drain queued notifications, in the order the document was mutated.
    fn take_events(&mut self) -> Vec<SurfaceEvent>;
}
