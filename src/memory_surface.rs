// In-memory editing surface.
// A reference implementation of EditingSurface used by the tests and the
// demo binary: a linear char-offset text model with per-char format
// attributes, a fixed-metric character grid for bounds queries, and a
// native snapshot history with a coalescing window and bounded depth.

use unicode_segmentation::UnicodeSegmentation;

use crate::selection::SelectionRange;
use crate::surface::{
    Bounds, EditingSurface, FORMAT_BACKGROUND, FORMAT_BOLD, FormatState, FormatValue,
    SurfaceConfig, SurfaceError, SurfaceEvent,
};

/// Format attributes carried per character.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharFormat {
    pub bold: bool,
    pub background: Option<String>,
}

/// Fixed font metrics for the character-grid bounds model. Columns are
/// measured in grapheme clusters, lines by newline count.
#[derive(Debug, Clone, Copy)]
pub struct GridMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_left: f64,
    pub padding_top: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        GridMetrics {
            char_width: 8.0,
            line_height: 16.0,
            padding_left: 0.0,
            padding_top: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    text: Vec<char>,
    formats: Vec<CharFormat>,
}

pub struct MemorySurface {
    text: Vec<char>,
    formats: Vec<CharFormat>,
    selection: Option<SelectionRange>,
    config: SurfaceConfig,
    metrics: GridMetrics,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    events: Vec<SurfaceEvent>,
    now_ms: u64,
    last_record_ms: Option<u64>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        MemorySurface::new(SurfaceConfig::default())
    }
}

impl MemorySurface {
    pub fn new(config: SurfaceConfig) -> Self {
        MemorySurface {
            text: Vec::new(),
            formats: Vec::new(),
            selection: None,
            config,
            metrics: GridMetrics::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            events: Vec::new(),
            now_ms: 0,
            last_record_ms: None,
        }
    }

    /// Create a surface with initial content. The initial text is not an
    /// undoable step and produces no events.
    pub fn with_text(text: &str, config: SurfaceConfig) -> Self {
        let mut surface = MemorySurface::new(config);
        surface.text = text.chars().collect();
        surface.formats = vec![CharFormat::default(); surface.text.len()];
        surface
    }

    pub fn set_metrics(&mut self, metrics: GridMetrics) {
        self.metrics = metrics;
    }

    /// Advance the surface's logical clock. Edits recorded further apart
    /// than the configured coalescing delay open a new history step.
    pub fn advance_clock(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Format attributes of the character at `offset`.
    pub fn format_of(&self, offset: usize) -> Option<&CharFormat> {
        self.formats.get(offset)
    }

    /// Debug rendering of the document as runs of identical formatting,
    /// one run per line.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        let mut i = 0;
        while i < self.text.len() {
            let fmt = self.formats[i].clone();
            let mut j = i + 1;
            while j < self.text.len() && self.formats[j] == fmt {
                j += 1;
            }
            let run: String = self.text[i..j].iter().collect();
            let mut line = format!("{:?}", run);
            if fmt.bold {
                line.push_str(" bold");
            }
            if let Some(bg) = &fmt.background {
                line.push_str(&format!(" bg={bg}"));
            }
            lines.push(line);
            i = j;
        }
        lines.join("\n")
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            formats: self.formats.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.text = snapshot.text;
        self.formats = snapshot.formats;
        self.events.push(SurfaceEvent::TextChanged);
        // A restored document may no longer contain the selection.
        if let Some(sel) = self.selection
            && sel.end() > self.text.len()
        {
            self.selection = None;
            self.events.push(SurfaceEvent::SelectionChanged(None));
        }
    }

    /// Open or extend a history step before a mutation. Mutations within
    /// the coalescing window share the step opened by the first of them;
    /// the oldest step is evicted beyond the configured depth.
    fn record_history(&mut self) {
        self.redo_stack.clear();
        let coalesce = match self.last_record_ms {
            Some(last) => {
                self.now_ms.saturating_sub(last) < self.config.history_coalesce_delay_ms
                    && !self.undo_stack.is_empty()
            }
            None => false,
        };
        if !coalesce {
            self.undo_stack.push(self.snapshot());
            if self.undo_stack.len() > self.config.history_max_depth {
                self.undo_stack.remove(0);
            }
        }
        self.last_record_ms = Some(self.now_ms);
    }

    /// Insert text at a char offset (clamped to the document end).
    pub fn insert_text(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.text.len());
        self.record_history();

        let chars: Vec<char> = text.chars().collect();
        let inserted = chars.len();
        self.formats
            .splice(offset..offset, vec![CharFormat::default(); inserted]);
        self.text.splice(offset..offset, chars);
        self.events.push(SurfaceEvent::TextChanged);
        self.adjust_selection_after_insert(offset, inserted);
    }

    /// Delete a char range (clamped to the document end).
    pub fn delete_range(&mut self, range: SelectionRange) {
        let start = range.start.min(self.text.len());
        let end = range.end().min(self.text.len());
        if start >= end {
            return;
        }
        self.record_history();

        self.text.drain(start..end);
        self.formats.drain(start..end);
        self.events.push(SurfaceEvent::TextChanged);
        self.adjust_selection_after_delete(start, end - start);
    }

    /// Move the user selection, as if done with the mouse or keyboard.
    pub fn select(&mut self, range: SelectionRange) {
        self.selection = Some(range);
        self.events.push(SurfaceEvent::SelectionChanged(Some(range)));
    }

    /// Drop the selection entirely, as on focus loss.
    pub fn blur(&mut self) {
        self.selection = None;
        self.events.push(SurfaceEvent::SelectionChanged(None));
    }

    fn adjust_selection_after_insert(&mut self, offset: usize, inserted: usize) {
        let Some(sel) = self.selection else { return };
        let new = if offset <= sel.start {
            SelectionRange::new(sel.start + inserted, sel.length)
        } else if offset < sel.end() {
            SelectionRange::new(sel.start, sel.length + inserted)
        } else {
            return;
        };
        self.selection = Some(new);
        self.events.push(SurfaceEvent::SelectionChanged(Some(new)));
    }

    fn adjust_selection_after_delete(&mut self, start: usize, removed: usize) {
        let Some(sel) = self.selection else { return };
        let end = start + removed;
        let new = if end <= sel.start {
            SelectionRange::new(sel.start - removed, sel.length)
        } else if start >= sel.end() {
            return;
        } else {
            // A delete overlapping the selection collapses it to a caret.
            SelectionRange::new(start.min(sel.start), 0)
        };
        self.selection = Some(new);
        self.events.push(SurfaceEvent::SelectionChanged(Some(new)));
    }

    fn check_range(&self, range: SelectionRange) -> Result<(), SurfaceError> {
        if range.end() > self.text.len() {
            return Err(SurfaceError::OutOfBounds {
                start: range.start,
                length: range.length,
            });
        }
        Ok(())
    }
}

impl EditingSurface for MemorySurface {
    fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    fn bounds(&self, start: usize, length: usize) -> Result<Bounds, SurfaceError> {
        if start + length > self.text.len() {
            return Err(SurfaceError::OutOfBounds { start, length });
        }

        let mut line = 0usize;
        let mut line_start = 0usize;
        for (i, ch) in self.text[..start].iter().enumerate() {
            if *ch == '\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        let prefix: String = self.text[line_start..start].iter().collect();
        let column = prefix.graphemes(true).count();

        Ok(Bounds {
            left: self.metrics.padding_left + column as f64 * self.metrics.char_width,
            top: self.metrics.padding_top + line as f64 * self.metrics.line_height,
        })
    }

    fn format_at(&self, range: SelectionRange) -> Result<FormatState, SurfaceError> {
        self.check_range(range)?;
        let format = self
            .formats
            .get(range.start)
            .cloned()
            .unwrap_or_default();
        Ok(FormatState {
            bold: format.bold,
            background: format.background,
        })
    }

    fn format_range(
        &mut self,
        range: SelectionRange,
        attribute: &str,
        value: FormatValue,
    ) -> Result<(), SurfaceError> {
        if !self.config.allowed_formats.contains(attribute) {
            return Err(SurfaceError::FormatNotAllowed(attribute.to_string()));
        }
        self.check_range(range)?;
        if range.is_caret() {
            return Ok(());
        }

        self.record_history();
        match (attribute, value) {
            (FORMAT_BOLD, FormatValue::Bool(bold)) => {
                for format in &mut self.formats[range.start..range.end()] {
                    format.bold = bold;
                }
            }
            (FORMAT_BACKGROUND, FormatValue::Text(color)) => {
                for format in &mut self.formats[range.start..range.end()] {
                    format.background = Some(color.clone());
                }
            }
            _ => {
                return Err(SurfaceError::InvalidValue {
                    attribute: attribute.to_string(),
                });
            }
        }
        self.events.push(SurfaceEvent::TextChanged);

        // Attribute mutation collapses the selection to a caret at the end
        // of the range, as several real engines do. Callers that want the
        // selection back must re-assert it.
        let caret = SelectionRange::new(range.end(), 0);
        self.selection = Some(caret);
        self.events.push(SurfaceEvent::SelectionChanged(Some(caret)));
        Ok(())
    }

    fn set_selection(&mut self, range: SelectionRange) {
        self.selection = Some(range);
        self.events.push(SurfaceEvent::SelectionChanged(Some(range)));
    }

    fn undo(&mut self) {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.redo_stack.push(self.snapshot());
            self.restore(snapshot);
            // The next edit starts a fresh history step.
            self.last_record_ms = None;
        }
    }

    fn redo(&mut self) {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.undo_stack.push(self.snapshot());
            self.restore(snapshot);
            self.last_record_ms = None;
        }
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}
