// Comment capture: fire-and-forget events handed to an external sink.
// Nothing is stored in the toolbar; the sink decides what a comment means.

/// A non-empty comment, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    pub text: String,
}

impl CommentEvent {
    /// Build an event from raw user input. Empty or whitespace-only input
    /// is discarded.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            None
        } else {
            Some(CommentEvent {
                text: text.to_string(),
            })
        }
    }
}

/// Where comment events go. The toolbar does no further processing.
pub trait CommentSink {
    fn submit(&mut self, event: CommentEvent);
}

/// Default sink: record the comment on the log.
#[derive(Debug, Default)]
pub struct LogCommentSink;

impl CommentSink for LogCommentSink {
    fn submit(&mut self, event: CommentEvent) {
        log::info!("Comment added: {}", event.text);
    }
}
