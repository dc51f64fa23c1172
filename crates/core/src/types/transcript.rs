use serde::Serialize;

use super::Message;
use crate::traits::SurfaceView;

// =============================================================================
// In-Memory Surface View
// =============================================================================

/// Which widget element holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    None,
    Input,
    Launcher,
}

/// Headless view that keeps the conversation log in memory.
///
/// Used for server-side sessions, where the client renders the messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
    panel_visible: bool,
    focus: Focus,
    /// Index of the newest entry the view has been scrolled to.
    scrolled_to: Option<usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended at or after `start`.
    pub fn messages_since(&self, start: usize) -> &[Message] {
        self.messages.get(start..).unwrap_or(&[])
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn scrolled_to(&self) -> Option<usize> {
        self.scrolled_to
    }
}

impl SurfaceView for Transcript {
    fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn message_count(&self) -> usize {
        self.messages.len()
    }

    fn scroll_to_latest(&mut self) {
        self.scrolled_to = self.messages.len().checked_sub(1);
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    fn focus_launcher(&mut self) {
        self.focus = Focus::Launcher;
    }
}
