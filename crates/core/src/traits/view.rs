//! Display collaborator of the conversation surface.

use crate::types::Message;

/// The widget elements a conversation drives, injected at construction.
pub trait SurfaceView {
    /// Append a message to the ordered, append-only log.
    fn append_message(&mut self, message: Message);

    /// Number of messages currently in the log.
    fn message_count(&self) -> usize;

    /// Scroll the log so the newest entry is visible.
    fn scroll_to_latest(&mut self);

    fn set_panel_visible(&mut self, visible: bool);

    /// Move keyboard focus to the text input.
    fn focus_input(&mut self);

    /// Move keyboard focus back to the launcher button.
    fn focus_launcher(&mut self);
}
