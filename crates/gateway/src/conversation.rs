//! Chat widget conversation flow.
//!
//! A [`Conversation`] drives an injected [`SurfaceView`]: it owns the
//! open/closed state, greets once, echoes user input and appends either the
//! matched answer or a fallback message.

use std::sync::Arc;

use clinic_core::{
    config::ChatConfig,
    traits::{IntentResolver, SurfaceView},
    types::{AnswerSegment, IntentId, Message},
};
use clinic_governance::{track_resolution, ResolutionOutcome};
use serde::Serialize;

use crate::renderer::render;

const DEFAULT_GREETING: &str =
    "Ahoj! Rád poradím. Vyberte téma dole, nebo napište dotaz (např. „adresa“, „kontakt“, „hodiny“).";

const DEFAULT_FALLBACK: &str =
    "Tomu zatím nerozumím. Zkuste prosím „adresa“, „kontakt“, „hodiny“, „služby“ nebo „zastupování“.";

/// Visibility of the chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceState {
    Closed,
    Open,
}

/// What the bot answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answered(IntentId),
    Fallback,
}

/// Fixed bot texts that are not tied to an intent.
#[derive(Debug, Clone)]
pub struct ConversationScript {
    pub greeting: Vec<AnswerSegment>,
    pub fallback: Vec<AnswerSegment>,
}

impl ConversationScript {
    pub fn from_config(config: &ChatConfig) -> Self {
        let mut script = Self::default();
        if let Some(greeting) = &config.greeting {
            script.greeting = vec![AnswerSegment::text(greeting)];
        }
        if let Some(fallback) = &config.fallback {
            script.fallback = vec![AnswerSegment::text(fallback)];
        }
        script
    }
}

impl Default for ConversationScript {
    fn default() -> Self {
        Self {
            greeting: vec![AnswerSegment::text(DEFAULT_GREETING)],
            fallback: vec![AnswerSegment::text(DEFAULT_FALLBACK)],
        }
    }
}

pub struct Conversation<V: SurfaceView> {
    resolver: Arc<dyn IntentResolver>,
    script: ConversationScript,
    view: V,
    state: SurfaceState,
}

impl<V: SurfaceView> Conversation<V> {
    /// Attach to a view. The panel starts closed.
    pub fn new(resolver: Arc<dyn IntentResolver>, mut view: V, script: ConversationScript) -> Self {
        view.set_panel_visible(false);
        Self {
            resolver,
            script,
            view,
            state: SurfaceState::Closed,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SurfaceState::Open
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Launcher button: flip visibility.
    pub fn toggle(&mut self) {
        self.set_open(!self.is_open());
    }

    /// Escape key. Closes an open panel and returns focus to the launcher.
    pub fn escape(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.set_open(false);
        self.view.focus_launcher();
        true
    }

    /// Click outside the widget. Closes an open panel.
    pub fn click_outside(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.set_open(false);
        true
    }

    /// Typed submission. Blank input is ignored and returns `None`.
    pub fn submit(&mut self, text: &str) -> Option<Reply> {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return None;
        }

        self.append(Message::user(cleaned));
        let resolved = self.resolver.resolve(cleaned);
        Some(self.reply(resolved))
    }

    /// Quick-reply button carrying an intent id (or alias) and its label.
    ///
    /// The token is looked up directly; a token that is not an id goes
    /// through normal resolution. Blank tokens are ignored.
    pub fn quick_reply(&mut self, token: &str, label: &str) -> Option<Reply> {
        if token.trim().is_empty() {
            return None;
        }

        let echo = if label.trim().is_empty() { token } else { label };
        self.append(Message::user(echo.trim()));

        let resolved = match self.resolver.lookup_answer(token) {
            Some(_) => Some(IntentId::new(token)),
            None => self.resolver.resolve(token),
        };
        Some(self.reply(resolved))
    }

    fn set_open(&mut self, open: bool) {
        self.state = if open {
            SurfaceState::Open
        } else {
            SurfaceState::Closed
        };
        self.view.set_panel_visible(open);

        if open {
            self.greet_once();
            self.view.focus_input();
        }
    }

    fn greet_once(&mut self) {
        if self.view.message_count() > 0 {
            return;
        }
        let greeting = render(&self.script.greeting);
        self.append(Message::bot(greeting));
    }

    fn reply(&mut self, resolved: Option<IntentId>) -> Reply {
        let answer = resolved
            .as_ref()
            .and_then(|id| self.resolver.lookup_answer(id.as_str()))
            .map(render);

        match (resolved, answer) {
            (Some(id), Some(answer)) => {
                self.append(Message::bot(answer));
                track_resolution(ResolutionOutcome::Matched, id.as_str());
                Reply::Answered(id)
            }
            _ => {
                let fallback = render(&self.script.fallback);
                self.append(Message::bot(fallback));
                track_resolution(ResolutionOutcome::Fallback, "");
                Reply::Fallback
            }
        }
    }

    fn append(&mut self, message: Message) {
        self.view.append_message(message);
        self.view.scroll_to_latest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::mocks::{MockResolver, RecordingView, ViewCall};
    use clinic_core::types::{Role, Transcript};

    fn conversation() -> Conversation<Transcript> {
        let resolver = MockResolver::new()
            .with_intent("kontakt", "Volejte nám.")
            .with_route("telefon?", "kontakt");
        Conversation::new(Arc::new(resolver), Transcript::new(), ConversationScript::default())
    }

    #[test]
    fn test_starts_closed() {
        let conv = conversation();
        assert_eq!(conv.state(), SurfaceState::Closed);
        assert!(!conv.view().panel_visible());
        assert!(conv.view().messages().is_empty());
    }

    #[test]
    fn test_greeting_is_idempotent() {
        let mut conv = conversation();
        conv.open();
        conv.close();
        conv.open();
        assert_eq!(conv.view().messages().len(), 1);
        assert_eq!(conv.view().messages()[0].role, Role::Bot);

        conv.submit("telefon?");
        conv.close();
        conv.open();
        assert_eq!(conv.view().messages().len(), 3);
    }

    #[test]
    fn test_open_focuses_input() {
        let mut conv = conversation();
        conv.open();
        assert!(conv.view().panel_visible());
        assert_eq!(conv.view().focus(), clinic_core::types::Focus::Input);
    }

    #[test]
    fn test_submit_matched() {
        let mut conv = conversation();
        let reply = conv.submit("  telefon?  ");
        assert_eq!(reply, Some(Reply::Answered(IntentId::new("kontakt"))));

        let messages = conv.view().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content.plain_text(), "telefon?");
        assert_eq!(messages[1].content.plain_text(), "Volejte nám.");
    }

    #[test]
    fn test_submit_unmatched_appends_one_fallback() {
        let mut conv = conversation();
        assert_eq!(conv.submit("xyzzy not a real topic"), Some(Reply::Fallback));

        let messages = conv.view().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Bot);
        assert_eq!(messages[1].content.plain_text(), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut conv = conversation();
        assert_eq!(conv.submit("   "), None);
        assert!(conv.view().messages().is_empty());
    }

    #[test]
    fn test_quick_reply_uses_label_and_direct_lookup() {
        let resolver = Arc::new(MockResolver::new().with_intent("kontakt", "Volejte nám."));
        let mut conv = Conversation::new(
            resolver.clone(),
            Transcript::new(),
            ConversationScript::default(),
        );

        let reply = conv.quick_reply("kontakt", "Kontakt");
        assert_eq!(reply, Some(Reply::Answered(IntentId::new("kontakt"))));
        assert_eq!(conv.view().messages()[0].content.plain_text(), "Kontakt");
        assert!(resolver.queries().is_empty(), "direct lookup must skip resolution");
    }

    #[test]
    fn test_quick_reply_falls_back_to_resolution() {
        let resolver = Arc::new(
            MockResolver::new()
                .with_intent("kontakt", "Volejte nám.")
                .with_route("telefon", "kontakt"),
        );
        let mut conv = Conversation::new(resolver.clone(), Transcript::new(), ConversationScript::default());

        assert_eq!(
            conv.quick_reply("telefon", ""),
            Some(Reply::Answered(IntentId::new("kontakt")))
        );
        assert_eq!(conv.view().messages()[0].content.plain_text(), "telefon");
        assert_eq!(conv.quick_reply("neznamy", "Neznámý"), Some(Reply::Fallback));
        assert_eq!(conv.quick_reply("", "Prázdné"), None);
        assert_eq!(conv.quick_reply(" \t", ""), None);
        assert_eq!(conv.view().messages().len(), 4);
        assert_eq!(resolver.queries(), vec!["telefon", "neznamy"]);
    }

    #[test]
    fn test_escape_and_outside_click() {
        let mut conv = conversation();
        assert!(!conv.escape());
        assert!(!conv.click_outside());

        conv.open();
        assert!(conv.click_outside());
        assert!(!conv.is_open());

        conv.toggle();
        assert!(conv.is_open());
        assert!(conv.escape());
        assert!(!conv.is_open());
        assert_eq!(conv.view().focus(), clinic_core::types::Focus::Launcher);
    }

    #[test]
    fn test_every_append_scrolls() {
        let resolver = Arc::new(MockResolver::new().with_intent("kontakt", "Volejte nám."));
        let mut conv = Conversation::new(resolver, RecordingView::new(), ConversationScript::default());
        conv.open();
        conv.submit("kontakt");

        let calls = &conv.view().calls;
        for (i, call) in calls.iter().enumerate() {
            if matches!(call, ViewCall::Append(_)) {
                assert_eq!(calls.get(i + 1), Some(&ViewCall::Scroll));
            }
        }
        assert_eq!(conv.view().messages().len(), 3);
    }

    #[test]
    fn test_script_from_config() {
        let config = ChatConfig {
            catalog_path: None,
            normalization: Default::default(),
            greeting: Some("Dobrý den".into()),
            fallback: None,
        };
        let script = ConversationScript::from_config(&config);
        assert_eq!(script.greeting, vec![AnswerSegment::text("Dobrý den")]);
        assert_eq!(script.fallback, vec![AnswerSegment::text(DEFAULT_FALLBACK)]);
    }
}
