//! Mock implementations of core traits for testing.
//!
//! These let the conversation flow be exercised without a real catalog or a
//! browser.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    traits::{IntentResolver, SurfaceView},
    types::{AnswerSegment, IntentId, Message, QuickReply},
};

// =============================================================================
// Mock Resolver
// =============================================================================

/// Resolver with scripted exact-match answers.
pub struct MockResolver {
    routes: HashMap<String, IntentId>,
    answers: Vec<(IntentId, String, Vec<AnswerSegment>)>,
    queries: Mutex<Vec<String>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            answers: Vec::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Register an intent that answers with a single text run.
    pub fn with_intent(mut self, id: &str, answer: &str) -> Self {
        self.answers.push((
            IntentId::new(id),
            id.to_string(),
            vec![AnswerSegment::text(answer)],
        ));
        self.routes.insert(id.to_string(), IntentId::new(id));
        self
    }

    /// Route an exact query string to an intent.
    pub fn with_route(mut self, query: &str, id: &str) -> Self {
        self.routes.insert(query.to_string(), IntentId::new(id));
        self
    }

    /// Queries passed to `resolve`, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentResolver for MockResolver {
    fn resolve(&self, query: &str) -> Option<IntentId> {
        self.queries.lock().unwrap().push(query.to_string());
        self.routes.get(query).cloned()
    }

    fn lookup_answer(&self, id: &str) -> Option<&[AnswerSegment]> {
        self.answers
            .iter()
            .find(|(intent, _, _)| intent.as_str() == id)
            .map(|(_, _, answer)| answer.as_slice())
    }

    fn quick_replies(&self) -> Vec<QuickReply> {
        self.answers
            .iter()
            .map(|(id, title, _)| QuickReply {
                id: id.clone(),
                title: title.clone(),
            })
            .collect()
    }
}

// =============================================================================
// Recording View
// =============================================================================

/// A call made against a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Append(Message),
    Scroll,
    PanelVisible(bool),
    FocusInput,
    FocusLauncher,
}

/// View that records every call, in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&Message> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Append(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl SurfaceView for RecordingView {
    fn append_message(&mut self, message: Message) {
        self.calls.push(ViewCall::Append(message));
    }

    fn message_count(&self) -> usize {
        self.messages().len()
    }

    fn scroll_to_latest(&mut self) {
        self.calls.push(ViewCall::Scroll);
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.calls.push(ViewCall::PanelVisible(visible));
    }

    fn focus_input(&mut self) {
        self.calls.push(ViewCall::FocusInput);
    }

    fn focus_launcher(&mut self) {
        self.calls.push(ViewCall::FocusLauncher);
    }
}
