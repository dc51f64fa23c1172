use serde::{Deserialize, Serialize};
use url::Url;

// =============================================================================
// Rendered Message Types
// =============================================================================

/// Who authored a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// Where an anchor leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Relative page or in-page anchor, e.g. `kontakt.html#mapa`.
    Page,
    /// Absolute URL.
    External,
    /// `tel:` URI.
    Telephone,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        match Url::parse(href) {
            Ok(url) if url.scheme() == "tel" => Self::Telephone,
            Ok(_) => Self::External,
            Err(_) => Self::Page,
        }
    }
}

/// A display unit produced from an answer segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedUnit {
    Text { value: String },
    LineBreak,
    Anchor {
        text: String,
        href: String,
        kind: LinkKind,
    },
}

/// Ordered display units of one message bubble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedMessage {
    pub units: Vec<RenderedUnit>,
}

impl RenderedMessage {
    pub fn new(units: Vec<RenderedUnit>) -> Self {
        Self { units }
    }

    /// Single text run.
    pub fn from_text(value: impl Into<String>) -> Self {
        Self::new(vec![RenderedUnit::Text { value: value.into() }])
    }

    /// Flatten to plain text; anchors contribute their display text.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for unit in &self.units {
            match unit {
                RenderedUnit::Text { value } => out.push_str(value),
                RenderedUnit::LineBreak => out.push('\n'),
                RenderedUnit::Anchor { text, .. } => out.push_str(text),
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Entry in the append-only conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: RenderedMessage,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: RenderedMessage) -> Self {
        Self {
            role,
            content,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, RenderedMessage::from_text(text))
    }

    pub fn bot(content: RenderedMessage) -> Self {
        Self::new(Role::Bot, content)
    }
}
