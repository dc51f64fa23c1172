use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

// =============================================================================
// Intent Types
// =============================================================================

/// Stable identifier of a catalog intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(String);

impl IntentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IntentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<&str> for IntentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One unit of a canned reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerSegment {
    /// Literal text run.
    Text { value: String },
    /// Line break between runs.
    #[serde(rename = "br", alias = "break")]
    Break,
    /// Navigable reference: page anchor, full URL or `tel:` URI.
    Link { text: String, href: String },
}

impl AnswerSegment {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text { value: value.into() }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// A named topic with trigger keywords and a structured reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    /// Human-readable label, also used on quick-reply buttons.
    pub title: String,
    /// Trigger phrases in match priority order.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub answer: Vec<AnswerSegment>,
}

impl Intent {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: IntentId::new(id),
            title: title.into(),
            keywords: Vec::new(),
            answer: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_answer(mut self, answer: Vec<AnswerSegment>) -> Self {
        self.answer = answer;
        self
    }
}

/// Quick-reply button descriptor: an intent id and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub id: IntentId,
    pub title: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, immutable collection of intents.
///
/// Declaration order is significant: it is the tie-break order used by
/// keyword resolution.
#[derive(Debug, Clone)]
pub struct Catalog {
    intents: Vec<Intent>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    intents: Vec<Intent>,
}

impl Catalog {
    /// Build a catalog, rejecting blank or duplicate ids and empty answers.
    pub fn new(intents: Vec<Intent>) -> Result<Self> {
        let mut seen = HashSet::new();
        for intent in &intents {
            if intent.id.as_str().trim().is_empty() {
                return Err(Error::BlankIntentId);
            }
            if !seen.insert(intent.id.as_str()) {
                return Err(Error::DuplicateIntent(intent.id.to_string()));
            }
            if intent.answer.is_empty() {
                return Err(Error::EmptyAnswer(intent.id.to_string()));
            }
        }
        Ok(Self { intents })
    }

    /// Parse a catalog from YAML of the form `intents: [ ... ]`.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        Self::new(file.intents)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn get(&self, id: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.id.as_str() == id)
    }

    /// Direct catalog read by exact id.
    pub fn lookup_answer(&self, id: &str) -> Option<&[AnswerSegment]> {
        self.get(id).map(|intent| intent.answer.as_slice())
    }

    /// One quick reply per intent, in catalog order.
    pub fn quick_replies(&self) -> Vec<QuickReply> {
        self.intents
            .iter()
            .map(|intent| QuickReply {
                id: intent.id.clone(),
                title: intent.title.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}
