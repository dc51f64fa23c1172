//! Intent resolution trait.

use crate::types::{AnswerSegment, IntentId, QuickReply};

/// Resolves free text to a catalog intent.
///
/// Implementations are pure: the same query against the same catalog always
/// yields the same result, and resolution never fails.
pub trait IntentResolver: Send + Sync {
    /// Resolve a raw query to at most one intent id.
    fn resolve(&self, query: &str) -> Option<IntentId>;

    /// Direct catalog read by exact intent id.
    fn lookup_answer(&self, id: &str) -> Option<&[AnswerSegment]>;

    /// Quick-reply buttons in catalog order.
    fn quick_replies(&self) -> Vec<QuickReply>;
}
