//! Keyword intent resolver.

use clinic_core::{
    traits::IntentResolver,
    types::{AnswerSegment, Catalog, IntentId, QuickReply},
};

use crate::normalizer::Normalizer;

/// Catalog entry with its id and keywords pre-normalized.
#[derive(Debug)]
struct IndexedIntent {
    id: IntentId,
    normalized_id: String,
    keywords: Vec<String>,
}

/// First-match keyword resolver over an immutable catalog.
///
/// Resolution order:
/// 1. an empty normalized query resolves to nothing;
/// 2. a query equal to an intent id resolves to that intent;
/// 3. otherwise the first intent, in catalog order, owning the first
///    keyword (in keyword order) contained in the query wins.
///
/// Keywords match as plain substrings with no word-boundary check, so a
/// short keyword also fires inside a longer word (`kde` in `kdekoliv`), and
/// a keyword that normalizes to nothing matches any non-empty query.
pub struct KeywordResolver {
    catalog: Catalog,
    normalizer: Normalizer,
    index: Vec<IndexedIntent>,
}

impl KeywordResolver {
    /// Create a resolver, normalizing ids and keywords once up front.
    pub fn new(catalog: Catalog, normalizer: Normalizer) -> Self {
        let index = catalog
            .intents()
            .iter()
            .map(|intent| {
                let keywords: Vec<String> = intent
                    .keywords
                    .iter()
                    .map(|keyword| normalizer.normalize(keyword))
                    .collect();
                if keywords.iter().any(String::is_empty) {
                    tracing::warn!(
                        intent = %intent.id,
                        "Blank keyword matches every non-empty query"
                    );
                }

                IndexedIntent {
                    id: intent.id.clone(),
                    normalized_id: normalizer.normalize(intent.id.as_str()),
                    keywords,
                }
            })
            .collect();

        Self {
            catalog,
            normalizer,
            index,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    fn direct_match(&self, query: &str) -> Option<&IndexedIntent> {
        self.index.iter().find(|entry| entry.normalized_id == query)
    }

    fn keyword_match(&self, query: &str) -> Option<(&IndexedIntent, &str)> {
        self.index.iter().find_map(|entry| {
            entry
                .keywords
                .iter()
                .find(|keyword| query.contains(keyword.as_str()))
                .map(|keyword| (entry, keyword.as_str()))
        })
    }
}

impl IntentResolver for KeywordResolver {
    fn resolve(&self, query: &str) -> Option<IntentId> {
        let query = self.normalizer.normalize(query);
        if query.is_empty() {
            return None;
        }

        if let Some(entry) = self.direct_match(&query) {
            tracing::debug!(intent = %entry.id, "Resolved by direct id");
            return Some(entry.id.clone());
        }

        match self.keyword_match(&query) {
            Some((entry, keyword)) => {
                tracing::debug!(intent = %entry.id, keyword, "Resolved by keyword");
                Some(entry.id.clone())
            }
            None => {
                tracing::debug!(query_len = query.len(), "No intent matched");
                None
            }
        }
    }

    fn lookup_answer(&self, id: &str) -> Option<&[AnswerSegment]> {
        self.catalog.lookup_answer(id)
    }

    fn quick_replies(&self) -> Vec<QuickReply> {
        self.catalog.quick_replies()
    }
}
