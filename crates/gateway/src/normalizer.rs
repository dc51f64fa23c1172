//! Text normalization for accent- and case-insensitive matching.

use std::sync::OnceLock;

use clinic_core::config::NormalizationMode;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_RANGE: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

fn diacritic_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| match Regex::new(r"\p{Diacritic}") {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, "Diacritic property class unavailable");
            None
        }
    })
    .as_ref()
}

/// Concrete stripping strategy, fixed when the normalizer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Decompose, then drop every character with the Unicode `Diacritic`
    /// property, spacing marks such as `^` and `` ` `` included.
    Unicode,
    /// Decompose, then drop only the basic combining block.
    CombiningRange,
    /// Trim and lowercase only.
    CaseOnly,
}

/// Canonicalizes text before comparison: trim, lowercase, strip diacritics.
///
/// Normalization is total. A degraded strategy loses accuracy on accented
/// input but never fails.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    strategy: Strategy,
}

impl Normalizer {
    pub fn new(mode: NormalizationMode) -> Self {
        let strategy = match mode {
            NormalizationMode::Auto => Self::probe(),
            NormalizationMode::Unicode if diacritic_regex().is_some() => Strategy::Unicode,
            NormalizationMode::Unicode | NormalizationMode::CombiningRange => {
                Strategy::CombiningRange
            }
            NormalizationMode::CaseOnly => Strategy::CaseOnly,
        };
        tracing::debug!(?mode, ?strategy, "Text normalizer initialized");
        Self { strategy }
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Pick the most accurate strategy the runtime supports.
    fn probe() -> Strategy {
        let decomposed: Vec<char> = "\u{e9}".nfd().collect();
        match decomposed.as_slice() {
            ['e', mark] if COMBINING_RANGE.contains(mark) => {
                if diacritic_regex().is_some() {
                    Strategy::Unicode
                } else {
                    Strategy::CombiningRange
                }
            }
            _ => {
                tracing::warn!("Canonical decomposition unavailable, matching is accent-sensitive");
                Strategy::CaseOnly
            }
        }
    }

    pub fn normalize(&self, input: &str) -> String {
        let folded = input.trim().to_lowercase();
        match (self.strategy, diacritic_regex()) {
            (Strategy::Unicode, Some(re)) => {
                let decomposed: String = folded.nfd().collect();
                re.replace_all(&decomposed, "").into_owned()
            }
            (Strategy::Unicode, None) | (Strategy::CombiningRange, _) => folded
                .nfd()
                .filter(|c| !COMBINING_RANGE.contains(c))
                .collect(),
            (Strategy::CaseOnly, _) => folded,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizationMode::Auto)
    }
}
