use super::tokenizer::{TokenSets, Tokenizer};

/// Decides whether any of a skill's candidate terms appears in a text's
/// token sets. Purely lexical: no stemming, no fuzziness.
#[derive(Debug, Clone, Default)]
pub struct TokenMatcher {
    tokenizer: Tokenizer,
}

impl TokenMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Layered check per candidate, first hit wins:
    /// 1. the whole normalized candidate is a token;
    /// 2. the dot-stripped candidate is a dotless token;
    /// 3. any sub-token of the candidate (split by the tokenizer rule)
    ///    is a token, directly or dot-stripped.
    ///
    /// Layer 3 lets a multi-word alias like "JavaScript ES6" match text
    /// containing only "es6".
    #[must_use]
    pub fn is_match<S: AsRef<str>>(&self, candidates: &[S], sets: &TokenSets) -> bool {
        for candidate in candidates {
            let normalized = candidate.as_ref().to_lowercase().trim().to_string();
            if normalized.is_empty() {
                continue;
            }

            if sets.tokens.contains(&normalized) {
                return true;
            }

            if sets.dotless.contains(&normalized.replace('.', "")) {
                return true;
            }

            for sub in self.tokenizer.split_terms(&normalized) {
                if sets.tokens.contains(&sub) || sets.dotless.contains(&sub.replace('.', "")) {
                    return true;
                }
            }
        }

        false
    }
}
