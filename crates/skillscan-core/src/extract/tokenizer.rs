use std::collections::HashSet;

use regex::Regex;

/// Characters allowed inside a token. Everything else is a separator:
/// a run of separators collapses to one split point and is discarded.
const SPLIT_PATTERN: &str = r"[^A-Za-z0-9#.+]+";

/// The two token views the matcher works against.
///
/// `dotless` carries every token with its `.` characters removed, so a
/// dictionary term like ".NET" can match text containing the bare token
/// "net", and "asp.net" can match "aspnet".
#[derive(Debug, Clone, Default)]
pub struct TokenSets {
    pub tokens: HashSet<String>,
    pub dotless: HashSet<String>,
}

impl TokenSets {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits lowercased free text into deduplicated token sets.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    splitter: Regex,
}

impl Tokenizer {
    /// # Panics
    /// Never: the split pattern is a compile-time constant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            splitter: Regex::new(SPLIT_PATTERN).expect("split pattern is valid"),
        }
    }

    /// Tokenizes `text` into the two set views. Empty or whitespace-only
    /// input yields two empty sets.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> TokenSets {
        if text.trim().is_empty() {
            return TokenSets::default();
        }

        let lowered = text.to_lowercase();
        let tokens: HashSet<String> = self
            .splitter
            .split(&lowered)
            .filter(|t| !t.trim().is_empty())
            .map(ToString::to_string)
            .collect();
        let dotless = tokens.iter().map(|t| t.replace('.', "")).collect();

        TokenSets { tokens, dotless }
    }

    /// Applies the token splitting rule to a single candidate term,
    /// dropping blank fragments. Used for the matcher's sub-token check
    /// ("asp.net core" -> ["asp.net", "core"]).
    #[must_use]
    pub fn split_terms(&self, term: &str) -> Vec<String> {
        self.splitter
            .split(term)
            .filter(|t| !t.trim().is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(text: &str) -> TokenSets {
        Tokenizer::new().tokenize(text)
    }

    #[test]
    fn splits_on_separators_and_lowercases() {
        let sets = tokens_of("Rust, and C#!");
        assert!(sets.tokens.contains("rust"));
        assert!(sets.tokens.contains("and"));
        assert!(sets.tokens.contains("c#"));
        assert_eq!(sets.tokens.len(), 3);
    }

    #[test]
    fn keeps_hash_dot_plus_inside_tokens() {
        let sets = tokens_of("c++ .net node.js");
        assert!(sets.tokens.contains("c++"));
        assert!(sets.tokens.contains(".net"));
        assert!(sets.tokens.contains("node.js"));
    }

    #[test]
    fn dotless_view_strips_dots() {
        let sets = tokens_of(".net asp.net");
        assert!(sets.dotless.contains("net"));
        assert!(sets.dotless.contains("aspnet"));
    }

    #[test]
    fn deduplicates_repeated_tokens() {
        let sets = tokens_of("C# C# C#");
        assert_eq!(sets.tokens.len(), 1);
        assert_eq!(sets.dotless.len(), 1);
    }

    #[test]
    fn empty_and_whitespace_input_yields_empty_sets() {
        assert!(tokens_of("").is_empty());
        assert!(tokens_of("   \t\n").is_empty());
    }

    #[test]
    fn separator_runs_collapse() {
        let sets = tokens_of("a---b   c,,,d");
        assert_eq!(sets.tokens.len(), 4);
    }

    #[test]
    fn split_terms_applies_same_rule_to_candidates() {
        let tokenizer = Tokenizer::new();
        assert_eq!(
            tokenizer.split_terms("asp.net core"),
            vec!["asp.net", "core"]
        );
        assert_eq!(tokenizer.split_terms("javascript es6"), vec!["javascript", "es6"]);
        assert!(tokenizer.split_terms("  ").is_empty());
    }
}
