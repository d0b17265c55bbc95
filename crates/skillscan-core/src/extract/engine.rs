use std::collections::HashSet;

use uuid::Uuid;

use super::matcher::TokenMatcher;
use super::tokenizer::Tokenizer;
use crate::skill::Skill;

/// Runs the token matcher over a full skill dictionary.
///
/// Pure and synchronous: the caller supplies the dictionary snapshot (the
/// workflow loads it inside its transaction), so the engine is testable
/// without any storage behind it.
#[derive(Debug, Clone, Default)]
pub struct SkillExtractor {
    tokenizer: Tokenizer,
    matcher: TokenMatcher,
}

impl SkillExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every dictionary skill mentioned in `raw_text`, deduplicated
    /// by id, in dictionary order. Blank text or an empty dictionary
    /// short-circuits before any tokenization.
    #[must_use]
    pub fn extract(&self, raw_text: &str, dictionary: &[Skill]) -> Vec<Skill> {
        if raw_text.trim().is_empty() || dictionary.is_empty() {
            return Vec::new();
        }

        let sets = self.tokenizer.tokenize(raw_text);

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut matched = Vec::new();

        for skill in dictionary {
            let candidates = skill.candidate_terms();
            if self.matcher.is_match(&candidates, &sets) && seen.insert(skill.id) {
                matched.push(skill.clone());
            }
        }

        tracing::debug!(
            matched = matched.len(),
            dictionary = dictionary.len(),
            "skill extraction complete"
        );

        matched
    }
}
