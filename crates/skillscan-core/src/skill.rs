use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry in the administrator-curated skill dictionary.
///
/// `aliases` is a free-form comma-separated list ("dotnet, dot net");
/// fragments may repeat or carry stray whitespace, which is tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
}

impl Skill {
    #[must_use]
    pub fn new(name: String, aliases: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            aliases,
        }
    }

    /// The terms this skill can match under: its name plus each
    /// comma-separated alias fragment. Blank fragments are dropped;
    /// duplicates are kept (harmless to the matcher).
    #[must_use]
    pub fn candidate_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        if !self.name.trim().is_empty() {
            terms.push(self.name.clone());
        }
        if let Some(aliases) = &self.aliases {
            for part in aliases.split(',') {
                if !part.trim().is_empty() {
                    terms.push(part.to_string());
                }
            }
        }
        terms
    }
}
