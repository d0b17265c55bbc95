use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::skill::Skill;

/// Number of characters of raw CV text exposed in document previews.
const PREVIEW_LEN: usize = 200;

/// A candidate whose CV has been submitted for extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    #[must_use]
    pub fn new(full_name: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            full_name,
            email,
            created_at: Utc::now(),
        }
    }
}

/// A raw CV submission owned by an employee. `raw_text` is stored exactly
/// as submitted, untrimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvDocument {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

impl CvDocument {
    #[must_use]
    pub fn new(employee_id: Uuid, raw_text: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            employee_id,
            raw_text,
            created_at: Utc::now(),
        }
    }

    /// First 200 characters of the raw text, for listing screens.
    #[must_use]
    pub fn preview(&self) -> String {
        Self::preview_of(&self.raw_text)
    }

    /// Preview of raw text that is not yet wrapped in a `CvDocument`.
    #[must_use]
    pub fn preview_of(raw_text: &str) -> String {
        raw_text.chars().take(PREVIEW_LEN).collect()
    }
}

/// One employee row in the browse listing, with an association count
/// instead of the full skill set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub skills_count: i64,
}

/// Shortened view of a stored CV document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvDocumentSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub preview: String,
}

/// Full detail view of one employee: matched skills and document previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub id: Uuid,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub skills: Vec<Skill>,
    pub cv_documents: Vec<CvDocumentSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_returns_short_text_unchanged() {
        let doc = CvDocument::new(Uuid::now_v7(), "C# and .NET".to_string());
        assert_eq!(doc.preview(), "C# and .NET");
    }

    #[test]
    fn preview_truncates_to_200_chars() {
        let doc = CvDocument::new(Uuid::now_v7(), "x".repeat(500));
        assert_eq!(doc.preview().len(), 200);
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        let doc = CvDocument::new(Uuid::now_v7(), "é".repeat(300));
        assert_eq!(doc.preview().chars().count(), 200);
    }
}
