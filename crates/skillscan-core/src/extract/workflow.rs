use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::SkillExtractor;
use crate::employee::{CvDocument, Employee};
use crate::skill::Skill;
use crate::storage::Storage;
use crate::{Error, Result};

/// Shared extractor so the split regex is compiled once, not per call.
static EXTRACTOR: LazyLock<SkillExtractor> = LazyLock::new(SkillExtractor::new);

/// One CV submission: who the candidate is and the verbatim CV text.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRequest {
    /// Absent fields deserialize as empty and fail validation, so a
    /// partial submission is rejected as `Validation`, not as a parse
    /// error.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub raw_text: String,
}

impl ExtractionRequest {
    /// Checked before any side effect; a failing request writes nothing.
    fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation("full_name is required".to_string()));
        }
        if self.raw_text.trim().is_empty() {
            return Err(Error::Validation("raw_text is required".to_string()));
        }
        Ok(())
    }
}

/// What one successful extraction produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub employee_id: Uuid,
    pub skills: Vec<Skill>,
}

/// Runs one CV submission end to end: validate, then atomically create the
/// employee, its CV document, and one association row per distinct matched
/// skill. All writes share a single transaction; a failure anywhere (or the
/// future being dropped mid-flight) rolls the whole unit back.
///
/// The skill dictionary is read inside the same transaction, so an
/// extraction sees one consistent snapshot. Concurrent registry edits are
/// deliberately not synchronized against; a submission racing an edit may
/// match against a slightly stale dictionary.
pub async fn extract_and_save(
    storage: &Storage,
    request: &ExtractionRequest,
) -> Result<ExtractionOutcome> {
    request.validate()?;

    let mut tx = storage.pool.begin().await?;

    let employee = Employee::new(
        request.full_name.trim().to_string(),
        request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(ToString::to_string),
    );

    sqlx::query("INSERT INTO employees (id, full_name, email, created_at) VALUES (?, ?, ?, ?)")
        .bind(employee.id.to_string())
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(employee.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

    // Raw text is stored verbatim, untrimmed
    let document = CvDocument::new(employee.id, request.raw_text.clone());

    sqlx::query(
        "INSERT INTO cv_documents (id, employee_id, raw_text, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(document.id.to_string())
    .bind(document.employee_id.to_string())
    .bind(&document.raw_text)
    .bind(document.created_at.to_rfc3339())
    .execute(&mut *tx)
    .await?;

    let dictionary = load_dictionary(&mut tx).await?;
    let skills = EXTRACTOR.extract(&request.raw_text, &dictionary);

    for skill in &skills {
        sqlx::query("INSERT INTO employee_skills (employee_id, skill_id) VALUES (?, ?)")
            .bind(employee.id.to_string())
            .bind(skill.id.to_string())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        employee_id = %employee.id,
        skills = skills.len(),
        "CV extraction committed"
    );

    Ok(ExtractionOutcome {
        employee_id: employee.id,
        skills,
    })
}

async fn load_dictionary(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> Result<Vec<Skill>> {
    let rows: Vec<(String, String, Option<String>)> =
        sqlx::query_as("SELECT id, name, aliases FROM skills ORDER BY name")
            .fetch_all(&mut **tx)
            .await?;

    rows.into_iter()
        .map(|(id, name, aliases)| {
            Ok(Skill {
                id: id.parse().map_err(|_| {
                    Error::Database(sqlx::Error::Decode(format!("invalid uuid: {id}").into()))
                })?,
                name,
                aliases,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_storage(skills: &[(&str, Option<&str>)]) -> Storage {
        let storage = Storage::open_memory().await.unwrap();
        for (name, aliases) in skills {
            storage.create_skill(name, *aliases).await.unwrap();
        }
        storage
    }

    fn request(full_name: &str, email: Option<&str>, raw_text: &str) -> ExtractionRequest {
        ExtractionRequest {
            full_name: full_name.to_string(),
            email: email.map(ToString::to_string),
            raw_text: raw_text.to_string(),
        }
    }

    #[tokio::test]
    async fn end_to_end_creates_employee_document_and_associations() {
        let storage = seeded_storage(&[("C#", None), (".NET", None)]).await;

        let outcome = extract_and_save(
            &storage,
            &request("John Doe", Some("john@example.com"), "C# .NET"),
        )
        .await
        .unwrap();

        assert_eq!(outcome.skills.len(), 2);
        let names: Vec<_> = outcome.skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"C#"));
        assert!(names.contains(&".NET"));

        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert_eq!(details.full_name, "John Doe");
        assert_eq!(details.email.as_deref(), Some("john@example.com"));
        assert_eq!(details.skills.len(), 2);
        assert_eq!(details.cv_documents.len(), 1);
        assert_eq!(details.cv_documents[0].preview, "C# .NET");
    }

    #[tokio::test]
    async fn repeated_mentions_create_one_association() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let outcome = extract_and_save(&storage, &request("Bob Smith", None, "C# C# C#"))
            .await
            .unwrap();

        assert_eq!(outcome.skills.len(), 1);
        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert_eq!(details.skills.len(), 1);
        assert_eq!(details.skills[0].name, "C#");
    }

    #[tokio::test]
    async fn trims_name_and_email_but_stores_raw_text_verbatim() {
        let storage = seeded_storage(&[]).await;

        let outcome = extract_and_save(
            &storage,
            &request("  John Doe  ", Some("  john@example.com  "), "  CV text  "),
        )
        .await
        .unwrap();

        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert_eq!(details.full_name, "John Doe");
        assert_eq!(details.email.as_deref(), Some("john@example.com"));
        assert_eq!(details.cv_documents[0].preview, "  CV text  ");
    }

    #[tokio::test]
    async fn blank_email_is_stored_as_none() {
        let storage = seeded_storage(&[]).await;

        let outcome = extract_and_save(&storage, &request("Alice", Some("   "), "Some CV text"))
            .await
            .unwrap();

        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert_eq!(details.email, None);
    }

    #[tokio::test]
    async fn blank_full_name_fails_validation_without_side_effects() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let result = extract_and_save(&storage, &request("   ", None, "C#")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(storage.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_raw_text_fails_validation_without_side_effects() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let result = extract_and_save(&storage, &request("John Doe", None, "   ")).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(storage.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mid_transaction_failure_rolls_back_all_rows() {
        let storage = seeded_storage(&[("C#", None)]).await;

        // Make the unit's last write fail: every association insert aborts
        sqlx::query(
            r#"
            CREATE TRIGGER reject_associations BEFORE INSERT ON employee_skills
            BEGIN
                SELECT RAISE(ABORT, 'injected failure');
            END
            "#,
        )
        .execute(&storage.pool)
        .await
        .unwrap();

        let result = extract_and_save(&storage, &request("John Doe", None, "C#")).await;
        assert!(matches!(result, Err(Error::Database(_))));

        // The earlier employee and document inserts must not survive
        assert!(storage.list_employees().await.unwrap().is_empty());
        let docs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cv_documents")
            .fetch_one(&storage.pool)
            .await
            .unwrap();
        assert_eq!(docs, 0);
    }

    #[tokio::test]
    async fn no_matches_creates_employee_without_associations() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let outcome = extract_and_save(
            &storage,
            &request("Bob", None, "No relevant experience here"),
        )
        .await
        .unwrap();

        assert!(outcome.skills.is_empty());
        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert!(details.skills.is_empty());
    }

    #[tokio::test]
    async fn empty_dictionary_still_persists_submission() {
        let storage = seeded_storage(&[]).await;

        let outcome = extract_and_save(&storage, &request("Carol", None, "C# .NET React"))
            .await
            .unwrap();

        assert!(outcome.skills.is_empty());
        assert_eq!(storage.list_employees().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn alias_matches_flow_through_to_associations() {
        let storage = seeded_storage(&[
            ("C#", Some("csharp")),
            (".NET", Some("dotnet, dot net")),
            ("React", Some("reactjs")),
        ])
        .await;

        let outcome = extract_and_save(&storage, &request("Dana", None, "csharp and dotnet"))
            .await
            .unwrap();

        let names: Vec<_> = outcome.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"C#"));
        assert!(names.contains(&".NET"));
    }

    #[tokio::test]
    async fn employee_listing_counts_associations() {
        let storage = seeded_storage(&[("C#", None), (".NET", None)]).await;

        extract_and_save(&storage, &request("John Doe", None, "C# .NET"))
            .await
            .unwrap();
        extract_and_save(&storage, &request("Alice", None, "nothing matching"))
            .await
            .unwrap();

        let list = storage.list_employees().await.unwrap();
        assert_eq!(list.len(), 2);
        // Ordered by full name
        assert_eq!(list[0].full_name, "Alice");
        assert_eq!(list[0].skills_count, 0);
        assert_eq!(list[1].full_name, "John Doe");
        assert_eq!(list[1].skills_count, 2);
    }

    #[tokio::test]
    async fn deleting_employee_cascades_documents_and_associations() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let outcome = extract_and_save(&storage, &request("John Doe", None, "C#"))
            .await
            .unwrap();

        storage.delete_employee(outcome.employee_id).await.unwrap();

        let docs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cv_documents")
            .fetch_one(&storage.pool)
            .await
            .unwrap();
        let associations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee_skills")
            .fetch_one(&storage.pool)
            .await
            .unwrap();
        assert_eq!(docs, 0);
        assert_eq!(associations, 0);

        // The dictionary itself is untouched
        assert_eq!(storage.list_skills().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_skill_cascades_associations_but_keeps_employee() {
        let storage = seeded_storage(&[("C#", None)]).await;

        let outcome = extract_and_save(&storage, &request("John Doe", None, "C#"))
            .await
            .unwrap();
        let skill_id = outcome.skills[0].id;

        storage.delete_skill(skill_id).await.unwrap();

        let details = storage.get_employee(outcome.employee_id).await.unwrap();
        assert!(details.skills.is_empty());
        assert_eq!(details.cv_documents.len(), 1);
    }
}
