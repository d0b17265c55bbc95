use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::employee::{CvDocument, CvDocumentSummary, EmployeeDetails, EmployeeSummary};
use crate::skill::Skill;
use crate::{Error, Result};

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS skills (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    aliases TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_skills_name ON skills(name COLLATE NOCASE);

CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_employees_name ON employees(full_name);

CREATE TABLE IF NOT EXISTS cv_documents (
    id TEXT PRIMARY KEY,
    employee_id TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    raw_text TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cv_documents_employee ON cv_documents(employee_id);

CREATE TABLE IF NOT EXISTS employee_skills (
    employee_id TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    skill_id TEXT NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
    PRIMARY KEY (employee_id, skill_id)
);

CREATE INDEX IF NOT EXISTS idx_employee_skills_skill ON employee_skills(skill_id);
"#;

pub struct Storage {
    pub(crate) pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn open(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn open_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(INIT_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    // Skill registry operations

    /// All skills, ordered by name (sqlite BINARY collation, so the order
    /// is stable and locale-independent).
    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let rows: Vec<(String, String, Option<String>)> =
            sqlx::query_as("SELECT id, name, aliases FROM skills ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(parse_skill_row).collect()
    }

    pub async fn get_skill(&self, id: Uuid) -> Result<Skill> {
        let row: (String, String, Option<String>) =
            sqlx::query_as("SELECT id, name, aliases FROM skills WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?
                .ok_or(Error::SkillNotFound(id))?;

        parse_skill_row(row)
    }

    /// Creates a skill. The name is required after trimming and must be
    /// unique case-insensitively; blank aliases are stored as NULL.
    pub async fn create_skill(&self, name: &str, aliases: Option<&str>) -> Result<Skill> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("name is required".to_string()));
        }

        if self.skill_name_exists(name).await? {
            return Err(Error::DuplicateSkill(name.to_string()));
        }

        let aliases = aliases
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string);
        let skill = Skill::new(name.to_string(), aliases);

        sqlx::query("INSERT INTO skills (id, name, aliases) VALUES (?, ?, ?)")
            .bind(skill.id.to_string())
            .bind(&skill.name)
            .bind(&skill.aliases)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return Error::DuplicateSkill(skill.name.clone());
                    }
                }
                Error::Database(e)
            })?;

        Ok(skill)
    }

    /// Overwrites a skill's name and aliases. The duplicate check excludes
    /// the skill being updated, so renaming only the casing is allowed.
    pub async fn update_skill(&self, id: Uuid, name: &str, aliases: Option<&str>) -> Result<Skill> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("name is required".to_string()));
        }

        let mut skill = self.get_skill(id).await?;

        skill.name = name.to_string();
        skill.aliases = aliases
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string);

        sqlx::query("UPDATE skills SET name = ?, aliases = ? WHERE id = ?")
            .bind(&skill.name)
            .bind(&skill.aliases)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation() {
                        return Error::DuplicateSkill(skill.name.clone());
                    }
                }
                Error::Database(e)
            })?;

        Ok(skill)
    }

    /// Deletes a skill; association rows cascade.
    pub async fn delete_skill(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::SkillNotFound(id));
        }

        Ok(())
    }

    pub async fn has_skills(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn skill_name_exists(&self, name: &str) -> Result<bool> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM skills WHERE name = ? COLLATE NOCASE")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(existing.is_some())
    }

    // Employee operations

    /// All employees ordered by full name, each with its association count.
    pub async fn list_employees(&self) -> Result<Vec<EmployeeSummary>> {
        let rows: Vec<(String, String, Option<String>, String, i64)> = sqlx::query_as(
            r#"
            SELECT e.id, e.full_name, e.email, e.created_at,
                   (SELECT COUNT(*) FROM employee_skills es WHERE es.employee_id = e.id)
            FROM employees e
            ORDER BY e.full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, full_name, email, created_at, skills_count)| {
                Ok(EmployeeSummary {
                    id: parse_uuid(&id)?,
                    full_name,
                    email,
                    created_at: parse_timestamp(&created_at)?,
                    skills_count,
                })
            })
            .collect()
    }

    /// Full detail view: employee fields, associated skills, and document
    /// previews.
    pub async fn get_employee(&self, id: Uuid) -> Result<EmployeeDetails> {
        let row: (String, String, Option<String>, String) = sqlx::query_as(
            "SELECT id, full_name, email, created_at FROM employees WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::EmployeeNotFound(id))?;

        let skill_rows: Vec<(String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT s.id, s.name, s.aliases
            FROM skills s
            JOIN employee_skills es ON es.skill_id = s.id
            WHERE es.employee_id = ?
            ORDER BY s.name
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let doc_rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, raw_text, created_at
            FROM cv_documents
            WHERE employee_id = ?
            ORDER BY created_at
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let (emp_id, full_name, email, created_at) = row;

        Ok(EmployeeDetails {
            id: parse_uuid(&emp_id)?,
            full_name,
            email,
            created_at: parse_timestamp(&created_at)?,
            skills: skill_rows
                .into_iter()
                .map(parse_skill_row)
                .collect::<Result<Vec<_>>>()?,
            cv_documents: doc_rows
                .into_iter()
                .map(|(doc_id, raw_text, doc_created)| {
                    Ok(CvDocumentSummary {
                        id: parse_uuid(&doc_id)?,
                        created_at: parse_timestamp(&doc_created)?,
                        preview: CvDocument::preview_of(&raw_text),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Deletes an employee; documents and association rows cascade.
    pub async fn delete_employee(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::EmployeeNotFound(id));
        }

        Ok(())
    }
}

fn parse_skill_row(row: (String, String, Option<String>)) -> Result<Skill> {
    let (id, name, aliases) = row;

    Ok(Skill {
        id: parse_uuid(&id)?,
        name,
        aliases,
    })
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    value
        .parse()
        .map_err(|_| Error::Database(sqlx::Error::Decode(format!("invalid uuid: {value}").into())))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::Database(sqlx::Error::Decode(
                format!("invalid timestamp: {value}").into(),
            ))
        })
}
