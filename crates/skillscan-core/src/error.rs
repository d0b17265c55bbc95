use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Skill not found: {0}")]
    SkillNotFound(uuid::Uuid),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(uuid::Uuid),

    #[error("Duplicate skill: a skill named {0:?} already exists")]
    DuplicateSkill(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
