use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skillscan_core::{Error, Skill};
use uuid::Uuid;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_skills).post(create_skill))
        .route("/{id}", put(update_skill).delete(delete_skill))
}

#[derive(Debug, Serialize)]
pub struct SkillResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            name: s.name,
            aliases: s.aliases,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    #[serde(default)]
    pub aliases: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: String,
    #[serde(default)]
    pub aliases: Option<String>,
}

async fn list_skills(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillResponse>>, (StatusCode, String)> {
    let skills = state
        .storage
        .list_skills()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(skills.into_iter().map(SkillResponse::from).collect()))
}

async fn create_skill(
    State(state): State<AppState>,
    Json(req): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<SkillResponse>), (StatusCode, String)> {
    let skill = state
        .storage
        .create_skill(&req.name, req.aliases.as_deref())
        .await
        .map_err(|e| match e {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::DuplicateSkill(_) => (
                StatusCode::CONFLICT,
                "A skill with the same name already exists.".to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(SkillResponse::from(skill))))
}

async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSkillRequest>,
) -> Result<Json<SkillResponse>, (StatusCode, String)> {
    let skill = state
        .storage
        .update_skill(id, &req.name, req.aliases.as_deref())
        .await
        .map_err(|e| match e {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::SkillNotFound(_) => (StatusCode::NOT_FOUND, "Skill not found".to_string()),
            Error::DuplicateSkill(_) => (
                StatusCode::CONFLICT,
                "A skill with the same name already exists.".to_string(),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(SkillResponse::from(skill)))
}

async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.storage.delete_skill(id).await.map_err(|e| match e {
        Error::SkillNotFound(_) => (StatusCode::NOT_FOUND, "Skill not found".to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })?;

    Ok(StatusCode::NO_CONTENT)
}
