use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use skillscan_core::{extract_and_save, Error, ExtractionRequest};
use uuid::Uuid;

use super::skills::SkillResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract))
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub employee_id: Uuid,
    pub extracted_skills: Vec<SkillResponse>,
}

async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractionRequest>,
) -> Result<Json<ExtractResponse>, (StatusCode, String)> {
    let outcome = extract_and_save(&state.storage, &req)
        .await
        .map_err(|e| match e {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(ExtractResponse {
        employee_id: outcome.employee_id,
        extracted_skills: outcome
            .skills
            .into_iter()
            .map(SkillResponse::from)
            .collect(),
    }))
}
