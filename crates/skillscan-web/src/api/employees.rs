use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use skillscan_core::{EmployeeDetails, EmployeeSummary, Error};
use uuid::Uuid;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees))
        .route("/{id}", get(get_employee).delete(delete_employee))
}

async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeSummary>>, (StatusCode, String)> {
    let employees = state
        .storage
        .list_employees()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeDetails>, (StatusCode, String)> {
    let details = state.storage.get_employee(id).await.map_err(|e| match e {
        Error::EmployeeNotFound(_) => (StatusCode::NOT_FOUND, "Employee not found".to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })?;

    Ok(Json(details))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .storage
        .delete_employee(id)
        .await
        .map_err(|e| match e {
            Error::EmployeeNotFound(_) => (StatusCode::NOT_FOUND, "Employee not found".to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(StatusCode::NO_CONTENT)
}
