mod employees;
mod extraction;
mod skills;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/employees", employees::router())
        .nest("/extraction", extraction::router())
        .nest("/skills", skills::router())
}
