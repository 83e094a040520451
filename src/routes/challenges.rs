use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::challenge::ChallengesResponse, services::session_service, state::SharedState};

/// Read-only access to the challenge catalog.
pub fn router() -> Router<SharedState> {
    Router::new().route("/challenges", get(list_challenges))
}

#[utoipa::path(
    get,
    path = "/challenges",
    tag = "challenges",
    responses((status = 200, description = "Challenge catalog", body = ChallengesResponse))
)]
/// List the available challenges in catalog order.
pub async fn list_challenges(State(state): State<SharedState>) -> Json<ChallengesResponse> {
    Json(session_service::list_challenges(&state))
}
