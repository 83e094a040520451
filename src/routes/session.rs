use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        challenge::SelectChallengeRequest,
        session::{CodeUpdateRequest, ScoreUpdateRequest, SessionView, StartSessionRequest},
    },
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Session lifecycle endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/start", post(start_session))
        .route("/session/resume", post(resume_session))
        .route("/session/code", post(update_code))
        .route("/session/score", post(update_score))
        .route("/session/challenge", post(select_challenge))
        .route("/session/dispose", post(dispose_session))
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    responses((status = 200, description = "Current session", body = SessionView))
)]
/// Return the current session state.
pub async fn get_session(State(state): State<SharedState>) -> Json<SessionView> {
    Json(session_service::current_session(&state))
}

#[utoipa::path(
    post,
    path = "/session/start",
    tag = "session",
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session started", body = SessionView),
        (status = 400, description = "Invalid user name or duration")
    )
)]
/// Start a new session. The countdown begins with the first code update.
pub async fn start_session(
    State(state): State<SharedState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(session_service::start_session(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/session/resume",
    tag = "session",
    responses((status = 200, description = "Session rebuilt from the store", body = SessionView))
)]
/// Rebuild the session from the store, restarting the countdown if it was active.
pub async fn resume_session(State(state): State<SharedState>) -> Json<SessionView> {
    Json(session_service::resume_session(&state).await)
}

#[utoipa::path(
    post,
    path = "/session/code",
    tag = "session",
    request_body = CodeUpdateRequest,
    responses((status = 200, description = "Code stored and countdown refilled", body = SessionView))
)]
/// Submit the latest editor contents.
pub async fn update_code(
    State(state): State<SharedState>,
    Json(payload): Json<CodeUpdateRequest>,
) -> Json<SessionView> {
    Json(session_service::update_code(&state, payload).await)
}

#[utoipa::path(
    post,
    path = "/session/score",
    tag = "session",
    request_body = ScoreUpdateRequest,
    responses((status = 200, description = "Score and level updated", body = SessionView))
)]
/// Submit a new score.
pub async fn update_score(
    State(state): State<SharedState>,
    Json(payload): Json<ScoreUpdateRequest>,
) -> Json<SessionView> {
    Json(session_service::update_score(&state, payload).await)
}

#[utoipa::path(
    post,
    path = "/session/challenge",
    tag = "session",
    request_body = SelectChallengeRequest,
    responses(
        (status = 200, description = "Challenge selected", body = SessionView),
        (status = 404, description = "Unknown challenge")
    )
)]
/// Select a challenge from the catalog.
pub async fn select_challenge(
    State(state): State<SharedState>,
    Json(payload): Json<SelectChallengeRequest>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(session_service::select_challenge(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/session/dispose",
    tag = "session",
    responses((status = 200, description = "Session disposed", body = SessionView))
)]
/// End the session and clear its persisted fields.
pub async fn dispose_session(State(state): State<SharedState>) -> Json<SessionView> {
    Json(session_service::dispose_session(&state).await)
}
