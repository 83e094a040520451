use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        challenge::{ChallengesResponse, SelectChallengeRequest},
        session::{CodeUpdateRequest, ScoreUpdateRequest, SessionView, StartSessionRequest},
    },
    error::ServiceError,
    state::SharedState,
};

/// Current session as seen by observers.
pub fn current_session(state: &SharedState) -> SessionView {
    SessionView::from(&state.engine().snapshot())
}

/// Start a session for the requested player and duration.
pub async fn start_session(
    state: &SharedState,
    request: StartSessionRequest,
) -> Result<SessionView, ServiceError> {
    request.validate()?;
    state.engine().start(request.into()).await;
    Ok(current_session(state))
}

/// Rebuild the session from the store.
pub async fn resume_session(state: &SharedState) -> SessionView {
    state.engine().resume().await;
    current_session(state)
}

/// Record new editor contents, refilling the countdown.
pub async fn update_code(state: &SharedState, request: CodeUpdateRequest) -> SessionView {
    state.engine().update(request.code).await;
    current_session(state)
}

/// Record a new score.
pub async fn update_score(state: &SharedState, request: ScoreUpdateRequest) -> SessionView {
    state.engine().update_score(request.score).await;
    current_session(state)
}

/// Select a catalog challenge by name.
pub async fn select_challenge(
    state: &SharedState,
    request: SelectChallengeRequest,
) -> Result<SessionView, ServiceError> {
    request.validate()?;
    let Some(challenge) = state.engine().catalog().find(&request.name).cloned() else {
        return Err(ServiceError::NotFound(format!(
            "challenge `{}` not found",
            request.name
        )));
    };

    state.engine().set_challenge(challenge).await;
    Ok(current_session(state))
}

/// End the session and clear its persisted fields.
pub async fn dispose_session(state: &SharedState) -> SessionView {
    state.engine().dispose().await;
    info!("session disposed on request");
    current_session(state)
}

/// List the challenge catalog.
pub fn list_challenges(state: &SharedState) -> ChallengesResponse {
    state.engine().catalog().into()
}
