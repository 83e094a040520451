use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Code in the Dark Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::challenges::list_challenges,
        crate::routes::session::get_session,
        crate::routes::session::start_session,
        crate::routes::session::resume_session,
        crate::routes::session::update_code,
        crate::routes::session::update_score,
        crate::routes::session::select_challenge,
        crate::routes::session::dispose_session,
        crate::routes::sse::session_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::challenge::ChallengeSummary,
            crate::dto::challenge::ChallengesResponse,
            crate::dto::challenge::SelectChallengeRequest,
            crate::dto::session::StartSessionRequest,
            crate::dto::session::CodeUpdateRequest,
            crate::dto::session::ScoreUpdateRequest,
            crate::dto::session::SessionView,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "challenges", description = "Challenge catalog"),
        (name = "session", description = "Session lifecycle and countdown"),
        (name = "sse", description = "Server-sent events streams"),
    )
)]
pub struct ApiDoc;
