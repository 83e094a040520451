use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{challenge::ChallengeSummary, format_system_time, validation::validate_user_name},
    state::session::{SessionSetup, SessionState},
};

/// Longest session a player can configure: one day.
pub const MAX_SESSION_SECONDS: u32 = 86_400;

/// Payload used to start a new session.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StartSessionRequest {
    /// Display name of the player.
    #[validate(length(min = 1, max = 64), custom(function = "validate_user_name"))]
    pub user_name: String,
    /// Countdown duration in seconds, refilled on every code update.
    #[validate(range(min = 1, max = 86_400))]
    pub total_seconds: u32,
}

impl From<StartSessionRequest> for SessionSetup {
    fn from(value: StartSessionRequest) -> Self {
        Self {
            user_name: value.user_name.trim().to_string(),
            total_seconds: value.total_seconds,
        }
    }
}

/// Latest editor contents.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CodeUpdateRequest {
    pub code: String,
}

/// New score for the player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreUpdateRequest {
    pub score: u32,
}

/// Full view of the session as exposed over HTTP and SSE.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    pub running: bool,
    pub finished: bool,
    pub user_name: String,
    /// Coarse countdown in seconds.
    pub remaining_seconds: u32,
    /// Configured session duration in seconds.
    pub full_time: u32,
    pub level: u8,
    pub code: String,
    pub score: u32,
    pub challenge: ChallengeSummary,
    /// Firings left before the next second elapses.
    pub fine_tick: u32,
    /// Firings left before the countdown expires.
    pub progress_ticker: u32,
    /// RFC 3339 time this view was produced.
    pub at: String,
}

impl From<&SessionState> for SessionView {
    fn from(value: &SessionState) -> Self {
        Self {
            running: value.running(),
            finished: value.finished(),
            user_name: value.user_name().to_string(),
            remaining_seconds: value.remaining_seconds(),
            full_time: value.full_time(),
            level: value.level(),
            code: value.code().to_string(),
            score: value.score(),
            challenge: value.challenge().into(),
            fine_tick: value.fine_tick(),
            progress_ticker: value.progress_ticker(),
            at: format_system_time(SystemTime::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_name: &str, total_seconds: u32) -> StartSessionRequest {
        StartSessionRequest {
            user_name: user_name.into(),
            total_seconds,
        }
    }

    #[test]
    fn start_request_validation() {
        assert!(request("Ada", 60).validate().is_ok());
        assert!(request("Ada", MAX_SESSION_SECONDS).validate().is_ok());
        assert!(request("", 60).validate().is_err());
        assert!(request("   ", 60).validate().is_err());
        assert!(request("Ada", 0).validate().is_err());
        assert!(request("Ada", MAX_SESSION_SECONDS + 1).validate().is_err());
        assert!(request(&"x".repeat(65), 60).validate().is_err());
    }

    #[test]
    fn setup_trims_user_name() {
        let setup: SessionSetup = request("  Ada ", 30).into();
        assert_eq!(setup.user_name, "Ada");
        assert_eq!(setup.total_seconds, 30);
    }
}
