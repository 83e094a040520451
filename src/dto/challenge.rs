use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::challenge::{ChallengeCatalog, ChallengeConfig};

/// Public description of a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChallengeSummary {
    pub name: String,
    pub title: String,
    /// Location of the rendering to reproduce.
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalog listing returned by `GET /challenges`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChallengesResponse {
    /// Name of the challenge selected when nothing was chosen yet.
    pub default: String,
    /// Challenges in catalog order.
    pub challenges: Vec<ChallengeSummary>,
}

/// Payload selecting a challenge by name.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SelectChallengeRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

impl From<&ChallengeConfig> for ChallengeSummary {
    fn from(value: &ChallengeConfig) -> Self {
        Self {
            name: value.name.clone(),
            title: value.title.clone(),
            target_url: value.target_url.clone(),
            description: value.description.clone(),
        }
    }
}

impl From<&ChallengeCatalog> for ChallengesResponse {
    fn from(value: &ChallengeCatalog) -> Self {
        Self {
            default: value.first().name.clone(),
            challenges: value.iter().map(Into::into).collect(),
        }
    }
}
