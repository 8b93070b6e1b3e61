//! Vote submission DTOs.

use chirpy_core::vote::ContenderInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::species::Species;

/// Body of `POST /api/vote`.
///
/// Every field is optional at the wire level so that missing identifiers
/// surface as an invalid vote rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVote {
    pub winner_slug: Option<String>,
    pub loser_slug: Option<String>,
    pub winner_name: Option<String>,
    pub loser_name: Option<String>,
    pub winner_scientific_name: Option<String>,
    pub loser_scientific_name: Option<String>,
    /// Idempotency key. A resubmission with the same key is not counted twice.
    pub request_id: Option<Uuid>,
}

impl SubmitVote {
    pub fn winner(&self) -> ContenderInput<'_> {
        ContenderInput {
            slug: self.winner_slug.as_deref(),
            scientific_name: self.winner_scientific_name.as_deref(),
            common_name: self.winner_name.as_deref(),
        }
    }

    pub fn loser(&self) -> ContenderInput<'_> {
        ContenderInput {
            slug: self.loser_slug.as_deref(),
            scientific_name: self.loser_scientific_name.as_deref(),
            common_name: self.loser_name.as_deref(),
        }
    }
}

/// Result of recording a vote: the winner's row followed by the loser's.
#[derive(Debug, Clone, Serialize)]
pub struct VoteOutcome {
    pub updated: Vec<Species>,
    /// Set when the request id had already been applied and nothing changed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replayed: bool,
}
