//! Vote input validation.
//!
//! Turns the loosely-typed fields of a vote submission into a
//! [`ValidatedVote`] or a [`CoreError::InvalidVote`]. The storage layer only
//! ever sees validated votes.

use crate::error::CoreError;
use crate::slug::{normalize_common_name, normalize_slug, species_slug, MAX_SLUG_LEN};

/// Raw identifiers for one side of a vote, as submitted by the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContenderInput<'a> {
    pub slug: Option<&'a str>,
    /// Used to derive the slug when `slug` is absent or blank.
    pub scientific_name: Option<&'a str>,
    pub common_name: Option<&'a str>,
}

/// One side of a validated vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub slug: String,
    pub common_name: Option<String>,
}

/// A vote whose winner and loser are both present and distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedVote {
    pub winner: Contender,
    pub loser: Contender,
}

impl ValidatedVote {
    /// Both contenders in ascending slug order.
    ///
    /// Rows must be touched in this order inside a vote transaction so that
    /// two votes over the same pair never wait on each other's row locks in
    /// opposite directions.
    pub fn lock_order(&self) -> [&Contender; 2] {
        if self.winner.slug <= self.loser.slug {
            [&self.winner, &self.loser]
        } else {
            [&self.loser, &self.winner]
        }
    }
}

/// Validate both sides of a vote.
///
/// Fails with [`CoreError::InvalidVote`] when either slug is missing (and
/// cannot be derived), exceeds [`MAX_SLUG_LEN`], or when both sides name the
/// same species.
pub fn validate_vote(
    winner: ContenderInput<'_>,
    loser: ContenderInput<'_>,
) -> Result<ValidatedVote, CoreError> {
    let (Some(winner_slug), Some(loser_slug)) = (resolve_slug(&winner), resolve_slug(&loser))
    else {
        return Err(CoreError::InvalidVote(
            "winnerSlug and loserSlug required".into(),
        ));
    };

    for slug in [&winner_slug, &loser_slug] {
        if slug.chars().count() > MAX_SLUG_LEN {
            return Err(CoreError::InvalidVote(format!(
                "slug exceeds {MAX_SLUG_LEN} characters"
            )));
        }
    }

    if winner_slug == loser_slug {
        return Err(CoreError::InvalidVote(format!(
            "a species cannot vote against itself: {winner_slug}"
        )));
    }

    Ok(ValidatedVote {
        winner: Contender {
            slug: winner_slug,
            common_name: normalize_common_name(winner.common_name),
        },
        loser: Contender {
            slug: loser_slug,
            common_name: normalize_common_name(loser.common_name),
        },
    })
}

fn resolve_slug(input: &ContenderInput<'_>) -> Option<String> {
    if let Some(slug) = input.slug.and_then(normalize_slug) {
        return Some(slug.to_owned());
    }
    input
        .scientific_name
        .map(species_slug)
        .filter(|slug| !slug.is_empty())
}
