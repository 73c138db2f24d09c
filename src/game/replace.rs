//! Seat replacement: hand one or more seats of a game to a substitute backend.
//!
//! A campaign may pit a candidate model against a fixed field by replacing a
//! single werewolf (or a number of villager-side seats) with the candidate.

use super::roles::{Role, RoleAssignment};
use crate::error::AssignError;
use rand::Rng;
use rand::seq::{IndexedRandom, index};
use serde::{Deserialize, Serialize};

/// How the werewolf target picks its seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// The werewolf with the highest seat index.
    #[default]
    Last,
    /// Any werewolf seat, uniformly.
    Random,
}

/// Which seats count as villager-side candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Eligibility {
    /// Every seat that is not a werewolf, special roles included.
    NonWerewolf,
    /// Only seats holding the plain `Villager` role.
    PlainVillager,
}

impl Eligibility {
    fn admits(self, role: Role) -> bool {
        match self {
            Eligibility::NonWerewolf => role != Role::Werewolf,
            Eligibility::PlainVillager => role == Role::Villager,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementPolicy {
    /// Role keyword: `werewolf` or `villager`.
    pub target: String,
    #[serde(default)]
    pub strategy: SelectionStrategy,
    /// Role-group key serving the replaced seats.
    pub substitute: String,
    #[serde(default = "default_replace_count")]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
}

fn default_replace_count() -> usize {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceTarget {
    Werewolf,
    Villager,
}

impl ReplacementPolicy {
    /// `None` for a keyword this runner does not know.
    pub fn target_kind(&self) -> Option<ReplaceTarget> {
        match self.target.trim().to_ascii_lowercase().as_str() {
            "werewolf" => Some(ReplaceTarget::Werewolf),
            "villager" => Some(ReplaceTarget::Villager),
            _ => None,
        }
    }
}

/// Seats (0-based) handed to a substitute backend for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacement {
    indices: Vec<usize>,
    substitute: Option<String>,
}

impl Replacement {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(mut indices: Vec<usize>, substitute: impl Into<String>) -> Self {
        indices.sort_unstable();
        Self {
            indices,
            substitute: Some(substitute.into()),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Substitute group for `index`, if that seat was replaced.
    pub fn substitute_for(&self, index: usize) -> Option<&str> {
        if self.indices.binary_search(&index).is_ok() {
            self.substitute.as_deref()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Deterministic-last: scan from the highest seat downward for a werewolf.
pub fn last_werewolf(roles: &RoleAssignment) -> Result<usize, AssignError> {
    roles
        .roles()
        .iter()
        .rposition(|role| *role == Role::Werewolf)
        .ok_or_else(|| AssignError::NoMatch {
            role: Role::Werewolf.to_string(),
        })
}

/// Uniform-random over all werewolf seats.
pub fn random_werewolf<R: Rng + ?Sized>(
    roles: &RoleAssignment,
    rng: &mut R,
) -> Result<usize, AssignError> {
    roles
        .indices_of(Role::Werewolf)
        .choose(rng)
        .copied()
        .ok_or_else(|| AssignError::NoMatch {
            role: Role::Werewolf.to_string(),
        })
}

/// Sample `count` eligible seats without replacement.
pub fn sample_villagers<R: Rng + ?Sized>(
    roles: &RoleAssignment,
    eligibility: Eligibility,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, AssignError> {
    let pool: Vec<usize> = roles
        .roles()
        .iter()
        .enumerate()
        .filter(|(_, role)| eligibility.admits(**role))
        .map(|(idx, _)| idx)
        .collect();

    if pool.len() < count {
        return Err(AssignError::InsufficientCandidates {
            requested: count,
            available: pool.len(),
        });
    }

    Ok(index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|i| pool[i])
        .collect())
}

/// Pick the replaced seats for one game.
///
/// An unrecognized target keyword is not an error: the game falls back to the
/// standard assignment and a warning is logged.
pub fn apply_replacement<R: Rng + ?Sized>(
    roles: &RoleAssignment,
    policy: &ReplacementPolicy,
    rng: &mut R,
) -> Result<Replacement, AssignError> {
    let Some(target) = policy.target_kind() else {
        tracing::warn!(
            target = %policy.target,
            "unrecognized replacement target; using standard assignment"
        );
        return Ok(Replacement::none());
    };

    let indices = match target {
        ReplaceTarget::Werewolf => match policy.strategy {
            SelectionStrategy::Last => vec![last_werewolf(roles)?],
            SelectionStrategy::Random => vec![random_werewolf(roles, rng)?],
        },
        ReplaceTarget::Villager => {
            let eligibility = policy
                .eligibility
                .ok_or(AssignError::EligibilityUnset)?;
            sample_villagers(roles, eligibility, policy.count, rng)?
        }
    };

    Ok(Replacement::new(indices, policy.substitute.clone()))
}
