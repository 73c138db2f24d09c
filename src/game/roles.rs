use rand::Rng;
use rand::seq::SliceRandom;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// The fixed role set of the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Werewolf,
    Villager,
    Seer,
    Witch,
    Guard,
    Hunter,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Werewolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Guard,
        Role::Hunter,
    ];

    /// Lowercase keyword used for role-group lookup in the agent table.
    pub fn key(self) -> &'static str {
        match self {
            Role::Werewolf => "werewolf",
            Role::Villager => "villager",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Guard => "guard",
            Role::Hunter => "hunter",
        }
    }
}

/// Configured number of seats per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleCounts {
    pub werewolf: usize,
    pub villager: usize,
    pub seer: usize,
    pub witch: usize,
    pub guard: usize,
    pub hunter: usize,
}

impl RoleCounts {
    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::Werewolf => self.werewolf,
            Role::Villager => self.villager,
            Role::Seer => self.seer,
            Role::Witch => self.witch,
            Role::Guard => self.guard,
            Role::Hunter => self.hunter,
        }
    }

    pub fn total(&self) -> usize {
        Role::ALL.iter().map(|role| self.count(*role)).sum()
    }
}

/// One role per seat for a single game; seat `n` is `roles()[n - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    roles: Vec<Role>,
}

impl RoleAssignment {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role of a 1-based seat.
    pub fn seat(&self, seat: usize) -> Option<Role> {
        seat.checked_sub(1).and_then(|idx| self.roles.get(idx).copied())
    }

    /// 0-based indices of every seat holding `role`.
    pub fn indices_of(&self, role: Role) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == role)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn role_map(&self) -> RoleMap<'_> {
        RoleMap(&self.roles)
    }
}

/// Serializes as `{"Player_1": "Werewolf", ...}` in seat order.
#[derive(Debug, Clone, Copy)]
pub struct RoleMap<'a>(&'a [Role]);

impl Serialize for RoleMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (idx, role) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("Player_{}", idx + 1), role)?;
        }
        map.end()
    }
}

/// Lay out the configured multiset of roles and shuffle it uniformly.
pub fn compute_roles<R: Rng + ?Sized>(counts: &RoleCounts, rng: &mut R) -> RoleAssignment {
    let mut roles = Vec::with_capacity(counts.total());
    for role in Role::ALL {
        roles.extend(std::iter::repeat_n(role, counts.count(role)));
    }
    roles.shuffle(rng);
    RoleAssignment::new(roles)
}
