use super::replace::Replacement;
use super::roles::{Role, RoleAssignment};
use std::collections::BTreeMap;

/// Role group serving every werewolf seat that was not replaced.
pub const WEREWOLF_GROUP: &str = "werewolf";
/// Catch-all group for villager-side seats without a dedicated entry.
pub const VILLAGER_GROUP: &str = "villager";

/// Choose the role-group key serving each seat, in seat order.
///
/// Priority per seat: replaced seat → substitute group; werewolf → werewolf
/// group; role with its own group (e.g. `seer`) → that group; otherwise the
/// villager group.
pub fn assign_backends<V>(
    roles: &RoleAssignment,
    replacement: &Replacement,
    groups: &BTreeMap<String, V>,
) -> Vec<String> {
    roles
        .roles()
        .iter()
        .enumerate()
        .map(|(idx, role)| group_for_seat(idx, *role, replacement, groups).to_string())
        .collect()
}

fn group_for_seat<'a, V>(
    idx: usize,
    role: Role,
    replacement: &'a Replacement,
    groups: &'a BTreeMap<String, V>,
) -> &'a str {
    if let Some(substitute) = replacement.substitute_for(idx) {
        return substitute;
    }
    if role == Role::Werewolf {
        return WEREWOLF_GROUP;
    }
    match groups.get_key_value(role.key()) {
        Some((key, _)) => key,
        None => VILLAGER_GROUP,
    }
}
