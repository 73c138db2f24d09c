use super::ArenaConfig;
use crate::error::ConfigError;
use std::borrow::Cow;

/// Shift every configured backend port by `rank`.
///
/// Workers started from one shared config file each drive their own locally
/// bound inference servers; worker `r` talks to `port + r`. Rank 0 borrows
/// the base config untouched.
pub fn derive_for_rank(base: &ArenaConfig, rank: u16) -> Result<Cow<'_, ArenaConfig>, ConfigError> {
    if rank == 0 {
        return Ok(Cow::Borrowed(base));
    }

    tracing::info!(rank, "applying rank offset to backend ports");
    let mut derived = base.clone();
    for (name, group) in &mut derived.agents {
        let Some(old_port) = group.params.port else {
            continue;
        };
        let new_port = old_port
            .checked_add(rank)
            .ok_or_else(|| ConfigError::PortOverflow {
                group: name.clone(),
                port: old_port,
                rank,
            })?;
        group.params.port = Some(new_port);
        tracing::info!(group = %name, old_port, new_port, "backend port updated");
    }
    Ok(Cow::Owned(derived))
}
