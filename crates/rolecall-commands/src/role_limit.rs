//! Per-guild cap on managed roles.

use rolecall_common::{GuildId, MemberSnapshot};
use rolecall_managers::{GuildSettings, RoleDirectory};

/// Returns true when `member` may receive one more managed role in `guild`.
///
/// A limit of 0 means unlimited and an unreadable limit admits nobody. Only
/// roles the directory classifies as managed count, and the role about to be
/// granted is not included.
pub fn may_request_role(
    settings: &dyn GuildSettings,
    roles: &dyn RoleDirectory,
    guild: GuildId,
    member: &MemberSnapshot,
) -> bool {
    let Some(limit) = settings.role_limit(guild) else {
        return false;
    };
    if limit == 0 {
        return true;
    }

    let held = member
        .roles
        .iter()
        .filter(|role| roles.is_managed(**role))
        .count();
    held < limit as usize
}
