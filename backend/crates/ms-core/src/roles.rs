//! Role names at rest versus on the wire.
//!
//! Stored roles are bare uppercase names (`ADMIN`, `USER`). Tokens and
//! authorization checks use the `ROLE_`-prefixed authority form.

use std::collections::BTreeSet;

pub const ROLE_PREFIX: &str = "ROLE_";
pub const ADMIN_ROLE: &str = "ADMIN";
pub const USER_ROLE: &str = "USER";
pub const DEFAULT_ROLE: &str = USER_ROLE;

/// Canonicalize a role list for storage.
///
/// Each entry is trimmed and uppercased, every leading `ROLE_` is stripped,
/// blanks are dropped and the survivors are sorted and de-duplicated. An
/// empty result becomes `[USER]`. Applying this to its own output is a no-op.
pub fn normalize_roles<I, S>(roles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let canonical: BTreeSet<String> = roles
        .into_iter()
        .filter_map(|role| {
            let mut name = role.as_ref().trim().to_uppercase();
            while let Some(rest) = name.strip_prefix(ROLE_PREFIX) {
                name = rest.trim_start().to_string();
            }
            (!name.is_empty()).then_some(name)
        })
        .collect();

    if canonical.is_empty() {
        vec![DEFAULT_ROLE.to_string()]
    } else {
        canonical.into_iter().collect()
    }
}

/// `ADMIN` -> `ROLE_ADMIN`; already-prefixed values pass through.
pub fn to_authority(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{ROLE_PREFIX}{role}")
    }
}

pub fn join_roles(roles: &[String]) -> String {
    roles.join(",")
}

pub fn split_roles(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
