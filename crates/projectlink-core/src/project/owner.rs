//! Owner type token normalization

use crate::error::{Error, Result};
use crate::types::OwnerType;
use std::str::FromStr;

/// Tokens accepted for organization-owned projects
pub const ORGANIZATION_ALIASES: &[&str] = &["orgs", "organization", "org", "organizations"];

/// Tokens accepted for user-owned projects
pub const USER_ALIASES: &[&str] = &["users", "user"];

impl OwnerType {
    /// Resolve an owner type token, case-insensitive.
    ///
    /// An absent or empty token is rejected; there is no implicit default.
    pub fn resolve(token: Option<&str>) -> Result<Self> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(Error::InvalidInput("Empty owner type".to_string())),
        };

        let lowered = token.to_lowercase();
        if ORGANIZATION_ALIASES.contains(&lowered.as_str()) {
            Ok(OwnerType::Organization)
        } else if USER_ALIASES.contains(&lowered.as_str()) {
            Ok(OwnerType::User)
        } else {
            Err(Error::InvalidInput(format!(
                "Unsupported owner type: {}. Must be one of {} or {}",
                token,
                quoted(ORGANIZATION_ALIASES),
                quoted(USER_ALIASES)
            )))
        }
    }
}

impl FromStr for OwnerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(Some(s))
    }
}

fn quoted(aliases: &[&str]) -> String {
    aliases
        .iter()
        .map(|a| format!("'{}'", a))
        .collect::<Vec<_>>()
        .join(", ")
}
