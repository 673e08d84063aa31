//! Project URL parsing

use crate::error::{Error, Result};
use crate::types::{OwnerType, ParsedProjectUrl};
use regex::Regex;
use std::sync::OnceLock;

/// Shape reported back to the operator when a URL does not parse
pub const EXPECTED_SHAPE: &str =
    "<GitHub server domain name>/<orgs-or-users>/<ownerName>/projects/<projectNumber>";

fn project_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"/(?P<owner_type>orgs|users)/(?P<owner_name>[^/]+)/projects/(?P<number>[0-9]+)",
        )
        .expect("static project URL regex is valid")
    })
}

/// Parse a project URL into owner type, owner name and project number.
///
/// Only the path is inspected, so GitHub Enterprise hosts work the same
/// as `github.com`.
pub fn parse_project_url(url: &str) -> Result<ParsedProjectUrl> {
    let caps = project_url_regex().captures(url).ok_or_else(|| {
        Error::InvalidProjectUrl(format!(
            "{}. Project URL should match the format {}",
            url, EXPECTED_SHAPE
        ))
    })?;

    let owner_name = caps.name("owner_name").map_or("", |m| m.as_str());
    if owner_name.is_empty() {
        return Err(Error::InvalidInput("Empty Owner Name".to_string()));
    }

    let owner_type = OwnerType::resolve(caps.name("owner_type").map(|m| m.as_str()))?;

    let digits = caps.name("number").map_or("", |m| m.as_str());
    let project_number = digits.parse::<u32>().map_err(|e| {
        Error::InvalidProjectUrl(format!("{}. Project number {}: {}", url, digits, e))
    })?;

    Ok(ParsedProjectUrl {
        owner_type,
        owner_name: owner_name.to_string(),
        project_number,
    })
}
