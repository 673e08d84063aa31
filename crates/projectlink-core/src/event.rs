//! GitHub webhook event payload parsing

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Subset of the triggering event payload (`GITHUB_EVENT_PATH`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Present for `issues` events
    pub issue: Option<ContentPayload>,
    /// Present for `pull_request` events
    pub pull_request: Option<ContentPayload>,
    /// Repository the event fired in
    pub repository: Option<RepositoryPayload>,
}

/// Issue or pull request object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPayload {
    /// GraphQL node id, used as the project item content id
    pub node_id: Option<String>,
    /// Issue/PR number
    #[serde(default)]
    pub number: u64,
    /// Attached labels
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
    /// Base ref (pull requests)
    pub base: Option<BaseRefPayload>,
}

/// Label object
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    /// Label name
    pub name: String,
}

/// Base ref object of a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRefPayload {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Repository object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryPayload {
    /// Repository owner
    pub owner: Option<OwnerPayload>,
}

/// Repository owner object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerPayload {
    /// Owner login
    pub login: Option<String>,
    /// Owner GraphQL node id
    pub node_id: Option<String>,
}

/// Validated view of the event, borrowed from the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContext<'a> {
    /// Repository owner login
    pub owner_login: &'a str,
    /// Repository owner node id, owner of newly created projects
    pub owner_id: &'a str,
    /// Issue/PR node id
    pub content_id: &'a str,
    /// Issue/PR number
    pub number: u64,
    /// Label names as sent by GitHub
    pub labels: Vec<&'a str>,
    /// Base branch name
    pub base_branch: &'a str,
}

impl EventPayload {
    /// Parse an event payload from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::EventParse(e.to_string()))
    }

    /// Read and parse the event payload file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::EventParse(format!("Failed to read event file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// The issue or pull request the event is about, issue first
    pub fn content(&self) -> Option<&ContentPayload> {
        self.issue.as_ref().or(self.pull_request.as_ref())
    }

    /// Validate the fields the linker needs.
    ///
    /// Fails with `PreconditionFailed` when the owner, the issue/PR, its node
    /// id or its base branch is missing.
    pub fn context(&self) -> Result<LinkContext<'_>> {
        let owner = self
            .repository
            .as_ref()
            .and_then(|r| r.owner.as_ref())
            .ok_or_else(|| {
                Error::PreconditionFailed("Event payload has no repository owner".to_string())
            })?;

        let owner_login = non_empty(owner.login.as_deref()).ok_or_else(|| {
            Error::PreconditionFailed("Repository owner login is missing".to_string())
        })?;
        let owner_id = non_empty(owner.node_id.as_deref()).ok_or_else(|| {
            Error::PreconditionFailed(format!("Repository owner {} has no node id", owner_login))
        })?;

        let content = self.content().ok_or_else(|| {
            Error::PreconditionFailed(
                "Event payload has no issue or pull_request".to_string(),
            )
        })?;

        let content_id = non_empty(content.node_id.as_deref()).ok_or_else(|| {
            Error::PreconditionFailed(format!("Issue/PR {} has no node id", content.number))
        })?;
        let base_branch = content
            .base
            .as_ref()
            .and_then(|b| non_empty(Some(b.ref_name.as_str())))
            .ok_or_else(|| {
                Error::PreconditionFailed(format!("Issue/PR {} has no base branch", content.number))
            })?;

        Ok(LinkContext {
            owner_login,
            owner_id,
            content_id,
            number: content.number,
            labels: content.labels.iter().map(|l| l.name.as_str()).collect(),
            base_branch,
        })
    }
}

#[inline]
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PR_EVENT: &str = r#"{
        "action": "opened",
        "pull_request": {
            "node_id": "PR_kwDOAbc",
            "number": 74,
            "html_url": "https://github.com/stellarwp/gh-action-project-link/pull/74",
            "labels": [{"name": "Bug", "color": "d73a4a"}, {"name": "new"}],
            "base": {"ref": "release/G24.boxer", "sha": "abc123"}
        },
        "repository": {
            "name": "gh-action-project-link",
            "owner": {"login": "stellarwp", "node_id": "O_kgDOBHOeCc"}
        }
    }"#;

    #[test]
    fn test_pull_request_context() {
        let event = EventPayload::from_json(PR_EVENT).unwrap();
        let ctx = event.context().unwrap();
        assert_eq!(ctx.owner_login, "stellarwp");
        assert_eq!(ctx.owner_id, "O_kgDOBHOeCc");
        assert_eq!(ctx.content_id, "PR_kwDOAbc");
        assert_eq!(ctx.number, 74);
        assert_eq!(ctx.labels, vec!["Bug", "new"]);
        assert_eq!(ctx.base_branch, "release/G24.boxer");
    }

    #[test]
    fn test_issue_preferred_over_pull_request() {
        let event = EventPayload {
            issue: Some(ContentPayload {
                number: 1,
                ..Default::default()
            }),
            pull_request: Some(ContentPayload {
                number: 2,
                ..Default::default()
            }),
            repository: None,
        };
        assert_eq!(event.content().map(|c| c.number), Some(1));
    }

    #[test]
    fn test_missing_owner() {
        let event = EventPayload::from_json(r#"{"pull_request": {"node_id": "x", "number": 1}}"#)
            .unwrap();
        assert_matches!(event.context(), Err(Error::PreconditionFailed(_)));
    }

    #[test]
    fn test_missing_owner_node_id() {
        let event = EventPayload::from_json(
            r#"{"repository": {"owner": {"login": "stellarwp"}},
                "pull_request": {"node_id": "x", "number": 1, "base": {"ref": "main"}}}"#,
        )
        .unwrap();
        assert_matches!(event.context(), Err(Error::PreconditionFailed(_)));
    }

    #[test]
    fn test_missing_content() {
        let event =
            EventPayload::from_json(r#"{"repository": {"owner": {"login": "a", "node_id": "b"}}}"#)
                .unwrap();
        let err = event.context().unwrap_err();
        assert!(err.message().contains("no issue or pull_request"));
    }

    #[test]
    fn test_missing_base_branch() {
        let event = EventPayload::from_json(
            r#"{"repository": {"owner": {"login": "a", "node_id": "b"}},
                "issue": {"node_id": "I_1", "number": 9, "labels": []}}"#,
        )
        .unwrap();
        let err = event.context().unwrap_err();
        assert_matches!(err, Error::PreconditionFailed(_));
        assert!(err.message().contains("9"));
    }

    #[test]
    fn test_invalid_json() {
        assert_matches!(EventPayload::from_json("{"), Err(Error::EventParse(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, PR_EVENT).unwrap();
        let event = EventPayload::from_path(&path).unwrap();
        assert_eq!(event.content().map(|c| c.number), Some(74));

        assert_matches!(
            EventPayload::from_path(&dir.path().join("missing.json")),
            Err(Error::EventParse(_))
        );
    }
}
