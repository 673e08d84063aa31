//! GraphQL documents and response decoding for GitHub Projects (v2)
//!
//! Every user-controlled value travels as a bound variable. The only
//! interpolated token is the owner root field, taken from `OwnerType`.

use crate::error::{Error, Result};
use crate::types::{LinkResult, Lookup, OwnerType, ProjectRef};
use serde::Deserialize;

/// `projectsV2` page size for title search
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Search an owner's projects by title
pub fn search_projects_query(owner_type: OwnerType) -> String {
    format!(
        r#"query findProjects($owner: String!, $search: String!, $first: Int!) {{
  {field}(login: $owner) {{
    projectsV2(first: $first, query: $search) {{
      totalCount
      edges {{
        node {{
          id
          title
          number
        }}
      }}
    }}
  }}
}}"#,
        field = owner_type.query_field()
    )
}

/// Look up a project node id by number
pub fn project_id_query(owner_type: OwnerType) -> String {
    format!(
        r#"query getProject($owner: String!, $number: Int!) {{
  {field}(login: $owner) {{
    projectV2(number: $number) {{
      id
    }}
  }}
}}"#,
        field = owner_type.query_field()
    )
}

/// Copy a template project
pub const COPY_PROJECT_MUTATION: &str = r#"mutation copyProjectTemplate($input: CopyProjectV2Input!) {
  copyProjectV2(input: $input) {
    projectV2 {
      id
    }
  }
}"#;

/// Create a blank project
pub const CREATE_PROJECT_MUTATION: &str = r#"mutation createProject($input: CreateProjectV2Input!) {
  createProjectV2(input: $input) {
    projectV2 {
      id
    }
  }
}"#;

/// Add an issue/PR to a project
pub const ADD_ITEM_MUTATION: &str = r#"mutation addIssueToProject($input: AddProjectV2ItemByIdInput!) {
  addProjectV2ItemById(input: $input) {
    item {
      id
      project {
        url
      }
    }
  }
}"#;

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Response data, absent or partial when `errors` is set
    pub data: Option<T>,
    /// Field errors
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Single GraphQL error entry
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human readable message
    pub message: String,
    /// GitHub error type (`NOT_FOUND`, `FORBIDDEN`, ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl<T> GraphQlResponse<T> {
    fn error_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn only_not_found(&self) -> bool {
        !self.errors.is_empty()
            && self
                .errors
                .iter()
                .all(|e| e.kind.as_deref() == Some("NOT_FOUND"))
    }
}

/// Data keyed by the owner root field
#[derive(Debug, Deserialize)]
pub struct OwnerData<T> {
    organization: Option<T>,
    user: Option<T>,
}

impl<T> OwnerData<T> {
    fn take(self, owner_type: OwnerType) -> Option<T> {
        match owner_type {
            OwnerType::Organization => self.organization,
            OwnerType::User => self.user,
        }
    }
}

/// `projectsV2` field of an owner
#[derive(Debug, Deserialize)]
pub struct ProjectsOwner {
    #[serde(rename = "projectsV2")]
    projects: Option<ProjectConnection>,
}

#[derive(Debug, Deserialize)]
struct ProjectConnection {
    #[serde(rename = "totalCount", default)]
    total_count: u32,
    #[serde(default)]
    edges: Vec<ProjectEdge>,
}

#[derive(Debug, Deserialize)]
struct ProjectEdge {
    node: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
    number: u32,
}

/// `projectV2` field of an owner
#[derive(Debug, Deserialize)]
pub struct ProjectOwner {
    #[serde(rename = "projectV2")]
    project: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
struct NodeId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    #[serde(rename = "projectV2")]
    project: Option<NodeId>,
}

/// `copyProjectV2` mutation data
#[derive(Debug, Deserialize)]
pub struct CopyProjectData {
    #[serde(rename = "copyProjectV2")]
    payload: Option<ProjectPayload>,
}

/// `createProjectV2` mutation data
#[derive(Debug, Deserialize)]
pub struct CreateProjectData {
    #[serde(rename = "createProjectV2")]
    payload: Option<ProjectPayload>,
}

/// `addProjectV2ItemById` mutation data
#[derive(Debug, Deserialize)]
pub struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    payload: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: Option<ProjectItem>,
}

#[derive(Debug, Deserialize)]
struct ProjectItem {
    id: String,
    project: ItemProject,
}

#[derive(Debug, Deserialize)]
struct ItemProject {
    url: String,
}

/// Decode a title search into the first matching project
pub fn decode_search(
    owner_type: OwnerType,
    response: GraphQlResponse<OwnerData<ProjectsOwner>>,
) -> Result<Lookup<ProjectRef>> {
    if !response.errors.is_empty() {
        return Err(Error::Upstream(response.error_message()));
    }

    let connection = response
        .data
        .and_then(|d| d.take(owner_type))
        .and_then(|o| o.projects);

    let connection = match connection {
        Some(c) if c.total_count > 0 => c,
        _ => return Ok(Lookup::NotFound),
    };

    Ok(connection
        .edges
        .into_iter()
        .find_map(|e| e.node)
        .map_or(Lookup::NotFound, |node| {
            Lookup::Found(ProjectRef {
                id: node.id,
                title: node.title,
                number: node.number,
            })
        }))
}

/// Decode a project id lookup; `NOT_FOUND` errors become `Lookup::NotFound`
pub fn decode_project_id(
    owner_type: OwnerType,
    response: GraphQlResponse<OwnerData<ProjectOwner>>,
) -> Result<Lookup<String>> {
    if response.only_not_found() {
        return Ok(Lookup::NotFound);
    }
    if !response.errors.is_empty() {
        return Err(Error::Upstream(response.error_message()));
    }

    Ok(response
        .data
        .and_then(|d| d.take(owner_type))
        .and_then(|o| o.project)
        .map_or(Lookup::NotFound, |p| Lookup::Found(p.id)))
}

/// Decode the new project id from `copyProjectV2`
pub fn decode_copy_project(response: GraphQlResponse<CopyProjectData>) -> Result<String> {
    if !response.errors.is_empty() {
        return Err(Error::Upstream(response.error_message()));
    }
    response
        .data
        .and_then(|d| d.payload)
        .and_then(|p| p.project)
        .map(|p| p.id)
        .ok_or_else(|| Error::Upstream("copyProjectV2 returned no project".to_string()))
}

/// Decode the new project id from `createProjectV2`
pub fn decode_create_project(response: GraphQlResponse<CreateProjectData>) -> Result<String> {
    if !response.errors.is_empty() {
        return Err(Error::Upstream(response.error_message()));
    }
    response
        .data
        .and_then(|d| d.payload)
        .and_then(|p| p.project)
        .map(|p| p.id)
        .ok_or_else(|| Error::Upstream("createProjectV2 returned no project".to_string()))
}

/// Decode the project item from `addProjectV2ItemById`
pub fn decode_add_item(response: GraphQlResponse<AddItemData>) -> Result<LinkResult> {
    if !response.errors.is_empty() {
        return Err(Error::Upstream(response.error_message()));
    }
    response
        .data
        .and_then(|d| d.payload)
        .and_then(|p| p.item)
        .map(|item| LinkResult {
            project_url: item.project.url,
            item_id: item.id,
        })
        .ok_or_else(|| Error::Upstream("addProjectV2ItemById returned no item".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> GraphQlResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_queries_select_owner_field() {
        assert!(search_projects_query(OwnerType::Organization)
            .contains("organization(login: $owner)"));
        assert!(search_projects_query(OwnerType::User).contains("user(login: $owner)"));
        assert!(project_id_query(OwnerType::User).contains("user(login: $owner)"));
    }

    #[test]
    fn test_queries_use_variables() {
        let q = search_projects_query(OwnerType::Organization);
        assert!(q.contains("query: $search"));
        assert!(project_id_query(OwnerType::Organization).contains("projectV2(number: $number)"));
    }

    #[test]
    fn test_decode_search_found() {
        let resp = parse(
            r#"{"data": {"organization": {"projectsV2": {"totalCount": 2, "edges": [
                {"node": {"id": "PVT_kwDOBHOeCc4Ac4dt", "title": "G24 boxer", "number": 12}},
                {"node": {"id": "PVT_other", "title": "G24 boxer old", "number": 3}}
            ]}}}}"#,
        );
        let found = decode_search(OwnerType::Organization, resp).unwrap();
        assert_eq!(
            found,
            Lookup::Found(ProjectRef {
                id: "PVT_kwDOBHOeCc4Ac4dt".into(),
                title: "G24 boxer".into(),
                number: 12,
            })
        );
    }

    #[test]
    fn test_decode_search_empty() {
        let resp = parse(r#"{"data": {"user": {"projectsV2": {"totalCount": 0, "edges": []}}}}"#);
        assert_eq!(decode_search(OwnerType::User, resp).unwrap(), Lookup::NotFound);
    }

    #[test]
    fn test_decode_search_wrong_owner_field() {
        let resp = parse(
            r#"{"data": {"user": {"projectsV2": {"totalCount": 1, "edges": [
                {"node": {"id": "a", "title": "b", "number": 1}}]}}}}"#,
        );
        assert_eq!(
            decode_search(OwnerType::Organization, resp).unwrap(),
            Lookup::NotFound
        );
    }

    #[test]
    fn test_decode_search_errors_are_upstream() {
        let resp = parse(
            r#"{"data": {"organization": null}, "errors": [
                {"type": "NOT_FOUND", "message": "Could not resolve to an Organization with the login of 'nope'."}]}"#,
        );
        let err = decode_search(OwnerType::Organization, resp).unwrap_err();
        assert_matches!(err, Error::Upstream(_));
        assert!(err.message().contains("login of 'nope'"));
    }

    #[test]
    fn test_decode_project_id_found() {
        let resp = parse(r#"{"data": {"organization": {"projectV2": {"id": "PVT_template"}}}}"#);
        assert_eq!(
            decode_project_id(OwnerType::Organization, resp).unwrap(),
            Lookup::Found("PVT_template".to_string())
        );
    }

    #[test]
    fn test_decode_project_id_not_found_error() {
        let resp = parse(
            r#"{"data": {"organization": {"projectV2": null}}, "errors": [
                {"type": "NOT_FOUND", "path": ["organization", "projectV2"],
                 "message": "Could not resolve to a ProjectV2 with the number 99."}]}"#,
        );
        assert_eq!(
            decode_project_id(OwnerType::Organization, resp).unwrap(),
            Lookup::NotFound
        );
    }

    #[test]
    fn test_decode_project_id_other_error() {
        let resp = parse(
            r#"{"data": null, "errors": [{"type": "FORBIDDEN", "message": "Resource not accessible by integration"}]}"#,
        );
        assert_matches!(
            decode_project_id(OwnerType::Organization, resp),
            Err(Error::Upstream(_))
        );
    }

    #[test]
    fn test_decode_copy_and_create() {
        let copy = parse(r#"{"data": {"copyProjectV2": {"projectV2": {"id": "PVT_new"}}}}"#);
        assert_eq!(decode_copy_project(copy).unwrap(), "PVT_new");

        let create = parse(r#"{"data": {"createProjectV2": {"projectV2": {"id": "PVT_blank"}}}}"#);
        assert_eq!(decode_create_project(create).unwrap(), "PVT_blank");

        let empty = parse(r#"{"data": {"copyProjectV2": null}}"#);
        assert_matches!(decode_copy_project(empty), Err(Error::Upstream(_)));
    }

    #[test]
    fn test_decode_add_item() {
        let resp = parse(
            r#"{"data": {"addProjectV2ItemById": {"item": {"id": "PVTI_item",
                "project": {"url": "https://github.com/orgs/stellarwp/projects/12"}}}}}"#,
        );
        assert_eq!(
            decode_add_item(resp).unwrap(),
            LinkResult {
                project_url: "https://github.com/orgs/stellarwp/projects/12".into(),
                item_id: "PVTI_item".into(),
            }
        );
    }

    #[test]
    fn test_decode_add_item_error() {
        let resp = parse(
            r#"{"data": {"addProjectV2ItemById": null}, "errors": [
                {"message": "Content already exists in this project"}]}"#,
        );
        let err = decode_add_item(resp).unwrap_err();
        assert_eq!(err.message(), "Content already exists in this project");
    }
}
