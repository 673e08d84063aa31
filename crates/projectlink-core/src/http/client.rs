//! GitHub GraphQL API client for Projects (v2)

use crate::error::{Error, Result};
use crate::http::queries::{self, GraphQlResponse};
use crate::traits::ProjectApi;
use crate::types::{LinkResult, Lookup, OwnerType, ProjectRef};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Public GitHub GraphQL endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub GraphQL client implementing [`ProjectApi`]
pub struct GraphQlClient {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GraphQlClient {
    /// Create a new GraphQL client
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("projectlink/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint,
            token,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("GITHUB_GRAPHQL_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());

        let token = std::env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty());

        Ok(Self::new(endpoint, token))
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a GraphQL document with bound variables
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>> {
        tracing::debug!(operation, %variables, "GraphQL request");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| {
            Error::Http(format!("GitHub GraphQL request {} failed: {}", operation, e))
        })?;

        let status = response.status();
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok());
        if is_rate_limited(status, remaining) {
            return Err(Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded for {}",
                operation
            )));
        }

        if !status.is_success() {
            return Err(Error::Http(format!(
                "GitHub GraphQL API returned error for {}: {}",
                operation, status
            )));
        }

        let body: GraphQlResponse<T> = response.json().await.map_err(|e| {
            Error::Upstream(format!("Failed to parse {} response: {}", operation, e))
        })?;

        tracing::debug!(
            operation,
            has_data = body.data.is_some(),
            errors = body.errors.len(),
            "GraphQL response"
        );

        Ok(body)
    }
}

/// A 403/429 is a rate limit only when GitHub reports no remaining requests
fn is_rate_limited(status: reqwest::StatusCode, remaining: Option<&str>) -> bool {
    (status == reqwest::StatusCode::FORBIDDEN
        || status == reqwest::StatusCode::TOO_MANY_REQUESTS)
        && remaining.map(str::trim) == Some("0")
}

impl ProjectApi for GraphQlClient {
    async fn search_project_by_title(
        &self,
        owner_type: OwnerType,
        owner_name: &str,
        search: &str,
    ) -> Result<Lookup<ProjectRef>> {
        let response = self
            .execute(
                "findProjects",
                &queries::search_projects_query(owner_type),
                json!({
                    "owner": owner_name,
                    "search": search,
                    "first": queries::SEARCH_PAGE_SIZE,
                }),
            )
            .await?;

        queries::decode_search(owner_type, response)
    }

    async fn get_project_id_by_number(
        &self,
        owner_type: OwnerType,
        owner_name: &str,
        number: u32,
    ) -> Result<Lookup<String>> {
        let response = self
            .execute(
                "getProject",
                &queries::project_id_query(owner_type),
                json!({ "owner": owner_name, "number": number }),
            )
            .await?;

        queries::decode_project_id(owner_type, response)
    }

    async fn clone_project_from_template(
        &self,
        template_id: Option<&str>,
        title: &str,
        owner_id: &str,
    ) -> Result<String> {
        match template_id {
            Some(project_id) => {
                let response = self
                    .execute(
                        "copyProjectTemplate",
                        queries::COPY_PROJECT_MUTATION,
                        json!({
                            "input": {
                                "projectId": project_id,
                                "ownerId": owner_id,
                                "title": title,
                                "includeDraftIssues": false,
                            }
                        }),
                    )
                    .await?;
                queries::decode_copy_project(response)
            }
            None => {
                let response = self
                    .execute(
                        "createProject",
                        queries::CREATE_PROJECT_MUTATION,
                        json!({ "input": { "ownerId": owner_id, "title": title } }),
                    )
                    .await?;
                queries::decode_create_project(response)
            }
        }
    }

    async fn attach_content_to_project(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<LinkResult> {
        let response = self
            .execute(
                "addIssueToProject",
                queries::ADD_ITEM_MUTATION,
                json!({ "input": { "projectId": project_id, "contentId": content_id } }),
            )
            .await?;

        queries::decode_add_item(response)
    }
}
