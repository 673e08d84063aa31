//! # projectlink core
//!
//! Links an issue or pull request to a GitHub Projects (v2) board chosen
//! from its base branch.
//!
//! A run is one linear decision:
//! - **Filter** on a base branch glob and on a label set (`any`, `AND`, `NOT`)
//! - **Derive** a project title from the base branch (prefix/suffix strip,
//!   character-to-space replacement)
//! - **Search** the owner's projects for that title
//! - **Create** the project from a template (or blank) when none matches
//! - **Attach** the issue/PR and report the project URL and item id
//!
//! The platform is reached through the [`ProjectApi`] trait; [`GraphQlClient`]
//! is the GitHub GraphQL implementation.
//!
//! ## Example
//!
//! ```no_run
//! use projectlink_core::{link_project, EventPayload, InputConfig};
//! use std::borrow::Cow;
//!
//! # async fn example() -> projectlink_core::Result<()> {
//! let config = InputConfig {
//!     owner_type: Some(Cow::Borrowed("orgs")),
//!     name_prefix_remove: Some(Cow::Borrowed("release/")),
//!     ..Default::default()
//! };
//!
//! let event = EventPayload::from_path("event.json".as_ref())?;
//! let outcome = link_project(&config, &event).await?;
//! if let Some(link) = outcome.link() {
//!     println!("Added item {} to {}", link.item_id, link.project_url);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod coordination;
pub mod error;
pub mod event;
pub mod http;
pub mod output;
pub mod patterns;
pub mod project;
pub mod traits;
pub mod types;

pub use coordination::ProjectLinker;
pub use error::{Error, ErrorKind, Result};
pub use event::{EventPayload, LinkContext};
pub use http::GraphQlClient;
pub use patterns::{BranchMatcher, LabelFilter};
pub use project::{derive_project_name, parse_project_url};
pub use traits::ProjectApi;
pub use types::{
    InputConfig, LabelOperator, LinkOutcome, LinkResult, Lookup, OwnerType, ParsedProjectUrl,
    ProjectNameSpec, ProjectRef, SkipReason, TemplateSource,
};

/// Link the event's issue/PR using a GraphQL client built from the environment
///
/// Reads `GITHUB_GRAPHQL_URL` and `GITHUB_TOKEN`. Callers that already hold a
/// client should use [`ProjectLinker`] directly.
pub async fn link_project(config: &InputConfig<'_>, event: &EventPayload) -> Result<LinkOutcome> {
    let client = GraphQlClient::from_env()?;
    ProjectLinker::new(&client, config).run(event).await
}

/// Synchronous variant of `link_project`
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn link_project_sync(config: &InputConfig<'_>, event: &EventPayload) -> Result<LinkOutcome> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(link_project(config, event))
}
