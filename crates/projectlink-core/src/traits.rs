//! Trait seam for the project platform API

use crate::error::Result;
use crate::types::{LinkResult, Lookup, OwnerType, ProjectRef};
use std::future::Future;

/// Project platform operations consumed by the linker.
///
/// No boxing, no dynamic dispatch - the linker is generic over the client.
pub trait ProjectApi {
    /// First project of `owner_name` whose title matches `search`
    fn search_project_by_title(
        &self,
        owner_type: OwnerType,
        owner_name: &str,
        search: &str,
    ) -> impl Future<Output = Result<Lookup<ProjectRef>>> + Send;

    /// Node id of project `number` owned by `owner_name`
    fn get_project_id_by_number(
        &self,
        owner_type: OwnerType,
        owner_name: &str,
        number: u32,
    ) -> impl Future<Output = Result<Lookup<String>>> + Send;

    /// Create a project titled `title` under `owner_id`.
    ///
    /// Copies `template_id` when given, otherwise creates a blank project.
    /// Returns the new project's node id.
    fn clone_project_from_template(
        &self,
        template_id: Option<&str>,
        title: &str,
        owner_id: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Add the issue/PR `content_id` to `project_id`
    fn attach_content_to_project(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> impl Future<Output = Result<LinkResult>> + Send;
}
