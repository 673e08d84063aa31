//! Project resolution: filter, find or create a project, attach the item

use crate::error::{Error, Result};
use crate::event::{EventPayload, LinkContext};
use crate::patterns::{BranchMatcher, LabelFilter};
use crate::project::{derive_project_name, parse_project_url};
use crate::traits::ProjectApi;
use crate::types::{InputConfig, LinkOutcome, Lookup, OwnerType, SkipReason, TemplateSource};

/// Runs one link decision for one event.
///
/// Strictly sequential: at most four awaited API calls (search, template
/// lookup, clone, attach). Every filter runs before the first call, so a
/// skip or an input error never touches the platform.
pub struct ProjectLinker<'a, A: ProjectApi> {
    api: &'a A,
    config: &'a InputConfig<'a>,
}

impl<'a, A: ProjectApi> ProjectLinker<'a, A> {
    /// Create a linker over an API client and the run configuration
    pub fn new(api: &'a A, config: &'a InputConfig<'a>) -> Self {
        Self { api, config }
    }

    /// Process the event
    pub async fn run(&self, event: &EventPayload) -> Result<LinkOutcome> {
        let ctx = event.context()?;
        let owner_type = OwnerType::resolve(self.config.owner_type.as_deref())?;

        tracing::debug!(
            owner = ctx.owner_login,
            %owner_type,
            number = ctx.number,
            labels = %ctx.labels.join(", "),
            base_branch = ctx.base_branch,
            "Issue/PR context"
        );

        if let Some(reason) = self.branch_filter(&ctx)? {
            tracing::info!("{}", reason);
            return Ok(LinkOutcome::Skipped(reason));
        }

        let filter = LabelFilter::parse(&self.config.labeled, &self.config.label_operator);
        tracing::debug!(
            conditions = %filter.labels().join(", "),
            operator = filter.operator().as_str(),
            "Label conditions"
        );
        if !filter.matches(ctx.labels.as_slice()) {
            let reason = filter.skip_reason(ctx.number);
            tracing::info!("{}", reason);
            return Ok(LinkOutcome::Skipped(reason));
        }

        let title = derive_project_name(&self.config.name_spec(ctx.base_branch));
        if title.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "Derived project name is empty for base branch {}",
                ctx.base_branch
            )));
        }
        tracing::debug!(title = %title, "Project name");

        let template = self.template_source()?;

        let project_id = match self
            .api
            .search_project_by_title(owner_type, ctx.owner_login, &title)
            .await?
        {
            Lookup::Found(project) => {
                tracing::info!(
                    "Found project: {} (Number: {})(ID: {})",
                    project.title,
                    project.number,
                    project.id
                );
                project.id
            }
            Lookup::NotFound => {
                tracing::info!(
                    "No projects found for {} with query {}",
                    ctx.owner_login,
                    title
                );
                let template_id = self.template_id(&ctx, owner_type, &template).await;
                let project_id = self
                    .api
                    .clone_project_from_template(template_id.as_deref(), &title, ctx.owner_id)
                    .await?;
                tracing::info!("Created project {} (ID: {})", title, project_id);
                project_id
            }
        };

        tracing::info!("Adding issue {} to project {}", ctx.number, project_id);
        let result = self
            .api
            .attach_content_to_project(&project_id, ctx.content_id)
            .await?;
        tracing::info!(
            "Linked issue {} as item {} in {}",
            ctx.number,
            result.item_id,
            result.project_url
        );

        Ok(LinkOutcome::Linked(result))
    }

    fn branch_filter(&self, ctx: &LinkContext<'_>) -> Result<Option<SkipReason>> {
        let pattern = match self.config.base_branch_pattern.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Ok(None),
        };

        let matcher = BranchMatcher::new(pattern)?;
        if matcher.matches(ctx.base_branch) {
            return Ok(None);
        }

        Ok(Some(SkipReason::BranchMismatch {
            number: ctx.number,
            branch: ctx.base_branch.to_string(),
            pattern: matcher.pattern().to_string(),
        }))
    }

    /// Resolve the configured template; a direct number wins over a URL
    fn template_source(&self) -> Result<TemplateSource> {
        let url = self
            .config
            .template_project_url
            .as_deref()
            .filter(|u| !u.trim().is_empty());

        if let Some(number) = self.config.template_project_number {
            if let Some(url) = url {
                tracing::warn!(
                    "Both template-project-number ({}) and template-project-url ({}) are set; using the number",
                    number,
                    url
                );
            }
            return Ok(TemplateSource::Number(number));
        }

        match url {
            Some(url) => {
                tracing::debug!(url, "Template project URL");
                Ok(TemplateSource::Url(parse_project_url(url.trim())?))
            }
            None => Ok(TemplateSource::Blank),
        }
    }

    /// Look up the template project id.
    ///
    /// Any failure degrades to `None` so a blank project is created.
    async fn template_id(
        &self,
        ctx: &LinkContext<'_>,
        owner_type: OwnerType,
        template: &TemplateSource,
    ) -> Option<String> {
        let (template_owner_type, template_owner, number) = match template {
            TemplateSource::Blank => {
                tracing::info!(
                    "No template project provided. Will create a project without a template."
                );
                return None;
            }
            TemplateSource::Number(number) => (owner_type, ctx.owner_login, *number),
            TemplateSource::Url(parsed) => (
                parsed.owner_type,
                parsed.owner_name.as_str(),
                parsed.project_number,
            ),
        };

        tracing::debug!(
            owner = template_owner,
            owner_type = %template_owner_type,
            number,
            "Template project"
        );

        let lookup = self
            .api
            .get_project_id_by_number(template_owner_type, template_owner, number)
            .await
            .and_then(|found| match found {
                Lookup::Found(id) => Ok(id),
                Lookup::NotFound => Err(Error::NotFound(format!(
                    "Template project not found for {}/{}",
                    template_owner, number
                ))),
            });

        match lookup {
            Ok(id) => {
                tracing::debug!(id = %id, "Template project node ID");
                Some(id)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!("{}. Creating a blank project.", e.message());
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Template project lookup for {}/{} failed: {}. Creating a blank project.",
                    template_owner,
                    number,
                    e
                );
                None
            }
        }
    }
}
