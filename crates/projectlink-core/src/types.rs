//! Core type definitions

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Canonical owner type, selects the GraphQL root field for project queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OwnerType {
    /// Organization-owned projects (`organization(login:)`)
    Organization,
    /// User-owned projects (`user(login:)`)
    User,
}

impl OwnerType {
    /// GraphQL root field name for this owner type
    #[inline]
    pub const fn query_field(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::User => "user",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_field())
    }
}

/// How the `labeled` list is combined against the issue labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LabelOperator {
    /// At least one of the labels (also used for unset/unrecognized input)
    #[default]
    Default,
    /// Every label
    And,
    /// None of the labels
    Not,
}

impl LabelOperator {
    /// Parse the raw `label-operator` input, case-insensitive.
    ///
    /// Anything other than `and`/`not` (including empty) is `Default`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("and") {
            Self::And
        } else if raw.eq_ignore_ascii_case("not") {
            Self::Not
        } else {
            Self::Default
        }
    }

    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::And => "AND",
            Self::Not => "NOT",
        }
    }
}

/// Inputs for deriving a project title from a base branch
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectNameSpec<'a> {
    /// Base branch name of the pull request
    pub base_branch: &'a str,
    /// Literal prefix stripped case-insensitively
    pub prefix_remove: Option<&'a str>,
    /// Literal suffix stripped case-insensitively
    pub suffix_remove: Option<&'a str>,
    /// Every character in this string is replaced with a space
    pub replace_with_spaces: Option<&'a str>,
}

/// Owner and number extracted from a project URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProjectUrl {
    /// Canonical owner type
    pub owner_type: OwnerType,
    /// Organization or user login
    pub owner_name: String,
    /// Project number within the owner
    pub project_number: u32,
}

/// Identity of a project on the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    /// Opaque node id
    pub id: String,
    /// Project title
    pub title: String,
    /// Project number within the owner
    pub number: u32,
}

/// Outcome of attaching an issue/PR to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResult {
    /// URL of the project the item was added to
    pub project_url: String,
    /// Opaque id of the created project item
    pub item_id: String,
}

/// Explicit result of a lookup call against the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The target exists
    Found(T),
    /// The platform reported no such target
    NotFound,
}

/// Where the template project for a new board comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// No template configured; a blank project is created
    Blank,
    /// Project number under the repository owner
    Number(u32),
    /// Fully qualified template project URL
    Url(ParsedProjectUrl),
}

/// Why a run ended without linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `base-branch-pattern` did not match
    BranchMismatch {
        /// Issue/PR number
        number: u64,
        /// Base branch of the issue/PR
        branch: String,
        /// Configured glob
        pattern: String,
    },
    /// Label filter evaluated false
    LabelMismatch {
        /// Issue/PR number
        number: u64,
        /// Operator the filter was evaluated with
        operator: LabelOperator,
        /// Normalized filter labels
        labels: Vec<String>,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BranchMismatch {
                number,
                branch,
                pattern,
            } => write!(
                f,
                "Skipping issue {} because base branch {} does not match the pattern: {}",
                number, branch, pattern
            ),
            SkipReason::LabelMismatch {
                number,
                operator,
                labels,
            } => {
                let condition = match operator {
                    LabelOperator::And => "doesn't match all the labels",
                    LabelOperator::Not => "contains one of the labels",
                    LabelOperator::Default => "does not have one of the labels",
                };
                write!(
                    f,
                    "Skipping issue {} because it {}: {}",
                    number,
                    condition,
                    labels.join(", ")
                )
            }
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The issue/PR was attached to a project
    Linked(LinkResult),
    /// A filter rejected the issue/PR; no external call was made
    Skipped(SkipReason),
}

impl LinkOutcome {
    /// Borrow the link result if the run linked
    #[inline]
    pub fn link(&self) -> Option<&LinkResult> {
        match self {
            LinkOutcome::Linked(result) => Some(result),
            LinkOutcome::Skipped(_) => None,
        }
    }
}

/// Configuration input, assembled once at the process boundary
#[derive(Debug, Clone, Default)]
pub struct InputConfig<'a> {
    /// `owner-type` token of the repository owner
    pub owner_type: Option<Cow<'a, str>>,

    /// Comma-separated label list
    pub labeled: Cow<'a, str>,
    /// `AND`, `NOT`, or anything else for any-of
    pub label_operator: Cow<'a, str>,

    /// Glob the base branch must match
    pub base_branch_pattern: Option<Cow<'a, str>>,

    // Project naming
    /// Literal prefix stripped from the base branch
    pub name_prefix_remove: Option<Cow<'a, str>>,
    /// Literal suffix stripped from the base branch
    pub name_suffix_remove: Option<Cow<'a, str>>,
    /// Characters replaced with spaces
    pub replace_with_spaces: Option<Cow<'a, str>>,

    // Template fallback
    /// Template project URL
    pub template_project_url: Option<Cow<'a, str>>,
    /// Template project number under the repository owner
    pub template_project_number: Option<u32>,
}

impl<'a> InputConfig<'a> {
    /// Build the project name spec for a base branch
    pub fn name_spec<'b>(&'b self, base_branch: &'b str) -> ProjectNameSpec<'b> {
        ProjectNameSpec {
            base_branch,
            prefix_remove: self.name_prefix_remove.as_deref(),
            suffix_remove: self.name_suffix_remove.as_deref(),
            replace_with_spaces: self.replace_with_spaces.as_deref(),
        }
    }
}
