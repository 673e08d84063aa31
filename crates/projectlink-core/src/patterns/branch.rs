//! Base branch glob matching

use crate::error::Result;
use globset::{GlobBuilder, GlobMatcher};

/// Precompiled `base-branch-pattern` glob
pub struct BranchMatcher {
    pattern: String,
    matcher: Option<GlobMatcher>,
}

impl BranchMatcher {
    /// Compile a branch pattern. An empty pattern matches every branch.
    ///
    /// `*` crosses `/` so `release/*` matches `release/1.2/hotfix`.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        let matcher = if pattern.is_empty() {
            None
        } else {
            Some(
                GlobBuilder::new(pattern)
                    .literal_separator(false)
                    .build()?
                    .compile_matcher(),
            )
        };

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// Check a base branch against the pattern
    #[inline]
    pub fn matches(&self, branch: &str) -> bool {
        self.matcher.as_ref().map_or(true, |m| m.is_match(branch))
    }

    /// The pattern as configured (trimmed)
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
