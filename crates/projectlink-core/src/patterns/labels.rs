//! Label filter evaluation

use crate::types::{LabelOperator, SkipReason};

/// Normalized `labeled` list plus its operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelFilter {
    labels: Vec<String>,
    operator: LabelOperator,
}

impl LabelFilter {
    /// Parse the raw comma-separated `labeled` input and `label-operator`.
    ///
    /// Tokens are trimmed and lower-cased; blank tokens from repeated or
    /// trailing commas are dropped, never kept as an empty label.
    pub fn parse(raw_list: &str, raw_operator: &str) -> Self {
        Self::new(raw_list.split(','), LabelOperator::parse(raw_operator))
    }

    /// Build a filter from already split labels
    pub fn new<I, S>(labels: I, operator: LabelOperator) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();

        Self { labels, operator }
    }

    /// Normalized filter labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Operator the filter evaluates with
    pub fn operator(&self) -> LabelOperator {
        self.operator
    }

    /// Whether the filter has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Evaluate the filter against an issue's labels, case-insensitive
    pub fn matches<S: AsRef<str>>(&self, issue_labels: &[S]) -> bool {
        let issue: Vec<String> = issue_labels
            .iter()
            .map(|l| l.as_ref().to_lowercase())
            .collect();

        match self.operator {
            LabelOperator::And => self.labels.iter().all(|l| issue.contains(l)),
            LabelOperator::Not => {
                self.labels.is_empty() || !issue.iter().any(|l| self.labels.contains(l))
            }
            LabelOperator::Default => {
                self.labels.is_empty() || issue.iter().any(|l| self.labels.contains(l))
            }
        }
    }

    /// Skip reason for an issue this filter rejected
    pub fn skip_reason(&self, number: u64) -> SkipReason {
        SkipReason::LabelMismatch {
            number,
            operator: self.operator,
            labels: self.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_tokens() {
        let filter = LabelFilter::parse(" Bug ,NEW,, ,", "");
        assert_eq!(filter.labels(), &["bug".to_string(), "new".to_string()]);
        assert_eq!(filter.operator(), LabelOperator::Default);
    }

    #[test]
    fn test_parse_empty_list() {
        let filter = LabelFilter::parse("", "and");
        assert!(filter.is_empty());
        assert_eq!(filter.operator(), LabelOperator::And);
    }

    #[test]
    fn test_default_empty_filter_matches_anything() {
        let filter = LabelFilter::parse("", "");
        assert!(filter.matches::<&str>(&[]));
        assert!(filter.matches(&["bug"]));
    }

    #[test]
    fn test_default_requires_one_label() {
        assert!(!LabelFilter::parse("bug", "").matches(&["not-bug"]));
        assert!(LabelFilter::parse("bug,new", "").matches(&["bug"]));
        assert!(!LabelFilter::parse("bug,new", "").matches::<&str>(&[]));
    }

    #[test]
    fn test_unrecognized_operator_behaves_as_default() {
        assert!(LabelFilter::parse("bug,new", "or").matches(&["new"]));
        assert!(!LabelFilter::parse("bug,new", "xor").matches(&["other"]));
    }

    #[test]
    fn test_and_requires_every_label() {
        let filter = LabelFilter::parse("bug,new", "AND");
        assert!(filter.matches(&["bug", "new"]));
        assert!(filter.matches(&["new", "other", "bug"]));
        assert!(!filter.matches(&["bug", "other"]));
    }

    #[test]
    fn test_and_empty_filter_vacuously_true() {
        assert!(LabelFilter::parse(" , ", "AND").matches::<&str>(&[]));
    }

    #[test]
    fn test_not_rejects_any_listed_label() {
        let filter = LabelFilter::parse("bug,new", "NOT");
        assert!(!filter.matches(&["bug"]));
        assert!(filter.matches(&["other"]));
        assert!(filter.matches::<&str>(&[]));
    }

    #[test]
    fn test_not_empty_filter_matches() {
        assert!(LabelFilter::parse("", "NOT").matches(&["bug"]));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = LabelFilter::parse("FOO,Bar,baz", "AND");
        assert!(filter.matches(&["foo", "BAR", "baZ"]));

        let filter = LabelFilter::parse("bug, new", "NOT");
        assert!(filter.matches(&["Other"]));
        assert!(!filter.matches(&["BUG"]));
    }

    #[test]
    fn test_whitespace_and_commas() {
        let filter = LabelFilter::parse("accessibility  ,   backend    ,,   ,     bug", "AND");
        assert_eq!(filter.labels().len(), 3);
        assert!(filter.matches(&["accessibility", "backend", "bug"]));
        assert!(!filter.matches(&["accessibility", "backend"]));
    }

    #[test]
    fn test_skip_reason_follows_operator() {
        let reason = LabelFilter::parse("bug, new", "and").skip_reason(7);
        assert_eq!(
            reason.to_string(),
            "Skipping issue 7 because it doesn't match all the labels: bug, new"
        );
    }
}
