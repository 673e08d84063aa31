//! Issue/PR filtering by base branch and labels

pub mod branch;
pub mod labels;

pub use branch::BranchMatcher;
pub use labels::LabelFilter;
