//! Project identity resolution: owner types, titles and URLs

pub mod name;
pub mod owner;
pub mod url;

pub use name::derive_project_name;
pub use url::parse_project_url;
