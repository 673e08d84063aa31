//! HTTP client for the GitHub GraphQL API

pub mod client;
pub mod queries;

pub use client::{GraphQlClient, DEFAULT_GRAPHQL_URL};
