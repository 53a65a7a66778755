//! Fetch a GitHub user's profile and aggregate per-language code size
//! across their public repositories, using a GitHub token stored in Vault.

pub mod config;
pub mod github;
pub mod report;
pub mod vault;
