use anyhow::{Context, Result};

pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";

/// Vault connection settings, read once at startup and passed explicitly
/// to the client instead of living in process-wide globals.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub addr: String,
    pub token: String,
}

impl VaultConfig {
    /// Build the config from `VAULT_ADDR` (optional) and `VAULT_TOKEN` (required).
    pub fn from_env() -> Result<Self> {
        let addr = std::env::var("VAULT_ADDR").unwrap_or_else(|_| DEFAULT_VAULT_ADDR.to_string());
        let token =
            std::env::var("VAULT_TOKEN").context("VAULT_TOKEN environment variable not set")?;
        Ok(Self { addr, token })
    }
}
