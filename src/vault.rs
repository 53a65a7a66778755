//! Minimal Vault KV v2 client over the HTTP API.
//!
//! Two round trips per run: a `lookup-self` call to verify the token, then a
//! single versioned secret read. Every failure here is fatal to the caller,
//! so errors carry enough context to diagnose a misconfigured store.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::VaultConfig;

const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

pub struct VaultClient {
    http: Client,
    config: VaultConfig,
}

impl VaultClient {
    /// Connect to Vault and verify the token with a `lookup-self` round trip.
    pub async fn connect(config: VaultConfig) -> Result<Self> {
        let client = Self {
            http: Client::new(),
            config,
        };
        client.check_auth().await?;
        Ok(client)
    }

    async fn check_auth(&self) -> Result<()> {
        let url = format!(
            "{}/v1/auth/token/lookup-self",
            self.config.addr.trim_end_matches('/')
        );

        let resp = self
            .http
            .get(&url)
            .header(VAULT_TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| anyhow!("Vault unreachable at {}: {e}", self.config.addr))?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "Unable to authenticate to Vault: HTTP {}",
                resp.status().as_u16()
            ));
        }

        Ok(())
    }

    /// Read the KV v2 secret at `path` and return its nested `token` field.
    pub async fn read_secret_token(&self, path: &str) -> Result<String> {
        let url = kv2_url(&self.config.addr, path);

        let resp = self
            .http
            .get(&url)
            .header(VAULT_TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| anyhow!("Network error reading secret from Vault: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Error retrieving secret '{path}' from Vault: HTTP {} - {body}",
                status.as_u16()
            ));
        }

        let json: Value = resp
            .json()
            .await
            .context("Failed to parse Vault secret response as JSON")?;

        extract_token(json).with_context(|| format!("Secret '{path}' is missing data.data.token"))
    }
}

fn kv2_url(addr: &str, path: &str) -> String {
    format!("{}/v1/secret/data/{}", addr.trim_end_matches('/'), path)
}

/// Pull `data.data.token` out of a KV v2 read response.
fn extract_token(json: Value) -> Result<String> {
    #[derive(Deserialize)]
    struct SecretResponse {
        data: Option<SecretData>,
    }
    #[derive(Deserialize)]
    struct SecretData {
        data: Option<SecretFields>,
    }
    #[derive(Deserialize)]
    struct SecretFields {
        token: Option<String>,
    }

    let parsed: SecretResponse =
        serde_json::from_value(json).context("Unexpected shape for Vault secret response")?;

    parsed
        .data
        .and_then(|d| d.data)
        .and_then(|f| f.token)
        .ok_or_else(|| anyhow!("no token field in secret payload"))
}
