//! Standalone connectivity check: authenticates to Vault with the same
//! environment configuration as the main binary, without touching GitHub.

use anyhow::Result;

use langstats::config::VaultConfig;
use langstats::vault::VaultClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    match check().await {
        Ok(()) => println!("Successfully authenticated to Vault!"),
        Err(e) => {
            eprintln!("Failed to authenticate to Vault: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn check() -> Result<()> {
    let config = VaultConfig::from_env()?;
    VaultClient::connect(config).await?;
    Ok(())
}
