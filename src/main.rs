use anyhow::Result;
use clap::Parser;
use tracing::error;

use langstats::config::VaultConfig;
use langstats::github::{self, GithubClient};
use langstats::report;
use langstats::vault::VaultClient;

const GITHUB_SECRET_PATH: &str = "github";

/// Fetch a GitHub user's profile and aggregate language usage across
/// their public repositories.
#[derive(Parser)]
#[clap(
    name = "langstats",
    version,
    about = "Fetch GitHub user profile and languages used."
)]
struct Cli {
    /// GitHub username
    username: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = VaultConfig::from_env()?;
    let vault = VaultClient::connect(config).await?;
    let token = vault.read_secret_token(GITHUB_SECRET_PATH).await?;

    let client = GithubClient::new(Some(token));

    println!("Fetching profile for user: {}", cli.username);
    let profile = client.fetch_profile(&cli.username).await?;
    println!("\n{}", report::profile_summary(&profile));

    println!("\nFetching repositories...");
    let repos = github::list_repositories(&client, &cli.username).await?;
    println!("Total Public Repositories: {}", repos.len());

    println!("\nAggregating languages used across repositories...");
    let totals = github::aggregate_languages(&client, &repos).await;

    println!("\n=== Languages Used ===");
    print!("{}", report::language_report(&report::sorted_languages(&totals)));

    Ok(())
}
