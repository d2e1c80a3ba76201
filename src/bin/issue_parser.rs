//! Lists the templated test assets filed as GitHub feedback issues.
//! Multiple templates in one issue are not supported; the last value of
//! each field wins.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use translator_testgen::ingest::{http_client, issue};
use translator_testgen::utils::init_logging;
use translator_testgen::writer::to_indented_json;
use translator_testgen::GeneratorConfig;

#[derive(Debug, Parser)]
#[command(name = "issue_parser", about = "Extract templated test assets from GitHub issues")]
struct Args {
    /// Repository owner (defaults to the configured owner).
    #[arg(long)]
    owner: Option<String>,

    /// Repository name (defaults to the configured repository).
    #[arg(long)]
    repo: Option<String>,

    /// Write the records to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    init_logging(&config.log_filter);
    let args = Args::parse();

    let owner = args.owner.unwrap_or(config.github_owner);
    let repo = args.repo.unwrap_or(config.github_repo);

    let issues = issue::fetch_issues(&http_client()?, &config.github_api, &owner, &repo).await;
    let assets = issue::templated_assets(&issues);
    info!("Found {} templated assets in {} issues", assets.len(), issues.len());

    let json = to_indented_json(&assets, 4)?;
    match args.output {
        Some(path) => tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
