//! Test Suite Generator
//!
//! Builds a TestSuite of TestCases, one per TestAsset, from an asset file
//! published at a URL.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use translator_testgen::error::IngestError;
use translator_testgen::group::cases_per_asset;
use translator_testgen::ingest::{http_client, remote};
use translator_testgen::model::TestSuite;
use translator_testgen::utils::init_logging;
use translator_testgen::{GeneratorConfig, JsonWriter};

fn url_arg(raw: &str) -> Result<String, IngestError> {
    remote::validate_url(raw).map(|_| raw.to_string())
}

/// Translator Testing Test Suite Generator
#[derive(Debug, Parser)]
#[command(name = "translator_testgen", version, about, long_about = None)]
struct Cli {
    /// CURIE of Test Suite to create.
    #[arg(short = 'i', long = "test_suite_id")]
    test_suite_id: String,

    /// Human readable name of Test Suite to create.
    #[arg(short = 'n', long = "test_suite_name")]
    test_suite_name: String,

    /// Input source URL location of test assets file. File format discerned
    /// from file extension (one of 'tsv', 'json' or 'yaml' assumed).
    #[arg(short = 'a', long = "test_assets_url", value_parser = url_arg)]
    test_assets_url: String,

    /// Target storage URL location of resulting Test Suite and related data
    /// (defaults to the configured tests repository).
    #[arg(short = 's', long = "test_suite_url", value_parser = url_arg)]
    test_suite_url: Option<String>,

    /// Local directory the suite JSON is written to (defaults to the configured suites directory).
    #[arg(short = 'o', long = "output_dir")]
    output_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    init_logging(&config.log_filter);

    let cli = Cli::parse();
    let test_suite_url = cli.test_suite_url.unwrap_or_else(|| config.test_suite_url.clone());
    let test_suite_url = test_suite_url.trim_end_matches('/');

    let client = http_client()?;
    let assets = remote::load_assets(&client, &cli.test_assets_url).await?;

    let suite = TestSuite::named(cli.test_suite_id.as_str(), cli.test_suite_name.as_str(), cases_per_asset(assets));

    let output_dir = cli.output_dir.unwrap_or_else(|| config.test_suites_dir.clone());
    let path = JsonWriter::new(output_dir).write(&suite).await?;

    info!(
        "Wrote suite {} with {} test cases to {}",
        suite.id,
        suite.test_cases.len(),
        path.display()
    );
    info!("Publication target: {}/{}.json", test_suite_url, cli.test_suite_name.trim());
    Ok(())
}
