//! Generates the KP/ARA/ARS performance suite from a KP query backup.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use translator_testgen::performance::{build_performance_suite, load_kp_backup};
use translator_testgen::utils::init_logging;
use translator_testgen::{GeneratorConfig, JsonWriter};

#[derive(Debug, Parser)]
#[command(name = "performance_suite", about = "Generate the performance test suite")]
struct Args {
    /// JSON backup of KP infores ids and their template queries.
    #[arg(long, default_value = "./asset_backups/kp_performance_tests_2024_10_18.json")]
    backup: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    init_logging(&config.log_filter);
    let args = Args::parse();

    let kps = load_kp_backup(&args.backup)?;
    let suite = build_performance_suite(&kps);

    let path = JsonWriter::new(&config.test_suites_dir)
        .with_indent(2)
        .write(&suite)
        .await?;
    info!("Wrote {} performance test cases for {} KPs to {}", suite.test_cases.len(), kps.len(), path.display());
    Ok(())
}
