//! Builds test assets, grouped test cases and a filtered suite from a SMURF
//! TSV backup.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use translator_testgen::ingest::tsv;
use translator_testgen::model::{ExpectedOutput, TestEnvEnum};
use translator_testgen::utils::init_logging;
use translator_testgen::{assemble_suite, group_test_cases, ExpectedOutputFilter, GeneratorConfig, JsonWriter, SuiteSpec};

#[derive(Debug, Parser)]
#[command(name = "tsv_suite", about = "Generate assets, cases and a suite from a TSV asset backup")]
struct Args {
    /// TSV export of the asset spreadsheet.
    #[arg(long, default_value = "asset_backups/2024_06_20.tsv")]
    tsv: PathBuf,

    #[arg(long, default_value = "sprint_4_tests")]
    suite_id: String,

    #[arg(long, default_value = "Sprint 4 TopAnswer tests")]
    description: String,

    /// Expected outputs kept in the suite (comma separated).
    #[arg(long, value_delimiter = ',', default_value = "TopAnswer")]
    keep: Vec<ExpectedOutput>,

    #[arg(long, value_enum, default_value = "ci")]
    env: TestEnvEnum,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    init_logging(&config.log_filter);
    let args = Args::parse();

    let normalizer = config.normalizer()?;
    let rows = tsv::read_tsv(&args.tsv)?;
    let mut assets = tsv::build_test_assets(&rows, &normalizer);
    info!("Created {} test assets from {} rows", assets.len(), rows.len());

    tsv::sort_by_numeric_suffix(&mut assets);

    let test_cases = group_test_cases(&assets, args.env);
    info!("Created {} test cases", test_cases.len());

    let case_writer = JsonWriter::new(&config.test_cases_dir);
    let written = case_writer.write_all(test_cases.values()).await?;
    info!("Wrote {} test cases to {}", written, case_writer.dir().display());

    let asset_writer = JsonWriter::new(&config.test_assets_dir);
    let written = asset_writer.write_all(&assets).await?;
    info!("Wrote {} test assets to {}", written, asset_writer.dir().display());

    let spec = SuiteSpec::acceptance(args.suite_id, args.description, args.env);
    let filter = ExpectedOutputFilter::only(args.keep);
    info!("Keeping assets labelled {:?}", filter.labels());
    let suite = assemble_suite(&spec, &assets, Some(&filter));

    let path = JsonWriter::new(&config.test_suites_dir).write(&suite).await?;
    info!("Wrote suite {} ({} test cases) to {}", suite.id, suite.test_cases.len(), path.display());
    Ok(())
}
