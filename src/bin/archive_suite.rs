//! Downloads the tests repository snapshot and builds one of the standing
//! suites from the assets inside it.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use translator_testgen::ingest::archive::{self, AssetDir};
use translator_testgen::ingest::http_client;
use translator_testgen::model::{ExpectedOutput, PathfinderTestAsset, TestAsset, TestEnvEnum};
use translator_testgen::suite::assemble_pathfinder_suite;
use translator_testgen::utils::init_logging;
use translator_testgen::{assemble_suite, ExpectedOutputFilter, GeneratorConfig, JsonWriter, SuiteSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// TopAnswer and NeverShow assets, CI environment.
    Sprint6,
    /// Everything but OverlyGeneric, PROD environment.
    ProdIntegration,
    /// Pathfinder assets grouped by source/target pair; the cases are
    /// written out as well.
    Pathfinder,
}

struct PresetPlan {
    suite: SuiteSpec,
    keep: Vec<ExpectedOutput>,
    asset_dir: AssetDir,
}

impl Preset {
    fn plan(self) -> PresetPlan {
        use ExpectedOutput::*;
        match self {
            Preset::Sprint6 => PresetPlan {
                suite: SuiteSpec::acceptance("sprint_6_tests", "Sprint 6 tests", TestEnvEnum::Ci),
                keep: vec![TopAnswer, NeverShow],
                asset_dir: AssetDir::TestAssets,
            },
            Preset::ProdIntegration => PresetPlan {
                suite: SuiteSpec::acceptance("prod_integration", "PROD Integration Tests", TestEnvEnum::Prod),
                keep: vec![TopAnswer, NeverShow, Acceptable, BadButForgivable],
                asset_dir: AssetDir::TestAssets,
            },
            Preset::Pathfinder => PresetPlan {
                suite: SuiteSpec::acceptance("pathfinder_tests", "Pathfinder tests", TestEnvEnum::Ci),
                keep: vec![TopAnswer, Acceptable, BadButForgivable, NeverShow],
                asset_dir: AssetDir::PathfinderTestAssets,
            },
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "archive_suite", about = "Generate a suite from a zipped snapshot of the tests repository")]
struct Args {
    #[arg(value_enum)]
    preset: Preset,

    /// Archive URL (defaults to the configured snapshot for the preset).
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    init_logging(&config.log_filter);
    let args = Args::parse();

    let plan = args.preset.plan();
    let url = args.url.unwrap_or_else(|| match plan.asset_dir {
        AssetDir::PathfinderTestAssets => config.pathfinder_archive_url.clone(),
        AssetDir::TestAssets => config.tests_archive_url.clone(),
    });

    let client = http_client()?;
    let bytes = archive::download_archive(&client, &url).await?;

    let filter = ExpectedOutputFilter::only(plan.keep);
    info!("Keeping assets labelled {:?}", filter.labels());
    let suite_writer = JsonWriter::new(&config.test_suites_dir);

    match plan.asset_dir {
        AssetDir::TestAssets => {
            let assets: Vec<TestAsset> = archive::read_archive_assets(&bytes, Some(&filter))?;
            let suite = assemble_suite(&plan.suite, &assets, None);

            let path = suite_writer.write(&suite).await?;
            info!("Wrote suite {} ({} test cases) to {}", suite.id, suite.test_cases.len(), path.display());
        }
        AssetDir::PathfinderTestAssets => {
            let assets: Vec<PathfinderTestAsset> = archive::read_archive_assets(&bytes, Some(&filter))?;
            let suite = assemble_pathfinder_suite(&plan.suite, &assets, None);

            let path = suite_writer.write(&suite).await?;
            info!("Wrote suite {} ({} test cases) to {}", suite.id, suite.test_cases.len(), path.display());

            let case_writer = JsonWriter::new(&config.pathfinder_test_cases_dir);
            let written = case_writer.write_all(suite.test_cases.values()).await?;
            info!("Wrote {} test cases to {}", written, case_writer.dir().display());
        }
    }
    Ok(())
}
