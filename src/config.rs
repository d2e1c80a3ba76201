//! Generator Configuration
//!
//! Defaults match the layout of the tests repository; a YAML file and
//! `TESTGEN_*` environment variables can override them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::normalize::{Normalizer, PredicateTable};

pub const DEFAULT_CONFIG_FILE: &str = "testgen.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub test_assets_dir: PathBuf,
    pub test_cases_dir: PathBuf,
    pub test_suites_dir: PathBuf,
    pub pathfinder_test_cases_dir: PathBuf,
    /// Zip snapshot of the tests repository.
    pub tests_archive_url: String,
    pub pathfinder_archive_url: String,
    pub test_suite_url: String,
    pub github_api: String,
    pub github_owner: String,
    pub github_repo: String,
    /// Replaces the built-in predicate table when set.
    pub predicate_table: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            test_assets_dir: PathBuf::from("../test_assets"),
            test_cases_dir: PathBuf::from("../test_cases"),
            test_suites_dir: PathBuf::from("../test_suites"),
            pathfinder_test_cases_dir: PathBuf::from("../pathfinder_test_cases"),
            tests_archive_url: "https://github.com/NCATSTranslator/Tests/archive/refs/heads/main.zip".to_string(),
            pathfinder_archive_url: "https://github.com/NCATSTranslator/Tests/archive/refs/heads/more_pathfinder.zip"
                .to_string(),
            test_suite_url: "https://github.com/NCATSTranslator/Tests".to_string(),
            github_api: "https://api.github.com".to_string(),
            github_owner: "NCATSTranslator".to_string(),
            github_repo: "Feedback".to_string(),
            predicate_table: None,
            log_filter: "translator_testgen=info".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Read `path` if it exists, otherwise start from defaults; then apply
    /// environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            GeneratorConfig::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load `.env`, then the default config file from the working directory.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let path = std::env::var("TESTGEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(path)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let paths: [(&str, &mut PathBuf); 4] = [
            ("TESTGEN_TEST_ASSETS_DIR", &mut self.test_assets_dir),
            ("TESTGEN_TEST_CASES_DIR", &mut self.test_cases_dir),
            ("TESTGEN_TEST_SUITES_DIR", &mut self.test_suites_dir),
            ("TESTGEN_PATHFINDER_TEST_CASES_DIR", &mut self.pathfinder_test_cases_dir),
        ];
        for (key, field) in paths {
            if let Some(value) = lookup(key) {
                *field = PathBuf::from(value);
            }
        }

        let strings: [(&str, &mut String); 7] = [
            ("TESTGEN_TESTS_ARCHIVE_URL", &mut self.tests_archive_url),
            ("TESTGEN_PATHFINDER_ARCHIVE_URL", &mut self.pathfinder_archive_url),
            ("TESTGEN_TEST_SUITE_URL", &mut self.test_suite_url),
            ("TESTGEN_GITHUB_API", &mut self.github_api),
            ("TESTGEN_GITHUB_OWNER", &mut self.github_owner),
            ("TESTGEN_GITHUB_REPO", &mut self.github_repo),
            ("TESTGEN_LOG", &mut self.log_filter),
        ];
        for (key, field) in strings {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }

        if let Some(value) = lookup("TESTGEN_PREDICATE_TABLE") {
            self.predicate_table = Some(PathBuf::from(value));
        }
    }

    /// Normalizer over the configured predicate table.
    pub fn normalizer(&self) -> Result<Normalizer> {
        let table = match &self.predicate_table {
            Some(path) => PredicateTable::load(path)?,
            None => PredicateTable::builtin()?,
        };
        Ok(Normalizer::new(table))
    }
}
