use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::asset::TestMetadata;
use super::case::TestCase;
use super::enums::TestPersonaEnum;

/// Named collection of test cases, keyed by case id in creation order.
/// Pathfinder suites hold [`PathfinderTestCase`](super::PathfinderTestCase)s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "C: Deserialize<'de>"))]
pub struct TestSuite<C = TestCase> {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub test_runner_settings: Vec<String>,
    #[serde(default)]
    pub test_metadata: Option<TestMetadata>,
    #[serde(default)]
    pub test_persona: Option<TestPersonaEnum>,
    #[serde(default)]
    pub test_cases: IndexMap<String, C>,
    #[serde(default)]
    pub test_suite_specification: Option<Value>,
}

impl<C> TestSuite<C> {
    pub fn case_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.test_cases.keys().map(String::as_str)
    }
}

impl TestSuite {
    pub fn asset_count(&self) -> usize {
        self.test_cases.values().map(|c| c.test_assets.len()).sum()
    }
}
