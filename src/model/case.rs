use serde::{Deserialize, Serialize};

use super::asset::{Qualifier, TestAsset};
use super::enums::{ComponentEnum, TestEnvEnum, TestObjectiveEnum, TestSourceEnum};

/// A group of test assets that the runner executes as one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
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
    pub query_type: Option<String>,
    #[serde(default)]
    pub test_assets: Vec<TestAsset>,
    #[serde(default)]
    pub trapi_template: Option<String>,
    #[serde(default)]
    pub test_case_objective: Option<TestObjectiveEnum>,
    #[serde(default)]
    pub test_case_source: Option<TestSourceEnum>,
    #[serde(default)]
    pub test_case_predicate_name: Option<String>,
    #[serde(default)]
    pub test_case_predicate_id: Option<String>,
    #[serde(default)]
    pub test_case_input_id: Option<String>,
    #[serde(default)]
    pub qualifiers: Option<Vec<Qualifier>>,
    #[serde(default)]
    pub input_category: Option<String>,
    #[serde(default)]
    pub output_category: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentEnum>,
    #[serde(default)]
    pub test_env: Option<TestEnvEnum>,
}

impl TestCase {
    pub fn new(id: impl Into<String>, test_assets: Vec<TestAsset>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            query_type: None,
            test_assets,
            trapi_template: None,
            test_case_objective: None,
            test_case_source: None,
            test_case_predicate_name: None,
            test_case_predicate_id: None,
            test_case_input_id: None,
            qualifiers: None,
            input_category: None,
            output_category: None,
            components: Vec::new(),
            test_env: None,
        }
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.test_assets.iter().map(|a| a.id.as_str())
    }
}
