use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{ExpectedOutput, TestObjectiveEnum, TestSourceEnum};
use crate::error::AssetRejection;

/// Auxiliary parameter refining the meaning of a predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Qualifier {
    pub parameter: String,
    pub value: String,
}

impl Qualifier {
    pub fn new(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Provenance of a test record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TestMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub test_source: Option<TestSourceEnum>,
    #[serde(default)]
    pub test_reference: Option<String>,
    #[serde(default)]
    pub test_objective: Option<TestObjectiveEnum>,
}

impl TestMetadata {
    /// Metadata stamped on everything the generators build from SMURF sheets.
    pub fn smurf_acceptance(description: Option<String>, test_reference: Option<String>) -> Self {
        Self {
            id: "1".to_string(),
            name: None,
            description,
            test_source: Some(TestSourceEnum::SMURF),
            test_reference,
            test_objective: Some(TestObjectiveEnum::AcceptanceTest),
        }
    }
}

/// One expected input -> output assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestAsset {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub test_runner_settings: Vec<String>,
    pub input_id: String,
    #[serde(default)]
    pub input_name: Option<String>,
    #[serde(default)]
    pub input_category: Option<String>,
    #[serde(default)]
    pub predicate_id: String,
    #[serde(default)]
    pub predicate_name: String,
    pub output_id: String,
    #[serde(default)]
    pub output_name: Option<String>,
    #[serde(default)]
    pub output_category: Option<String>,
    #[serde(default)]
    pub association: Option<String>,
    #[serde(default)]
    pub qualifiers: Option<Vec<Qualifier>>,
    pub expected_output: ExpectedOutput,
    #[serde(default)]
    pub test_issue: Option<String>,
    #[serde(default)]
    pub semantic_severity: Option<String>,
    #[serde(default)]
    pub in_v1: Option<bool>,
    #[serde(default)]
    pub well_known: Option<bool>,
    #[serde(default)]
    pub test_reference: Option<String>,
    #[serde(default)]
    pub test_metadata: Option<TestMetadata>,
    /// Keys outside the core schema, e.g. the extra fields of pathfinder assets.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestAsset {
    pub fn new(
        id: impl Into<String>,
        input_id: impl Into<String>,
        predicate_name: impl Into<String>,
        output_id: impl Into<String>,
        expected_output: ExpectedOutput,
    ) -> Self {
        let predicate_name = predicate_name.into();
        Self {
            id: id.into(),
            name: None,
            description: None,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            input_id: input_id.into(),
            input_name: None,
            input_category: None,
            predicate_id: format!("biolink:{}", predicate_name),
            predicate_name,
            output_id: output_id.into(),
            output_name: None,
            output_category: None,
            association: None,
            qualifiers: None,
            expected_output,
            test_issue: None,
            semantic_severity: None,
            in_v1: None,
            well_known: None,
            test_reference: None,
            test_metadata: None,
            extra: Map::new(),
        }
    }

    /// Validate a decoded JSON document against the asset schema.
    pub fn from_value(value: Value) -> Result<Self, AssetRejection> {
        serde_json::from_value(value).map_err(|e| AssetRejection::SchemaMismatch(e.to_string()))
    }

    /// Concatenated qualifier values, in list order, without a separator.
    pub fn qualifier_key(&self) -> String {
        self.qualifiers
            .iter()
            .flatten()
            .map(|q| q.value.as_str())
            .collect()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
