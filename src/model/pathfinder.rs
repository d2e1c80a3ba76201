use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::asset::TestMetadata;
use super::enums::{ComponentEnum, ExpectedOutput, TestEnvEnum, TestObjectiveEnum, TestSourceEnum};
use crate::error::AssetRejection;

/// Intermediate node a pathfinder answer is expected to pass through. Any of
/// the `ids` satisfies the node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathfinderPathNode {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Assertion about the paths connecting a source and a target input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathfinderTestAsset {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub test_runner_settings: Vec<String>,
    pub source_input_id: String,
    #[serde(default)]
    pub source_input_name: Option<String>,
    #[serde(default)]
    pub source_input_category: Option<String>,
    pub target_input_id: String,
    #[serde(default)]
    pub target_input_name: Option<String>,
    #[serde(default)]
    pub target_input_category: Option<String>,
    #[serde(default)]
    pub predicate_id: Option<String>,
    #[serde(default)]
    pub predicate_name: Option<String>,
    #[serde(default)]
    pub minimum_required_path_nodes: Option<u32>,
    #[serde(default)]
    pub path_nodes: Vec<PathfinderPathNode>,
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
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathfinderTestAsset {
    pub fn new(
        id: impl Into<String>,
        source_input_id: impl Into<String>,
        target_input_id: impl Into<String>,
        expected_output: ExpectedOutput,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            source_input_id: source_input_id.into(),
            source_input_name: None,
            source_input_category: None,
            target_input_id: target_input_id.into(),
            target_input_name: None,
            target_input_category: None,
            predicate_id: None,
            predicate_name: None,
            minimum_required_path_nodes: None,
            path_nodes: Vec::new(),
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

    pub fn from_value(value: Value) -> Result<Self, AssetRejection> {
        serde_json::from_value(value).map_err(|e| AssetRejection::SchemaMismatch(e.to_string()))
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Pathfinder assets sharing one source/target pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathfinderTestCase {
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
    pub test_assets: Vec<PathfinderTestAsset>,
    #[serde(default)]
    pub test_case_objective: Option<TestObjectiveEnum>,
    #[serde(default)]
    pub test_case_source: Option<TestSourceEnum>,
    #[serde(default)]
    pub source_input_id: Option<String>,
    #[serde(default)]
    pub source_input_name: Option<String>,
    #[serde(default)]
    pub source_input_category: Option<String>,
    #[serde(default)]
    pub target_input_id: Option<String>,
    #[serde(default)]
    pub target_input_name: Option<String>,
    #[serde(default)]
    pub target_input_category: Option<String>,
    #[serde(default)]
    pub predicate_id: Option<String>,
    #[serde(default)]
    pub predicate_name: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentEnum>,
    #[serde(default)]
    pub test_env: Option<TestEnvEnum>,
}

impl PathfinderTestCase {
    pub fn new(id: impl Into<String>, test_assets: Vec<PathfinderTestAsset>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            test_assets,
            test_case_objective: None,
            test_case_source: None,
            source_input_id: None,
            source_input_name: None,
            source_input_category: None,
            target_input_id: None,
            target_input_name: None,
            target_input_category: None,
            predicate_id: None,
            predicate_name: None,
            components: Vec::new(),
            test_env: None,
        }
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.test_assets.iter().map(|a| a.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Value {
        json!({
            "id": "PF_Asset_1",
            "source_input_id": "MONDO:0005148",
            "source_input_name": "type 2 diabetes",
            "source_input_category": "biolink:Disease",
            "target_input_id": "CHEBI:6801",
            "target_input_name": "metformin",
            "target_input_category": "biolink:ChemicalEntity",
            "predicate_id": "biolink:related_to",
            "predicate_name": "related_to",
            "minimum_required_path_nodes": 1,
            "path_nodes": [{"ids": ["NCBIGene:5468", "UniProtKB:P37231"], "name": "PPARG"}],
            "expected_output": "TopAnswer",
            "test_reference": "https://github.com/NCATSTranslator/Feedback/issues/900"
        })
    }

    #[test]
    fn test_decodes_pathfinder_record() {
        let asset = PathfinderTestAsset::from_value(record()).unwrap();

        assert_eq!(asset.source_input_id, "MONDO:0005148");
        assert_eq!(asset.target_input_name.as_deref(), Some("metformin"));
        assert_eq!(asset.minimum_required_path_nodes, Some(1));
        assert_eq!(asset.path_nodes[0].ids.len(), 2);
        assert_eq!(asset.path_nodes[0].name.as_deref(), Some("PPARG"));
        assert!(asset.extra.is_empty());
    }

    #[test]
    fn test_plain_asset_shape_is_rejected() {
        let err = PathfinderTestAsset::from_value(json!({
            "id": "Asset_1",
            "input_id": "MONDO:0005148",
            "output_id": "CHEBI:6801",
            "expected_output": "TopAnswer"
        }))
        .unwrap_err();
        assert!(matches!(err, AssetRejection::SchemaMismatch(_)));
    }

    #[test]
    fn test_round_trip_keeps_path_nodes() {
        let asset = PathfinderTestAsset::from_value(record()).unwrap();
        let back = PathfinderTestAsset::from_value(serde_json::to_value(&asset).unwrap()).unwrap();
        assert_eq!(back, asset);
    }
}
