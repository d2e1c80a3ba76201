//! Suite Assembler
//!
//! Wraps grouped test cases into a named suite. Filtering happens on the
//! assets before grouping, so a case exists only if one of its assets
//! survived the filter.

use indexmap::IndexMap;
use tracing::info;

use crate::group::{group_pathfinder_test_cases, group_test_cases};
use crate::model::{
    ExpectedOutput, Labelled, PathfinderTestAsset, PathfinderTestCase, TestAsset, TestEnvEnum, TestMetadata,
    TestObjectiveEnum, TestPersonaEnum, TestSourceEnum, TestSuite,
};

/// Suite-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub persona: TestPersonaEnum,
    pub source: TestSourceEnum,
    pub objective: TestObjectiveEnum,
    pub test_env: TestEnvEnum,
}

impl SuiteSpec {
    /// SMURF acceptance suite for everyone, where the name is the id.
    pub fn acceptance(id: impl Into<String>, description: impl Into<String>, test_env: TestEnvEnum) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: description.into(),
            persona: TestPersonaEnum::All,
            source: TestSourceEnum::SMURF,
            objective: TestObjectiveEnum::AcceptanceTest,
            test_env,
        }
    }

    fn metadata(&self) -> TestMetadata {
        TestMetadata {
            id: "1".to_string(),
            name: None,
            description: Some(self.description.clone()),
            test_source: Some(self.source),
            test_reference: None,
            test_objective: Some(self.objective),
        }
    }
}

/// Keeps assets whose expected output is one of a fixed set of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedOutputFilter {
    keep: Vec<ExpectedOutput>,
}

impl ExpectedOutputFilter {
    pub fn only(keep: impl IntoIterator<Item = ExpectedOutput>) -> Self {
        Self {
            keep: keep.into_iter().collect(),
        }
    }

    pub fn matches<T: Labelled>(&self, record: &T) -> bool {
        self.keep.contains(&record.expected_output())
    }

    pub fn labels(&self) -> &[ExpectedOutput] {
        &self.keep
    }
}

impl<C> TestSuite<C> {
    pub fn from_cases(spec: &SuiteSpec, test_cases: IndexMap<String, C>) -> Self {
        Self {
            id: spec.id.clone(),
            name: Some(spec.name.clone()),
            description: Some(spec.description.clone()),
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            test_metadata: Some(spec.metadata()),
            test_persona: Some(spec.persona),
            test_cases,
            test_suite_specification: None,
        }
    }

    /// Suite with only an id, a name and its cases; no metadata or persona.
    pub fn named(id: impl Into<String>, name: impl Into<String>, test_cases: IndexMap<String, C>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            description: None,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            test_metadata: None,
            test_persona: None,
            test_cases,
            test_suite_specification: None,
        }
    }
}

fn select<T: Labelled + Clone>(records: &[T], filter: Option<&ExpectedOutputFilter>) -> Vec<T> {
    match filter {
        Some(filter) => records.iter().filter(|r| filter.matches(*r)).cloned().collect(),
        None => records.to_vec(),
    }
}

/// Filter, group and wrap `assets` into a suite.
pub fn assemble_suite(spec: &SuiteSpec, assets: &[TestAsset], filter: Option<&ExpectedOutputFilter>) -> TestSuite {
    let selected = select(assets, filter);

    let test_cases = group_test_cases(&selected, spec.test_env);
    info!(
        "Assembled suite {} from {} of {} assets into {} test cases",
        spec.id,
        selected.len(),
        assets.len(),
        test_cases.len()
    );
    TestSuite::from_cases(spec, test_cases)
}

/// Same as [`assemble_suite`] for pathfinder assets, grouped by
/// source/target pair.
pub fn assemble_pathfinder_suite(
    spec: &SuiteSpec,
    assets: &[PathfinderTestAsset],
    filter: Option<&ExpectedOutputFilter>,
) -> TestSuite<PathfinderTestCase> {
    let selected = select(assets, filter);

    let test_cases = group_pathfinder_test_cases(&selected, spec.test_env);
    info!(
        "Assembled pathfinder suite {} from {} of {} assets into {} test cases",
        spec.id,
        selected.len(),
        assets.len(),
        test_cases.len()
    );
    TestSuite::from_cases(spec, test_cases)
}
