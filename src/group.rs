//! Grouper
//!
//! Partitions test assets into test cases keyed by
//! `(input_id, predicate_name, qualifier values)`, and pathfinder assets
//! into cases keyed by `(source_input_id, target_input_id)`.

use indexmap::IndexMap;
use tracing::debug;

use crate::model::{
    ComponentEnum, PathfinderTestAsset, PathfinderTestCase, Qualifier, TestAsset, TestCase, TestEnvEnum,
    TestObjectiveEnum,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    input_id: String,
    predicate_name: String,
    qualifier_key: String,
}

impl GroupKey {
    fn of(asset: &TestAsset) -> Self {
        Self {
            input_id: asset.input_id.clone(),
            predicate_name: asset.predicate_name.clone(),
            qualifier_key: asset.qualifier_key(),
        }
    }
}

/// Group assets into cases `TestCase_0`, `TestCase_1`, ... in the order each
/// key first appears.
pub fn group_test_cases(assets: &[TestAsset], test_env: TestEnvEnum) -> IndexMap<String, TestCase> {
    let mut groups: IndexMap<GroupKey, Vec<TestAsset>> = IndexMap::new();
    for asset in assets {
        groups.entry(GroupKey::of(asset)).or_default().push(asset.clone());
    }

    let test_cases: IndexMap<String, TestCase> = groups
        .into_iter()
        .enumerate()
        .filter(|(_, (_, members))| !members.is_empty())
        .map(|(idx, (key, members))| {
            let case = build_case(format!("TestCase_{}", idx), &key, members, test_env);
            (case.id.clone(), case)
        })
        .collect();

    debug!("Grouped {} assets into {} test cases", assets.len(), test_cases.len());
    test_cases
}

fn build_case(id: String, key: &GroupKey, members: Vec<TestAsset>, test_env: TestEnvEnum) -> TestCase {
    let description = members
        .iter()
        .map(TestAsset::description_or_empty)
        .collect::<Vec<_>>()
        .join("; ");

    // Shared fields are folded over the members; every member overwrites the
    // previous one, so the last member wins when they disagree.
    let shared = members.iter().fold(SharedFields::default(), |_, asset| SharedFields {
        input_id: asset.input_id.clone(),
        predicate_name: asset.predicate_name.clone(),
        qualifiers: asset.qualifiers.clone(),
        input_category: asset.input_category.clone(),
        output_category: asset.output_category.clone(),
    });

    let mut case = TestCase::new(id, members);
    case.name = Some(format!("what {} {}", key.predicate_name, key.input_id));
    case.description = Some(description);
    case.test_env = Some(test_env);
    case.components = vec![ComponentEnum::Ars];
    case.test_case_objective = Some(TestObjectiveEnum::AcceptanceTest);
    case.test_runner_settings = vec!["inferred".to_string()];
    case.test_case_predicate_id = Some(format!("biolink:{}", shared.predicate_name));
    case.test_case_predicate_name = Some(shared.predicate_name);
    case.test_case_input_id = Some(shared.input_id);
    case.qualifiers = shared.qualifiers;
    case.input_category = shared.input_category;
    case.output_category = shared.output_category;
    case
}

#[derive(Default)]
struct SharedFields {
    input_id: String,
    predicate_name: String,
    qualifiers: Option<Vec<Qualifier>>,
    input_category: Option<String>,
    output_category: Option<String>,
}

/// Group pathfinder assets by source/target pair into `TestCase_<n>` cases,
/// numbered in first-occurrence order.
pub fn group_pathfinder_test_cases(
    assets: &[PathfinderTestAsset],
    test_env: TestEnvEnum,
) -> IndexMap<String, PathfinderTestCase> {
    let mut groups: IndexMap<(String, String), Vec<PathfinderTestAsset>> = IndexMap::new();
    for asset in assets {
        groups
            .entry((asset.source_input_id.clone(), asset.target_input_id.clone()))
            .or_default()
            .push(asset.clone());
    }

    let test_cases: IndexMap<String, PathfinderTestCase> = groups
        .into_iter()
        .enumerate()
        .map(|(idx, ((source, target), members))| {
            let case = build_pathfinder_case(format!("TestCase_{}", idx), &source, &target, members, test_env);
            (case.id.clone(), case)
        })
        .collect();

    debug!("Grouped {} pathfinder assets into {} test cases", assets.len(), test_cases.len());
    test_cases
}

fn build_pathfinder_case(
    id: String,
    source: &str,
    target: &str,
    members: Vec<PathfinderTestAsset>,
    test_env: TestEnvEnum,
) -> PathfinderTestCase {
    let description = members
        .iter()
        .map(PathfinderTestAsset::description_or_empty)
        .collect::<Vec<_>>()
        .join("; ");

    // Same last-member-wins fold as the standard cases.
    let last = members.last().cloned();

    let mut case = PathfinderTestCase::new(id, members);
    case.name = Some(format!("what paths connect {} and {}", source, target));
    case.description = Some(description);
    case.test_env = Some(test_env);
    case.components = vec![ComponentEnum::Ars];
    case.test_case_objective = Some(TestObjectiveEnum::AcceptanceTest);
    case.test_runner_settings = vec!["inferred".to_string()];
    case.source_input_id = Some(source.to_string());
    case.target_input_id = Some(target.to_string());
    if let Some(last) = last {
        case.source_input_name = last.source_input_name;
        case.source_input_category = last.source_input_category;
        case.target_input_name = last.target_input_name;
        case.target_input_category = last.target_input_category;
        case.predicate_id = last.predicate_id;
        case.predicate_name = last.predicate_name;
    }
    case
}

/// Wrap every asset in its own case, numbered `TestCase:1`, `TestCase:2`, ...
pub fn cases_per_asset(assets: Vec<TestAsset>) -> IndexMap<String, TestCase> {
    assets
        .into_iter()
        .enumerate()
        .map(|(n, asset)| {
            let id = format!("TestCase:{}", n + 1);
            (id.clone(), TestCase::new(id, vec![asset]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpectedOutput;

    fn asset(id: &str, input: &str, predicate: &str, description: &str) -> TestAsset {
        let mut a = TestAsset::new(id, input, predicate, "CHEBI:1", ExpectedOutput::TopAnswer);
        a.description = Some(description.to_string());
        a
    }

    #[test]
    fn test_empty_input_gives_empty_mapping() {
        assert!(group_test_cases(&[], TestEnvEnum::Ci).is_empty());
    }

    #[test]
    fn test_ids_follow_first_occurrence() {
        let assets = vec![
            asset("Asset_1", "MONDO:1", "treats", "a"),
            asset("Asset_2", "MONDO:2", "treats", "b"),
            asset("Asset_3", "MONDO:1", "treats", "c"),
            asset("Asset_4", "MONDO:1", "affects", "d"),
        ];

        let cases = group_test_cases(&assets, TestEnvEnum::Ci);
        let ids: Vec<_> = cases.keys().cloned().collect();
        assert_eq!(ids, vec!["TestCase_0", "TestCase_1", "TestCase_2"]);

        let first = &cases["TestCase_0"];
        assert_eq!(first.asset_ids().collect::<Vec<_>>(), vec!["Asset_1", "Asset_3"]);
        assert_eq!(first.description.as_deref(), Some("a; c"));
        assert_eq!(first.name.as_deref(), Some("what treats MONDO:1"));
        assert_eq!(first.test_case_predicate_id.as_deref(), Some("biolink:treats"));
        assert_eq!(first.test_env, Some(TestEnvEnum::Ci));
        assert_eq!(first.components, vec![ComponentEnum::Ars]);
        assert_eq!(first.test_runner_settings, vec!["inferred"]);

        assert_eq!(cases["TestCase_2"].test_case_predicate_name.as_deref(), Some("affects"));
    }

    #[test]
    fn test_qualifier_values_split_groups() {
        let mut up = asset("Asset_1", "NCBIGene:1", "affects", "up");
        up.qualifiers = Some(vec![Qualifier::new("biolink_object_direction_qualifier", "increased")]);
        let mut down = asset("Asset_2", "NCBIGene:1", "affects", "down");
        down.qualifiers = Some(vec![Qualifier::new("biolink_object_direction_qualifier", "decreased")]);

        let cases = group_test_cases(&[up, down], TestEnvEnum::Prod);
        assert_eq!(cases.len(), 2);
        for case in cases.values() {
            assert_eq!(case.test_assets.len(), 1);
        }
    }

    #[test]
    fn test_shared_fields_come_from_last_member() {
        let mut first = asset("Asset_1", "MONDO:1", "treats", "a");
        first.output_category = Some("biolink:Gene".to_string());
        let mut last = asset("Asset_2", "MONDO:1", "treats", "b");
        last.output_category = Some("biolink:ChemicalEntity".to_string());

        let cases = group_test_cases(&[first, last], TestEnvEnum::Ci);
        assert_eq!(
            cases["TestCase_0"].output_category.as_deref(),
            Some("biolink:ChemicalEntity")
        );
    }

    fn pathfinder(id: &str, source: &str, target: &str, target_name: &str) -> PathfinderTestAsset {
        let mut a = PathfinderTestAsset::new(id, source, target, ExpectedOutput::TopAnswer);
        a.description = Some(format!("{} via PPARG", target_name));
        a.target_input_name = Some(target_name.to_string());
        a.predicate_name = Some("related_to".to_string());
        a
    }

    #[test]
    fn test_pathfinder_groups_by_source_and_target() {
        let assets = vec![
            pathfinder("PF_1", "MONDO:0005148", "CHEBI:6801", "metformin"),
            pathfinder("PF_2", "MONDO:0005148", "CHEBI:5441", "glipizide"),
            pathfinder("PF_3", "MONDO:0005148", "CHEBI:6801", "Metformin"),
        ];

        let cases = group_pathfinder_test_cases(&assets, TestEnvEnum::Ci);
        let ids: Vec<_> = cases.keys().cloned().collect();
        assert_eq!(ids, vec!["TestCase_0", "TestCase_1"]);

        let first = &cases["TestCase_0"];
        assert_eq!(first.asset_ids().collect::<Vec<_>>(), vec!["PF_1", "PF_3"]);
        assert_eq!(first.name.as_deref(), Some("what paths connect MONDO:0005148 and CHEBI:6801"));
        assert_eq!(first.description.as_deref(), Some("metformin via PPARG; Metformin via PPARG"));
        assert_eq!(first.target_input_name.as_deref(), Some("Metformin"));
        assert_eq!(first.predicate_name.as_deref(), Some("related_to"));
        assert_eq!(first.test_env, Some(TestEnvEnum::Ci));
        assert_eq!(first.components, vec![ComponentEnum::Ars]);

        assert!(group_pathfinder_test_cases(&[], TestEnvEnum::Ci).is_empty());
    }

    #[test]
    fn test_cases_per_asset_numbering() {
        let cases = cases_per_asset(vec![
            asset("Asset_1", "MONDO:1", "treats", "a"),
            asset("Asset_2", "MONDO:1", "treats", "b"),
        ]);
        let ids: Vec<_> = cases.keys().cloned().collect();
        assert_eq!(ids, vec!["TestCase:1", "TestCase:2"]);
        assert_eq!(cases["TestCase:2"].test_assets[0].id, "Asset_2");
    }
}
