use std::io::{Cursor, Write};

use serde_json::json;
use tempfile::tempdir;
use translator_testgen::group::cases_per_asset;
use translator_testgen::ingest::archive::read_archive_assets;
use translator_testgen::ingest::remote::{decode_assets, AssetFormat};
use translator_testgen::ingest::tsv;
use translator_testgen::model::{ExpectedOutput, PathfinderTestAsset, PathfinderTestCase, TestAsset, TestEnvEnum, TestSuite};
use translator_testgen::normalize::PredicateTable;
use translator_testgen::{
    assemble_pathfinder_suite, assemble_suite, group_test_cases, ExpectedOutputFilter, JsonWriter, Normalizer,
    SuiteSpec, TestCase,
};
use zip::write::SimpleFileOptions;

const HEADER: &str = "id\tRelationship\tSettings\tInputID\tInputName\tOutputID\tOutputName\tExpected Result / Suggested Comparator\tTranslator GitHubIssue\tWell Known";

fn backup() -> String {
    [
        HEADER,
        "Asset:10\ttreats\tInferred\tMONDO:0005148\ttype 2 diabetes\tCHEBI:6801\tmetformin\t1_TopAnswer\thttps://github.com/NCATSTranslator/Feedback/issues/1\tyes",
        "Asset:2\ttreats\tInferred\tMONDO:0005148\ttype 2 diabetes\tCHEBI:15365\taspirin\t4_NeverShow\t\tno",
        "Asset:3\tincreases activity of\tInferred\tNCBIGene:3630\tINS\tCHEBI:6801\tmetformin\t1_TopAnswer\t\t",
        "Asset:4\t\tInferred\tMONDO:0005148\ttype 2 diabetes\tCHEBI:6801\tmetformin\t1_TopAnswer\t\t",
        "Asset:5\ttreats\tInferred\tMONDO:0004975\tAlzheimer disease\tCHEBI:6801\tmetformin\tTopAnswer\t\t",
    ]
    .join("\n")
}

fn normalizer() -> Normalizer {
    Normalizer::new(PredicateTable::builtin().unwrap())
}

fn member_ids(case: &TestCase) -> Vec<&str> {
    case.asset_ids().collect()
}

#[test]
fn test_tsv_backup_to_grouped_cases() {
    let rows = tsv::parse_tsv(backup().as_bytes()).unwrap();
    assert_eq!(rows.len(), 5);

    let mut assets = tsv::build_test_assets(&rows, &normalizer());
    tsv::sort_by_numeric_suffix(&mut assets);

    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["Asset_2", "Asset_3", "Asset_10"]);

    let qualified = &assets[1];
    assert_eq!(qualified.predicate_name, "affects");
    assert_eq!(qualified.input_category.as_deref(), Some("biolink:Gene"));
    assert_eq!(qualified.qualifiers.as_ref().map(Vec::len), Some(3));

    let cases = group_test_cases(&assets, TestEnvEnum::Ci);
    let case_ids: Vec<&str> = cases.keys().map(String::as_str).collect();
    assert_eq!(case_ids, ["TestCase_0", "TestCase_1"]);

    let treats = &cases["TestCase_0"];
    assert_eq!(member_ids(treats), ["Asset_2", "Asset_10"]);
    assert_eq!(treats.name.as_deref(), Some("what treats MONDO:0005148"));
    assert_eq!(treats.test_case_predicate_id.as_deref(), Some("biolink:treats"));
    assert_eq!(treats.input_category.as_deref(), Some("biolink:Disease"));
    assert_eq!(treats.test_env, Some(TestEnvEnum::Ci));

    let affects = &cases["TestCase_1"];
    assert_eq!(member_ids(affects), ["Asset_3"]);
    assert_eq!(affects.qualifiers, qualified.qualifiers);
}

#[tokio::test]
async fn test_filtered_suite_written_and_read_back() {
    let rows = tsv::parse_tsv(backup().as_bytes()).unwrap();
    let mut assets = tsv::build_test_assets(&rows, &normalizer());
    tsv::sort_by_numeric_suffix(&mut assets);

    let spec = SuiteSpec::acceptance("sprint_4_tests", "Sprint 4 TopAnswer tests", TestEnvEnum::Ci);
    let filter = ExpectedOutputFilter::only([ExpectedOutput::TopAnswer]);
    let suite = assemble_suite(&spec, &assets, Some(&filter));

    // The NeverShow asset is dropped before grouping, so numbering restarts
    // from the gene case.
    assert_eq!(suite.case_ids().collect::<Vec<_>>(), ["TestCase_0", "TestCase_1"]);
    assert_eq!(member_ids(&suite.test_cases["TestCase_0"]), ["Asset_3"]);
    assert_eq!(member_ids(&suite.test_cases["TestCase_1"]), ["Asset_10"]);
    assert_eq!(suite.asset_count(), 2);

    let dir = tempdir().unwrap();
    let path = JsonWriter::new(dir.path()).write(&suite).await.unwrap();
    assert_eq!(path, dir.path().join("sprint_4_tests.json"));

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(text.contains("\n    \"id\": \"sprint_4_tests\""));

    let decoded: TestSuite = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, suite);
}

#[test]
fn test_archive_assets_grouped_into_suite() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let files = [
        ("Tests-main/test_assets/Asset_1.json", "MONDO:0005301", "TopAnswer"),
        ("Tests-main/test_assets/Asset_2.json", "MONDO:0005301", "OverlyGeneric"),
        ("Tests-main/test_assets/Asset_3.json", "MONDO:0005301", "NeverShow"),
        ("Tests-main/test_cases/TestCase_1.json", "MONDO:0005301", "TopAnswer"),
    ];
    for (name, input, label) in files {
        let id = name.rsplit('/').next().unwrap().trim_end_matches(".json");
        let body = json!({
            "id": id,
            "input_id": input,
            "predicate_name": "treats",
            "output_id": "CHEBI:6801",
            "expected_output": label
        });
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body.to_string().as_bytes()).unwrap();
    }
    let bytes = writer.finish().unwrap().into_inner();

    let filter = ExpectedOutputFilter::only([ExpectedOutput::TopAnswer, ExpectedOutput::NeverShow]);
    let assets: Vec<TestAsset> = read_archive_assets(&bytes, Some(&filter)).unwrap();
    assert_eq!(assets.len(), 2);

    let spec = SuiteSpec::acceptance("sprint_6_tests", "Sprint 6 tests", TestEnvEnum::Ci);
    let suite = assemble_suite(&spec, &assets, None);
    assert_eq!(suite.test_cases.len(), 1);
    assert_eq!(member_ids(&suite.test_cases["TestCase_0"]), ["Asset_1", "Asset_3"]);
}

#[test]
fn test_remote_document_one_case_per_asset() {
    let text = json!([
        {"id": "Asset_1", "input_id": "MONDO:1", "predicate_name": "treats", "output_id": "CHEBI:1", "expected_output": "TopAnswer"},
        {"id": "Asset_2", "input_id": "MONDO:1", "predicate_name": "treats", "output_id": "CHEBI:2", "expected_output": "Acceptable"},
        {"id": "Asset_3", "input_id": "MONDO:1", "output_id": "CHEBI:3"}
    ])
    .to_string();

    let assets = decode_assets(&text, AssetFormat::Json).unwrap();
    assert_eq!(assets.len(), 2);

    let cases = cases_per_asset(assets);
    assert_eq!(cases.keys().collect::<Vec<_>>(), ["TestCase:1", "TestCase:2"]);
    assert_eq!(member_ids(&cases["TestCase:2"]), ["Asset_2"]);
}

#[tokio::test]
async fn test_pathfinder_archive_to_suite_and_cases() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let files = [
        ("Tests-more_pathfinder/pathfinder_test_assets/PF_Asset_1.json", "CHEBI:6801", "TopAnswer"),
        ("Tests-more_pathfinder/pathfinder_test_assets/PF_Asset_2.json", "CHEBI:6801", "NeverShow"),
        ("Tests-more_pathfinder/pathfinder_test_assets/PF_Asset_3.json", "CHEBI:5441", "OverlyGeneric"),
    ];
    for (name, target, label) in files {
        let id = name.rsplit('/').next().unwrap().trim_end_matches(".json");
        let body = json!({
            "id": id,
            "source_input_id": "MONDO:0005148",
            "source_input_name": "type 2 diabetes",
            "target_input_id": target,
            "predicate_name": "related_to",
            "minimum_required_path_nodes": 1,
            "path_nodes": [{"ids": ["NCBIGene:5468"], "name": "PPARG"}],
            "expected_output": label
        });
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(body.to_string().as_bytes()).unwrap();
    }
    let bytes = writer.finish().unwrap().into_inner();

    let filter = ExpectedOutputFilter::only([
        ExpectedOutput::TopAnswer,
        ExpectedOutput::Acceptable,
        ExpectedOutput::BadButForgivable,
        ExpectedOutput::NeverShow,
    ]);
    let assets: Vec<PathfinderTestAsset> = read_archive_assets(&bytes, Some(&filter)).unwrap();
    assert_eq!(assets.len(), 2);

    let spec = SuiteSpec::acceptance("pathfinder_tests", "Pathfinder tests", TestEnvEnum::Ci);
    let suite = assemble_pathfinder_suite(&spec, &assets, None);
    assert_eq!(suite.test_cases.len(), 1);

    let dir = tempdir().unwrap();
    let cases_dir = dir.path().join("pathfinder_test_cases");
    let written = JsonWriter::new(&cases_dir).write_all(suite.test_cases.values()).await.unwrap();
    assert_eq!(written, 1);

    let text = tokio::fs::read_to_string(cases_dir.join("TestCase_0.json")).await.unwrap();
    let case: PathfinderTestCase = serde_json::from_str(&text).unwrap();
    assert_eq!(case.source_input_id.as_deref(), Some("MONDO:0005148"));
    assert_eq!(case.asset_ids().collect::<Vec<_>>(), ["PF_Asset_1", "PF_Asset_2"]);
    assert_eq!(case.test_assets[0].path_nodes[0].ids, ["NCBIGene:5468"]);
}
