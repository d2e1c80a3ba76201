//! Performance Suite Generator
//!
//! Builds load-test cases for every knowledge provider (KP) in a backup
//! file, plus fixed ARA and ARS cases, at a grid of query counts and curie
//! batch sizes.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::model::{Identified, TestPersonaEnum};

pub const SUITE_ID: &str = "performance_tests";

/// `(number of queries, curies per query)` for sequential KP runs.
const KP_SEQUENTIAL_RATES: [(u32, usize); 4] = [(900, 1), (180, 10), (90, 100), (30, 1000)];
const KP_CONCURRENT_RATES: [(u32, usize); 9] = [
    (10, 1),
    (100, 1),
    (1000, 1),
    (10, 10),
    (100, 10),
    (1000, 10),
    (10, 1000),
    (100, 1000),
    (1000, 1000),
];
const ARA_ARS_SEQUENTIAL_QUERIES: u32 = 15;
const ARA_ARS_CONCURRENT_QUERIES: [u32; 4] = [10, 50, 100, 1000];

/// One KP entry of the backup file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpQuery {
    pub infores: String,
    pub query: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceTestCase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub test_runner_settings: Vec<String>,
    pub query: Value,
    pub num_queries: u32,
    pub concurrent: bool,
    pub components: Vec<String>,
}

impl PerformanceTestCase {
    fn new(id: String, name: String, query: Value, num_queries: u32, concurrent: bool, component: &str) -> Self {
        Self {
            id,
            description: name.clone(),
            name,
            tags: Vec::new(),
            test_runner_settings: Vec::new(),
            query,
            num_queries,
            concurrent,
            components: vec![component.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceTestSuite {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub test_runner_settings: Vec<String>,
    pub test_metadata: Map<String, Value>,
    pub test_persona: TestPersonaEnum,
    pub test_suite_specification: Option<Value>,
    pub test_cases: IndexMap<String, PerformanceTestCase>,
}

impl Identified for PerformanceTestSuite {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Read the KP backup, keeping the file's entry order.
pub fn load_kp_backup(path: impl AsRef<Path>) -> Result<IndexMap<String, KpQuery>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read KP backup {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse KP backup {}", path.display()))
}

/// Copy of `query` with every node's `ids` cut to `num_curies` and the
/// cache bypassed.
pub fn generate_message(query: &Value, num_curies: usize) -> Value {
    let mut query = query.clone();
    if let Some(nodes) = query
        .pointer_mut("/message/query_graph/nodes")
        .and_then(Value::as_object_mut)
    {
        for node in nodes.values_mut() {
            if let Some(ids) = node.get_mut("ids").and_then(Value::as_array_mut) {
                ids.truncate(num_curies);
            }
        }
    }
    if let Some(object) = query.as_object_mut() {
        object.insert("bypass_cache".to_string(), Value::Bool(true));
    }
    query
}

/// The "what treats type 2 diabetes" creative query sent to ARAs and the ARS.
pub fn creative_query() -> Value {
    json!({
        "message": {
            "query_graph": {
                "nodes": {
                    "ON": {
                        "categories": ["biolink:Disease"],
                        "ids": ["MONDO:0005301"]
                    },
                    "SN": {
                        "categories": ["biolink:ChemicalEntity"]
                    }
                },
                "edges": {
                    "t_edge": {
                        "object": "ON",
                        "subject": "SN",
                        "predicates": ["biolink:treats"],
                        "knowledge_type": "inferred"
                    }
                }
            }
        },
        "bypass_cache": true
    })
}

pub fn build_performance_suite(kps: &IndexMap<String, KpQuery>) -> PerformanceTestSuite {
    let mut cases: Vec<PerformanceTestCase> = Vec::new();

    for (num_queries, num_curies) in KP_SEQUENTIAL_RATES {
        for kp in kps.values() {
            cases.push(PerformanceTestCase::new(
                format!("{}_sequential_{}x{}", kp.infores, num_queries, num_curies),
                format!("[{}] {} Sequential {} curie queries", kp.infores, num_queries, num_curies),
                generate_message(&kp.query, num_curies),
                num_queries,
                false,
                &kp.infores,
            ));
        }
    }

    for (num_queries, num_curies) in KP_CONCURRENT_RATES {
        for kp in kps.values() {
            cases.push(PerformanceTestCase::new(
                format!("{}_concurrent_{}x{}", kp.infores, num_queries, num_curies),
                format!("[{}] {} Concurrent {} curie queries", kp.infores, num_queries, num_curies),
                generate_message(&kp.query, num_curies),
                num_queries,
                true,
                &kp.infores,
            ));
        }
    }

    let creative = creative_query();
    cases.push(PerformanceTestCase::new(
        "ara_sequential_tests".to_string(),
        "Sequential ARA Performance Tests".to_string(),
        creative.clone(),
        ARA_ARS_SEQUENTIAL_QUERIES,
        false,
        "ara",
    ));
    for rate in ARA_ARS_CONCURRENT_QUERIES {
        cases.push(PerformanceTestCase::new(
            format!("ara_{}_concurrent_tests", rate),
            format!("{} Concurrent ARA Performance Tests", rate),
            creative.clone(),
            rate,
            true,
            "ara",
        ));
    }

    cases.push(PerformanceTestCase::new(
        "ars_sequential_tests".to_string(),
        "Sequential ARS Performance Tests".to_string(),
        creative.clone(),
        ARA_ARS_SEQUENTIAL_QUERIES,
        false,
        "ars",
    ));
    for rate in ARA_ARS_CONCURRENT_QUERIES {
        cases.push(PerformanceTestCase::new(
            format!("ars_{}_concurrent_tests", rate),
            "Concurrent ARS Performance Tests".to_string(),
            creative.clone(),
            rate,
            true,
            "ars",
        ));
    }

    PerformanceTestSuite {
        id: SUITE_ID.to_string(),
        name: "Performance Tests".to_string(),
        description: "Performance Tests".to_string(),
        tags: Vec::new(),
        test_runner_settings: Vec::new(),
        test_metadata: Map::new(),
        test_persona: TestPersonaEnum::Developer,
        test_suite_specification: None,
        test_cases: cases.into_iter().map(|c| (c.id.clone(), c)).collect(),
    }
}
