//! Translator Test Suite Generators
//!
//! Batch tools that turn test-asset sources into the shared test schema:
//! - Source adapters for TSV backups, zipped test repositories, GitHub
//!   issues and asset file URLs
//! - Predicate, category and expected-output normalization
//! - Grouping of assets into test cases and assembly into suites
//! - JSON output, one file per record

pub mod config;
pub mod error;
pub mod group;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod performance;
pub mod suite;
pub mod utils;
pub mod writer;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use group::{group_pathfinder_test_cases, group_test_cases};
pub use model::{TestAsset, TestCase, TestSuite};
pub use normalize::Normalizer;
pub use suite::{assemble_pathfinder_suite, assemble_suite, ExpectedOutputFilter, SuiteSpec};
pub use writer::{dump_to_json, JsonWriter};
