//! Normalizer
//!
//! Maps free-text sheet fields onto canonical identifiers: relationship
//! phrases to predicates, CURIE prefixes to categories, and prioritized
//! result labels to expected outputs.

pub mod category;
pub mod expected;
pub mod predicate;

pub use category::infer_category;
pub use expected::parse_expected_output;
pub use predicate::{Normalizer, PredicateMapping, PredicateTable};
