//! Test Data Model
//!
//! Record shapes shared by every generator: assets, cases and suites,
//! serialized with the canonical schema field names.

pub mod asset;
pub mod case;
pub mod enums;
pub mod pathfinder;
pub mod suite;

pub use asset::{Qualifier, TestAsset, TestMetadata};
pub use case::TestCase;
pub use enums::{
    ComponentEnum, ExpectedOutput, TestEnvEnum, TestObjectiveEnum, TestPersonaEnum, TestSourceEnum,
};
pub use pathfinder::{PathfinderPathNode, PathfinderTestAsset, PathfinderTestCase};
pub use suite::TestSuite;

/// Anything that is written to `<dir>/<id>.json`.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for TestAsset {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for TestCase {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for PathfinderTestAsset {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for PathfinderTestCase {
    fn id(&self) -> &str {
        &self.id
    }
}

impl<C> Identified for TestSuite<C> {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Records carrying an expected-output label.
pub trait Labelled {
    fn expected_output(&self) -> ExpectedOutput;
}

impl Labelled for TestAsset {
    fn expected_output(&self) -> ExpectedOutput {
        self.expected_output
    }
}

impl Labelled for PathfinderTestAsset {
    fn expected_output(&self) -> ExpectedOutput {
        self.expected_output
    }
}
