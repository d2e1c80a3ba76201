use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssetRejection;

/// Judgment of how good an output is as an answer for the asset's input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpectedOutput {
    TopAnswer,
    Acceptable,
    BadButForgivable,
    NeverShow,
    OverlyGeneric,
}

impl ExpectedOutput {
    pub const ALL: [ExpectedOutput; 5] = [
        ExpectedOutput::TopAnswer,
        ExpectedOutput::Acceptable,
        ExpectedOutput::BadButForgivable,
        ExpectedOutput::NeverShow,
        ExpectedOutput::OverlyGeneric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedOutput::TopAnswer => "TopAnswer",
            ExpectedOutput::Acceptable => "Acceptable",
            ExpectedOutput::BadButForgivable => "BadButForgivable",
            ExpectedOutput::NeverShow => "NeverShow",
            ExpectedOutput::OverlyGeneric => "OverlyGeneric",
        }
    }

    /// Numeric priority used by the spreadsheet spelling (`1_TopAnswer`).
    pub fn priority(&self) -> u8 {
        match self {
            ExpectedOutput::TopAnswer => 1,
            ExpectedOutput::Acceptable => 2,
            ExpectedOutput::BadButForgivable => 3,
            ExpectedOutput::NeverShow => 4,
            ExpectedOutput::OverlyGeneric => 5,
        }
    }
}

impl fmt::Display for ExpectedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpectedOutput {
    type Err = AssetRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpectedOutput::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| AssetRejection::InvalidExpectedOutput(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TestSourceEnum {
    SME,
    SMURF,
    GitHubUserFeedback,
    TACT,
    BenchMark,
    TranslatorTeam,
    TestDataLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TestObjectiveEnum {
    AcceptanceTest,
    BenchmarkTest,
    QuantitativeTest,
    OneHopTest,
    StandardsValidationTest,
    PerformanceTest,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TestPersonaEnum {
    All,
    Clinical,
    LookUp,
    Mechanistic,
    Developer,
}

/// Deployment the test runner targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestEnvEnum {
    Dev,
    Ci,
    Test,
    Prod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentEnum {
    Ars,
    Arax,
    Aragorn,
    Bte,
    Improving,
    Unsecret,
    Cqs,
}
