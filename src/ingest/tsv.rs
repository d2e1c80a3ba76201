//! TSV Backup Adapter
//!
//! Reads the SMURF asset spreadsheet export (tab-delimited, header row) and
//! turns each row into a normalized [`TestAsset`].

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AssetRejection;
use crate::model::{TestAsset, TestMetadata};
use crate::normalize::{infer_category, parse_expected_output, Normalizer};

/// One spreadsheet row: header name -> cell text.
pub type RawRow = HashMap<String, String>;

pub const ID: &str = "id";
pub const RELATIONSHIP: &str = "Relationship";
pub const SETTINGS: &str = "Settings";
pub const INPUT_ID: &str = "InputID";
pub const INPUT_NAME: &str = "InputName";
pub const OUTPUT_ID: &str = "OutputID";
pub const OUTPUT_NAME: &str = "OutputName";
pub const EXPECTED_RESULT: &str = "Expected Result / Suggested Comparator";
pub const GITHUB_ISSUE: &str = "Translator GitHubIssue";
pub const WELL_KNOWN: &str = "Well Known";

/// Parse tab-delimited text with a header row.
///
/// Cells are matched to headers by position. Rows shorter than the header
/// simply lack the trailing fields; unreadable rows are logged and skipped.
pub fn parse_tsv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read TSV header row")?.clone();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, cell)| (header.to_string(), cell.to_string()))
                    .collect(),
            ),
            Err(e) => warn!("Skipping unreadable TSV row {}: {}", idx, e),
        }
    }
    Ok(rows)
}

pub fn read_tsv(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open TSV file {}", path.display()))?;
    parse_tsv(file)
}

fn field<'a>(row: &'a RawRow, name: &'static str) -> Result<&'a str, AssetRejection> {
    row.get(name)
        .map(String::as_str)
        .ok_or(AssetRejection::MissingField(name))
}

fn trimmed<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(|v| v.trim()).unwrap_or_default()
}

/// Build one asset from a spreadsheet row.
pub fn create_test_asset(row: &RawRow, normalizer: &Normalizer) -> Result<TestAsset, AssetRejection> {
    let relationship = field(row, RELATIONSHIP)?.trim().to_lowercase();
    let mapping = normalizer.convert_predicate(&relationship);

    let expected_output = parse_expected_output(row.get(EXPECTED_RESULT).map(String::as_str))?;

    let id = field(row, ID)?.replace(':', "_");
    let input_id = field(row, INPUT_ID)?.trim();
    let output_id = field(row, OUTPUT_ID)?.trim();
    let input_name = trimmed(row, INPUT_NAME);
    let output_name = trimmed(row, OUTPUT_NAME);

    let chemical_prefixes = normalizer.chemical_prefixes();
    let summary = format!("{}: {} {} {}", expected_output, output_name, relationship, input_name);
    let test_reference = Some(trimmed(row, GITHUB_ISSUE))
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let mut asset = TestAsset::new(id, input_id, mapping.predicate_name.clone(), output_id, expected_output);
    asset.name = Some(summary.clone());
    asset.description = Some(summary);
    asset.input_name = Some(input_name.to_string());
    asset.output_name = Some(output_name.to_string());
    asset.input_category = infer_category(input_id, chemical_prefixes).map(str::to_string);
    asset.output_category = infer_category(output_id, chemical_prefixes).map(str::to_string);
    asset.test_metadata = Some(TestMetadata::smurf_acceptance(None, test_reference));
    asset.test_runner_settings = vec![row.get(SETTINGS).map(|s| s.to_lowercase()).unwrap_or_default()];
    asset.qualifiers = mapping.qualifiers();
    asset.well_known = Some(row.get(WELL_KNOWN).is_some_and(|v| v == "yes"));
    Ok(asset)
}

/// Convert every usable row. Rows without a relationship, input or output
/// are skipped; rows failing validation are logged and dropped.
pub fn build_test_assets(rows: &[RawRow], normalizer: &Normalizer) -> Vec<TestAsset> {
    let mut seen = HashSet::new();
    let mut assets = Vec::new();

    for row in rows {
        let row_id = trimmed(row, ID);
        let blank = |name: &str| row.get(name).map_or(true, |v| v.is_empty());
        if blank(RELATIONSHIP) || blank(OUTPUT_ID) || blank(INPUT_ID) {
            info!("Skipping row with missing relationship, input or output ID: {}", row_id);
            continue;
        }

        match create_test_asset(row, normalizer) {
            Ok(asset) => {
                if !seen.insert(asset.id.clone()) {
                    warn!("Got duplicate asset id {}", asset.id);
                }
                assets.push(asset);
            }
            Err(e) => warn!("Asset id {} dropped: {}", row_id, e),
        }
    }
    assets
}

/// Order assets by the integer following the first `_` of their id
/// (`Asset_2` before `Asset_10`). Ids without one keep their order, last.
pub fn sort_by_numeric_suffix(assets: &mut [TestAsset]) {
    assets.sort_by_key(|asset| {
        let n = asset
            .id
            .split('_')
            .nth(1)
            .and_then(|suffix| suffix.parse::<u64>().ok());
        (n.is_none(), n)
    });
}
