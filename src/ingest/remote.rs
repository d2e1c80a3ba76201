//! Asset File Adapter
//!
//! Loads schema-shaped test assets from a URL whose extension names the
//! format: `tsv`, `json` or `yaml`.

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::fetch_bytes;
use super::tsv::parse_tsv;
use crate::error::IngestError;
use crate::model::TestAsset;

/// Fields holding lists; TSV cells separate their items with `|`.
const LIST_FIELDS: &[&str] = &["tags", "test_runner_settings"];
const BOOL_FIELDS: &[&str] = &["in_v1", "well_known"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    Tsv,
    Json,
    Yaml,
}

impl AssetFormat {
    /// The format is whatever follows the last `.` of the URL.
    pub fn from_url(url: &str) -> Result<Self, IngestError> {
        let extension = url.rsplit('.').next().unwrap_or_default();
        match extension {
            "tsv" => Ok(AssetFormat::Tsv),
            "json" => Ok(AssetFormat::Json),
            "yaml" => Ok(AssetFormat::Yaml),
            other => Err(IngestError::UnknownFormat(other.to_string())),
        }
    }
}

/// Accept only absolute URLs with both a scheme and a host.
pub fn validate_url(raw: &str) -> Result<Url, IngestError> {
    let url = Url::parse(raw).map_err(|_| IngestError::InvalidUrl(raw.to_string()))?;
    if url.scheme().is_empty() || url.host_str().map_or(true, str::is_empty) {
        return Err(IngestError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

fn tsv_row_to_value(row: super::tsv::RawRow) -> Value {
    let mut object = Map::new();
    for (key, cell) in row {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        let value = if LIST_FIELDS.contains(&key.as_str()) {
            Value::from(cell.split('|').map(str::trim).collect::<Vec<_>>())
        } else if BOOL_FIELDS.contains(&key.as_str()) {
            Value::Bool(cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("yes"))
        } else {
            Value::from(cell)
        };
        object.insert(key, value);
    }
    Value::Object(object)
}

/// Decode the document text. Records that fail the asset schema are logged
/// and left out.
pub fn decode_assets(text: &str, format: AssetFormat) -> Result<Vec<TestAsset>> {
    let records: Vec<Value> = match format {
        AssetFormat::Tsv => parse_tsv(text.as_bytes())?.into_iter().map(tsv_row_to_value).collect(),
        AssetFormat::Json => one_or_many(serde_json::from_str(text).context("Invalid JSON asset document")?),
        AssetFormat::Yaml => one_or_many(serde_yaml::from_str(text).context("Invalid YAML asset document")?),
    };

    let total = records.len();
    let assets: Vec<TestAsset> = records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").and_then(Value::as_str).unwrap_or("<no id>").to_string();
            TestAsset::from_value(record)
                .map_err(|e| warn!("Failed to read asset {}: {}", id, e))
                .ok()
        })
        .collect();

    info!("Decoded {} of {} asset records", assets.len(), total);
    Ok(assets)
}

fn one_or_many(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Fetch and decode the assets behind `url`.
pub async fn load_assets(client: &Client, url: &str) -> Result<Vec<TestAsset>> {
    validate_url(url)?;
    let format = AssetFormat::from_url(url)?;

    let body = fetch_bytes(client, url).await?;
    let text = String::from_utf8(body).context("Asset document is not UTF-8")?;
    decode_assets(&text, format)
}
