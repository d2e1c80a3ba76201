//! Archive Adapter
//!
//! Downloads a zipped snapshot of the tests repository and decodes the
//! asset JSON files inside it.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::io::{Cursor, Read};
use tracing::{info, warn};

use super::fetch_bytes;
use crate::error::{AssetRejection, IngestError};
use crate::model::{Labelled, PathfinderTestAsset, TestAsset};
use crate::suite::ExpectedOutputFilter;

/// Which asset directory of the repository snapshot to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetDir {
    TestAssets,
    PathfinderTestAssets,
}

impl AssetDir {
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetDir::TestAssets => "test_assets",
            AssetDir::PathfinderTestAssets => "pathfinder_test_assets",
        }
    }

    /// True for `<top>/<dir>/<file>.json` entries, one level below the root
    /// folder of the archive.
    pub fn matches(&self, entry: &str) -> bool {
        let parts: Vec<&str> = entry.split('/').collect();
        match parts.as_slice() {
            [top, dir, file] => {
                !top.is_empty()
                    && *dir == self.dir_name()
                    && !file.starts_with('.')
                    && file.len() > ".json".len()
                    && file.ends_with(".json")
            }
            _ => false,
        }
    }
}

/// Record type stored as one JSON file per record in an [`AssetDir`].
pub trait ArchiveRecord: Labelled + Sized {
    const DIR: AssetDir;

    fn from_value(value: Value) -> Result<Self, AssetRejection>;
}

impl ArchiveRecord for TestAsset {
    const DIR: AssetDir = AssetDir::TestAssets;

    fn from_value(value: Value) -> Result<Self, AssetRejection> {
        TestAsset::from_value(value)
    }
}

impl ArchiveRecord for PathfinderTestAsset {
    const DIR: AssetDir = AssetDir::PathfinderTestAssets;

    fn from_value(value: Value) -> Result<Self, AssetRejection> {
        PathfinderTestAsset::from_value(value)
    }
}

/// Download the archive at `url`. Only `.zip` URLs are accepted and any
/// failure aborts the run.
pub async fn download_archive(client: &Client, url: &str) -> Result<Vec<u8>> {
    if !url.ends_with(".zip") {
        return Err(IngestError::NotAnArchive(url.to_string()).into());
    }
    info!("Downloading tests from {}...", url);
    fetch_bytes(client, url).await
}

/// Decode every record file under `T::DIR`, in entry-name order. Files that
/// do not parse or fail the record schema are logged and skipped, as are
/// records the filter rejects.
pub fn read_archive_assets<T: ArchiveRecord>(
    archive_bytes: &[u8],
    filter: Option<&ExpectedOutputFilter>,
) -> Result<Vec<T>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes)).context("Failed to open zip archive")?;

    let mut entries: Vec<String> = archive
        .file_names()
        .filter(|name| T::DIR.matches(name))
        .map(str::to_string)
        .collect();
    entries.sort();

    let mut assets = Vec::new();
    for entry in &entries {
        let mut content = String::new();
        archive
            .by_name(entry)
            .with_context(|| format!("Failed to open archive entry {}", entry))?
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read archive entry {}", entry))?;

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse {}: {}", entry, e);
                continue;
            }
        };

        let asset_id = value.get("id").and_then(Value::as_str).unwrap_or(entry).to_string();
        match T::from_value(value) {
            Ok(asset) if filter.map_or(true, |f| f.matches(&asset)) => assets.push(asset),
            Ok(_) => {}
            Err(e) => warn!("Failed to read asset {}: {}", asset_id, e),
        }
    }

    info!(
        "Read {} records from {} entries under {}",
        assets.len(),
        entries.len(),
        T::DIR.dir_name()
    );
    Ok(assets)
}
