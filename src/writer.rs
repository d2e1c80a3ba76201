//! JSON Writer
//!
//! Serializes records to `<dir>/<id>.json`. Existing files are overwritten.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::model::Identified;

/// Render `value` as UTF-8 JSON indented by `indent` spaces.
pub fn to_indented_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize record")?;
    Ok(String::from_utf8(buf)?)
}

pub struct JsonWriter {
    dir: PathBuf,
    indent: usize,
}

impl JsonWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            indent: 4,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one record and return the path it landed at.
    pub async fn write<T: Serialize + Identified>(&self, record: &T) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .with_context(|| format!("Failed to create output directory {}", self.dir.display()))?;
        }

        let path = self.dir.join(format!("{}.json", record.id()));
        let json = to_indented_json(record, self.indent)?;
        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    pub async fn write_all<'a, T, I>(&self, records: I) -> Result<usize>
    where
        T: Serialize + Identified + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut count = 0;
        for record in records {
            self.write(record).await?;
            count += 1;
        }
        Ok(count)
    }
}

/// Convenience for a single record with the default indentation.
pub async fn dump_to_json<T: Serialize + Identified>(dir: impl AsRef<Path>, record: &T) -> Result<PathBuf> {
    JsonWriter::new(dir.as_ref()).write(record).await
}
