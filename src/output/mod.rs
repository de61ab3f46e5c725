//! Persists the transformer output: the rewritten delimited file and the
//! companion info record. Both are staged under a `.tmp` name and renamed
//! into place so an aborted run never leaves a partial file behind.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::SourceSpec;
use crate::error::Result;
use crate::fetch::catalogue::{DatasetInfo, License};
use crate::transform::TransformResult;

pub const DATA_FILENAME: &str = "data.csv";
pub const INFO_FILENAME: &str = "info.json";

/// Persisted companion record describing the rewritten file.
#[derive(Debug, Serialize)]
pub struct InfoRecord {
    pub title: String,
    pub author: String,
    pub url: String,
    /// Path of the rewritten file, relative to the info record
    pub file: String,
    pub attributes: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl InfoRecord {
    pub fn new(info: &DatasetInfo, spec: &SourceSpec, result: &TransformResult) -> Self {
        InfoRecord {
            title: info.title.clone(),
            author: info.author.clone(),
            url: info.data_url.clone(),
            file: DATA_FILENAME.to_string(),
            attributes: build_attributes(spec, result),
            license: info.license.clone(),
        }
    }
}

/// Assemble the named attribute lists: header-row summaries under the `y`
/// names, key-column domains under the `x` names. Positional fallbacks
/// apply when the spec names fewer attributes than there are keys.
pub fn build_attributes(
    spec: &SourceSpec,
    result: &TransformResult,
) -> BTreeMap<String, Vec<String>> {
    let mut attributes = BTreeMap::new();
    for (index, summary) in result.header_summaries.iter().enumerate() {
        attributes.insert(
            attribute_name(&spec.attributes.y, index, "header_row"),
            split_values(summary),
        );
    }
    for (index, domain) in result.key_domains.iter().enumerate() {
        attributes.insert(
            attribute_name(&spec.attributes.x, index, "key_column"),
            split_values(domain),
        );
    }
    attributes
}

fn attribute_name(names: &[String], index: usize, fallback: &str) -> String {
    names
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("{}_{}", fallback, index))
}

fn split_values(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(',').map(str::to_string).collect()
    }
}

/// Write the rewritten delimited file under `dir`, normalized to the
/// writer's default dialect for re-reading.
pub fn write_data_file(dir: &Path, result: &TransformResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let final_path = dir.join(DATA_FILENAME);
    let tmp_path = dir.join(format!("{}.tmp", DATA_FILENAME));

    // flexible: data rows may carry fewer cells than the composite header
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&tmp_path)?;
    for row in &result.output_rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, &final_path)?;
    debug!(file = %final_path.display(), rows = result.output_rows.len(), "wrote data file");
    Ok(final_path)
}

/// Write the info record next to the data file.
pub fn write_info_record(dir: &Path, record: &InfoRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let final_path = dir.join(INFO_FILENAME);
    let tmp_path = dir.join(format!("{}.tmp", INFO_FILENAME));

    let file = File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, record)?;
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, &final_path)?;
    debug!(file = %final_path.display(), "wrote info record");
    Ok(final_path)
}
