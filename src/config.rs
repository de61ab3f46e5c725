use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Description of one catalogue source, read from a local JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    /// Catalogue entry URL (the package record, not the CSV itself)
    pub url: String,
    pub keys: KeyIndices,
    pub data_rows: DataRows,
    /// Semantic names for the key positions, used when the info record is
    /// persisted. Positional fallbacks apply when absent.
    #[serde(default)]
    pub attributes: AttributeNames,
}

/// Positions of the keys inside the raw table.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyIndices {
    /// Key columns: categorical identifier columns, excluded from the
    /// composite header.
    pub x: Vec<usize>,
    /// Header rows: stacked rows whose non-key cells form the composite
    /// header.
    pub y: Vec<usize>,
}

/// Inclusive data-row window. `last < 0` counts from the final row.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DataRows {
    pub first: usize,
    pub last: i64,
}

/// Caller-supplied names for the persisted attribute lists: `y` names the
/// header-row summaries (e.g. "nationality", "sex"), `x` names the
/// key-column domains (e.g. "state", "semester").
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttributeNames {
    #[serde(default)]
    pub x: Vec<String>,
    #[serde(default)]
    pub y: Vec<String>,
}

/// Per-invocation switches, passed down explicitly instead of living in
/// module-level globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Skip the delimited-text sanity check on the downloaded body
    pub skip_validation: bool,
}

impl SourceSpec {
    /// Read and validate a source spec from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading source spec");
        let contents = fs::read_to_string(path)?;
        let spec: SourceSpec = serde_json::from_str(&contents)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Checks that can be made before any network or transform work.
    pub fn validate(&self) -> Result<()> {
        if let Err(err) = url::Url::parse(&self.url) {
            return Err(ScrapeError::config(format!(
                "catalogue url '{}' is invalid: {}",
                self.url, err
            )));
        }
        if self.keys.y.is_empty() {
            return Err(ScrapeError::config(
                "keys.y must name at least one header row",
            ));
        }
        if self.data_rows.last == 0 {
            return Err(ScrapeError::config("the last data row cannot be 0"));
        }
        if self.data_rows.last > 0 && self.data_rows.last < self.data_rows.first as i64 {
            return Err(ScrapeError::config(format!(
                "last data row {} lies before first data row {}",
                self.data_rows.last, self.data_rows.first
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_json(first: usize, last: i64) -> String {
        format!(
            r#"{{
                "url": "https://opendata.example/api/3/action/package_show?id=students",
                "keys": {{ "x": [0, 1], "y": [0, 1] }},
                "data_rows": {{ "first": {first}, "last": {last} }},
                "attributes": {{ "x": ["state", "semester"], "y": ["nationality", "sex"] }}
            }}"#
        )
    }

    #[test]
    fn parses_full_spec() {
        let spec: SourceSpec = serde_json::from_str(&spec_json(2, -1)).unwrap();
        assert_eq!(spec.keys.x, vec![0, 1]);
        assert_eq!(spec.keys.y, vec![0, 1]);
        assert_eq!(spec.data_rows.first, 2);
        assert_eq!(spec.data_rows.last, -1);
        assert_eq!(spec.attributes.y, vec!["nationality", "sex"]);
        spec.validate().unwrap();
    }

    #[test]
    fn attributes_are_optional() {
        let json = r#"{
            "url": "https://opendata.example/entry",
            "keys": { "x": [0], "y": [0] },
            "data_rows": { "first": 1, "last": -1 }
        }"#;
        let spec: SourceSpec = serde_json::from_str(json).unwrap();
        assert!(spec.attributes.x.is_empty());
        spec.validate().unwrap();
    }

    #[test]
    fn rejects_unparseable_url() {
        let json = r#"{
            "url": "not a url",
            "keys": { "x": [0], "y": [0] },
            "data_rows": { "first": 1, "last": -1 }
        }"#;
        let spec: SourceSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec.validate(), Err(ScrapeError::Config { .. })));
    }

    #[test]
    fn rejects_zero_last_row() {
        let spec: SourceSpec = serde_json::from_str(&spec_json(2, 0)).unwrap();
        assert!(matches!(
            spec.validate(),
            Err(ScrapeError::Config { .. })
        ));
    }

    #[test]
    fn rejects_last_before_first() {
        let spec: SourceSpec = serde_json::from_str(&spec_json(5, 2)).unwrap();
        assert!(matches!(
            spec.validate(),
            Err(ScrapeError::Config { .. })
        ));
    }

    #[test]
    fn rejects_missing_header_rows() {
        let json = r#"{
            "url": "https://opendata.example/entry",
            "keys": { "x": [0], "y": [] },
            "data_rows": { "first": 1, "last": -1 }
        }"#;
        let spec: SourceSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec.validate(), Err(ScrapeError::Config { .. })));
    }
}
