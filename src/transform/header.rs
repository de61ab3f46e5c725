use crate::error::{Result, ScrapeError};

/// Stacked header rows restricted to their non-key cells, captured in
/// `keys.y` order while the table is streamed.
#[derive(Debug, Default)]
pub struct HeaderFragments {
    rows: Vec<Vec<String>>,
}

/// Material produced from the captured fragments: the per-column labels
/// become the output header, the per-row summaries feed the info record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedHeader {
    /// One label per non-key column, fragments joined with a single space
    /// in header-row order.
    pub labels: Vec<String>,
    /// Per header row: first-occurrence-unique values, comma-joined.
    pub summaries: Vec<String>,
}

impl HeaderFragments {
    /// Capture one header row, dropping the cells at key-column positions.
    pub fn capture(&mut self, row: &[String], key_columns: &[usize]) {
        let fragment = row
            .iter()
            .enumerate()
            .filter(|(column, _)| !key_columns.contains(column))
            .map(|(_, cell)| cell.clone())
            .collect();
        self.rows.push(fragment);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Combine the captured rows. All fragment rows must have the same
    /// non-zero length; the labels are built from the original fragments,
    /// the summaries from the deduplicated ones.
    pub fn combine(&self) -> Result<CombinedHeader> {
        let width = match self.rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(ScrapeError::structural(
                    "header row 0 yielded no value cells",
                ))
            }
        };
        for (index, row) in self.rows.iter().enumerate().skip(1) {
            if row.len() != width {
                return Err(ScrapeError::structural(format!(
                    "header row {} has {} value cells, expected {}",
                    index,
                    row.len(),
                    width
                )));
            }
        }

        let labels = (0..width)
            .map(|column| {
                self.rows
                    .iter()
                    .map(|row| row[column].as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let summaries = self
            .rows
            .iter()
            .map(|row| stable_dedup(row).join(","))
            .collect();

        Ok(CombinedHeader { labels, summaries })
    }
}

/// Keep each value the first time it appears, dropping later repeats
/// wherever they occur. Membership-based, not run-length: a value that
/// re-appears after other values is still dropped.
pub fn stable_dedup(values: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.iter().any(|seen| seen == value) {
            unique.push(value.clone());
        }
    }
    unique
}
