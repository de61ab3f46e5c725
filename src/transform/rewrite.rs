use tracing::debug;

use crate::config::SourceSpec;
use crate::error::{Result, ScrapeError};
use crate::transform::domains::DomainCollector;
use crate::transform::header::{CombinedHeader, HeaderFragments};
use crate::transform::window::{resolve_window, RowClassifier, RowRole};

/// Leading label cell of the rewritten header row.
const HEADER_LABEL: &str = "state";

/// Everything one streaming pass produces. Built once; not mutated after
/// the pass completes.
#[derive(Debug)]
pub struct TransformResult {
    /// The composite header row followed by the admitted data rows, in
    /// source order.
    pub output_rows: Vec<Vec<String>>,
    /// One composite label per non-key column (the header row minus its
    /// leading label cells).
    pub composite_labels: Vec<String>,
    /// Per header row: first-occurrence-unique values, comma-joined.
    pub header_summaries: Vec<String>,
    /// Per key column: sorted distinct values, comma-joined.
    pub key_domains: Vec<String>,
}

/// Drive one pass over the decoded rows: capture header fragments, emit the
/// combined header exactly once on the first row past the last header row,
/// and admit window rows while collecting key-column domains.
///
/// All-or-nothing: any structural or window failure aborts before anything
/// is handed to the writer.
pub fn transform(rows: &[Vec<String>], spec: &SourceSpec) -> Result<TransformResult> {
    let window = resolve_window(spec.data_rows.first, spec.data_rows.last, rows.len())?;
    let classifier = RowClassifier::new(&spec.keys.y, window);

    let mut fragments = HeaderFragments::default();
    let mut collector = DomainCollector::new(&spec.keys.x);
    let mut output_rows: Vec<Vec<String>> = Vec::new();
    let mut combined: Option<CombinedHeader> = None;

    for (index, row) in rows.iter().enumerate() {
        if classifier.is_header_trigger(index) {
            if fragments.is_empty() {
                return Err(ScrapeError::structural(format!(
                    "no header fragments captured before row {}",
                    index
                )));
            }
            let header = fragments.combine()?;

            let mut header_row = Vec::with_capacity(spec.keys.y.len() + header.labels.len());
            header_row.push(HEADER_LABEL.to_string());
            header_row.extend(std::iter::repeat(String::new()).take(spec.keys.y.len() - 1));
            header_row.extend(header.labels.iter().cloned());
            output_rows.push(header_row);

            combined = Some(header);
        }

        // A header row is never also a data row, even inside the window.
        match classifier.role(index) {
            RowRole::HeaderCapture => fragments.capture(row, &spec.keys.x),
            RowRole::Data => {
                collector.observe(row);
                output_rows.push(row.clone());
            }
            RowRole::Ignored => {}
        }
    }

    let combined = combined.ok_or_else(|| {
        ScrapeError::structural("table ended before the header rows were complete")
    })?;

    debug!(
        rows = output_rows.len(),
        key_columns = spec.keys.x.len(),
        "transform pass complete"
    );

    Ok(TransformResult {
        output_rows,
        composite_labels: combined.labels,
        header_summaries: combined.summaries,
        key_domains: collector.finish(),
    })
}
