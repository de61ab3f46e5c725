use std::collections::BTreeSet;

use crate::error::{Result, ScrapeError};

/// Inclusive data-row range after end-relative resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
}

impl RowRange {
    pub fn contains(&self, row: usize) -> bool {
        self.first <= row && row <= self.last
    }
}

/// Resolve the configured window against the table's actual row count.
///
/// `last < 0` counts from the end (`-1` is the final row). A window that
/// only collapses once the offset is applied is an [`ScrapeError::EmptyWindow`],
/// distinct from a spec that was already rejected at load time.
pub fn resolve_window(first: usize, last: i64, row_count: usize) -> Result<RowRange> {
    let resolved = if last < 0 {
        row_count as i64 + last
    } else if last > first as i64 {
        last
    } else {
        return Err(ScrapeError::EmptyWindow { first, last });
    };

    if resolved < first as i64 {
        return Err(ScrapeError::EmptyWindow {
            first,
            last: resolved,
        });
    }

    Ok(RowRange {
        first,
        last: resolved as usize,
    })
}

/// Role of one raw row in the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    /// Contributes header fragments; never data, even inside the window.
    HeaderCapture,
    /// Admitted by the resolved data window.
    Data,
    Ignored,
}

/// Per-row classification computed from the header-row set and the resolved
/// window, decoupled from the streaming loop's position.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    header_rows: BTreeSet<usize>,
    trigger: usize,
    window: RowRange,
}

impl RowClassifier {
    pub fn new(header_rows: &[usize], window: RowRange) -> Self {
        let header_rows: BTreeSet<usize> = header_rows.iter().copied().collect();
        let trigger = header_rows.iter().next_back().map(|&i| i + 1).unwrap_or(0);
        Self {
            header_rows,
            trigger,
            window,
        }
    }

    pub fn role(&self, row: usize) -> RowRole {
        if self.header_rows.contains(&row) {
            RowRole::HeaderCapture
        } else if self.window.contains(row) {
            RowRole::Data
        } else {
            RowRole::Ignored
        }
    }

    /// The composite header is emitted on the first row past the last
    /// configured header row. That row may itself also be a data row.
    pub fn is_header_trigger(&self, row: usize) -> bool {
        row == self.trigger
    }
}
