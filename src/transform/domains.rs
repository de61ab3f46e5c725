use std::collections::BTreeSet;

/// Running per-column accumulators for the key-column value domains.
///
/// Bounded by the number of distinct values seen, not the number of rows;
/// each admitted row is observed exactly once.
#[derive(Debug)]
pub struct DomainCollector {
    columns: Vec<usize>,
    seen: Vec<BTreeSet<String>>,
}

impl DomainCollector {
    pub fn new(key_columns: &[usize]) -> Self {
        Self {
            columns: key_columns.to_vec(),
            seen: vec![BTreeSet::new(); key_columns.len()],
        }
    }

    /// Record the key cells of one admitted data row.
    pub fn observe(&mut self, row: &[String]) {
        for (slot, &column) in self.columns.iter().enumerate() {
            if let Some(cell) = row.get(column) {
                if !self.seen[slot].contains(cell) {
                    self.seen[slot].insert(cell.clone());
                }
            }
        }
    }

    /// One entry per key column: the sorted, de-duplicated domain,
    /// comma-joined. Order is lexicographic over the raw strings.
    pub fn finish(self) -> Vec<String> {
        self.seen
            .into_iter()
            .map(|set| set.into_iter().collect::<Vec<_>>().join(","))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn domains_are_sorted_and_deduplicated() {
        let mut collector = DomainCollector::new(&[0]);
        for value in ["b", "a", "a", "c"] {
            collector.observe(&row(&[value, "payload"]));
        }
        assert_eq!(collector.finish(), vec!["a,b,c"]);
    }

    #[test]
    fn collects_each_configured_column() {
        let mut collector = DomainCollector::new(&[0, 1]);
        collector.observe(&row(&["Bayern", "WS 2019", "12"]));
        collector.observe(&row(&["Berlin", "SS 2019", "7"]));
        collector.observe(&row(&["Bayern", "SS 2019", "4"]));
        assert_eq!(
            collector.finish(),
            vec!["Bayern,Berlin", "SS 2019,WS 2019"]
        );
    }

    #[test]
    fn sorting_is_lexicographic_not_numeric() {
        let mut collector = DomainCollector::new(&[0]);
        for value in ["10", "2", "1"] {
            collector.observe(&row(&[value]));
        }
        assert_eq!(collector.finish(), vec!["1,10,2"]);
    }

    #[test]
    fn missing_cells_are_skipped() {
        let mut collector = DomainCollector::new(&[2]);
        collector.observe(&row(&["short"]));
        collector.observe(&row(&["a", "b", "c"]));
        assert_eq!(collector.finish(), vec!["c"]);
    }
}
