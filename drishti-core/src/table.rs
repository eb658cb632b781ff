//! Insertion-ordered result table

use crate::record::BenchmarkRecord;

/// Ordered sequence of benchmark records; insertion order is testing order.
/// The table itself does not deduplicate; the one-call-per-variant
/// discipline is enforced upstream by config validation.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    records: Vec<BenchmarkRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: BenchmarkRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the maximum key. Ties break by insertion order: the
    /// first record with the max value wins (strictly-greater replacement).
    pub fn best_by<F>(&self, key: F) -> Option<&BenchmarkRecord>
    where
        F: Fn(&BenchmarkRecord) -> f64,
    {
        let mut best: Option<&BenchmarkRecord> = None;
        for record in &self.records {
            match best {
                Some(current) if key(record) > key(current) => best = Some(record),
                None => best = Some(record),
                _ => {}
            }
        }
        best
    }

    /// Records matching the predicate, in insertion order
    pub fn filter<P>(&self, predicate: P) -> Vec<&BenchmarkRecord>
    where
        P: Fn(&BenchmarkRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }
}
