use crate::normalize::normalize;
use riplog_core::{DriveEntry, DriveRecord};
use tracing::debug;

/// The closest reference drive to a queried name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveMatch<'a> {
    pub record: &'a DriveRecord,
    /// Levenshtein distance between the normalized query and `record.identifier`
    pub distance: usize,
}

/// Read-only, ordered collection of reference drives.
///
/// Order is significant: when two records are equally close to a query, the
/// one that appears first wins.
#[derive(Debug, Clone, Default)]
pub struct DriveDatabase {
    records: Vec<DriveRecord>,
}

impl DriveDatabase {
    /// Build from raw entries, normalizing every name
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DriveEntry>,
    {
        let records = entries
            .into_iter()
            .map(|entry| DriveRecord {
                identifier: normalize(&entry.name),
                offset: entry.offset,
                score: entry.score,
            })
            .collect();

        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DriveRecord] {
        &self.records
    }

    /// Find the record with the smallest edit distance to `raw_name`.
    ///
    /// Returns `None` only when the database is empty.
    pub fn closest(&self, raw_name: &str) -> Option<DriveMatch<'_>> {
        let query = normalize(raw_name);
        let mut best: Option<DriveMatch<'_>> = None;

        for record in &self.records {
            let distance = strsim::levenshtein(&record.identifier, &query);

            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(DriveMatch { record, distance });
            }

            if distance == 0 {
                break;
            }
        }

        if let Some(m) = &best {
            debug!(
                query = %query,
                identifier = %m.record.identifier,
                distance = m.distance,
                "resolved drive"
            );
        }

        best
    }

    /// Resolve a raw drive name to its closest reference record.
    ///
    /// An empty database yields `DriveRecord::default()`, whose zero score
    /// fails any trust threshold.
    pub fn resolve(&self, raw_name: &str) -> DriveRecord {
        self.closest(raw_name)
            .map(|m| m.record.clone())
            .unwrap_or_default()
    }
}
