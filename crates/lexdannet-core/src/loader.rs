use lexdannet_types::{DanNetEntry, RawRecord};
use serde::Serialize;

use crate::error::DatasetError;
use crate::index::LemmaIndex;

/// A dump format adapter. Yields raw records; validation happens in [`load_index`].
pub trait DumpSource {
    /// Human-readable name for logs, e.g. "DanNet 2.2 (OWL)"
    fn name(&self) -> &str;

    /// Read every record. Fails only when the container itself is unusable.
    fn read_records(&mut self) -> Result<Vec<RawRecord>, DatasetError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub malformed: usize,
    pub duplicates: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.malformed + self.duplicates
    }
}

/// Validate records and build the lemma index
pub fn build_index(records: impl IntoIterator<Item = RawRecord>) -> (LemmaIndex, LoadReport) {
    let mut index = LemmaIndex::new();
    let mut report = LoadReport::default();

    for raw in records {
        let entry = match DanNetEntry::try_from(raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping {e}");
                report.malformed += 1;
                continue;
            }
        };

        let id = entry.id.clone();
        if index.insert(entry) {
            report.loaded += 1;
        } else {
            tracing::debug!("Skipping duplicate DanNet id {id}");
            report.duplicates += 1;
        }
    }

    (index, report)
}

/// Read a dump and build the lemma index from it
pub fn load_index(source: &mut dyn DumpSource) -> Result<(LemmaIndex, LoadReport), DatasetError> {
    tracing::info!("Loading {}...", source.name());
    let records = source.read_records()?;

    let (index, report) = build_index(records);

    if report.malformed > 0 {
        tracing::warn!("Skipped {} malformed DanNet records", report.malformed);
    }
    if report.duplicates > 0 {
        tracing::warn!("Skipped {} duplicate DanNet ids", report.duplicates);
    }
    tracing::info!(
        "Loaded {} DanNet entries ({} ambiguous lemma/category keys)",
        report.loaded,
        index.ambiguous_keys()
    );

    Ok((index, report))
}
