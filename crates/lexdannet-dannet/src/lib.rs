pub mod archive;
pub mod export;
pub mod fetch;
pub mod rdf;

use std::path::PathBuf;

use lexdannet_config::dannet::DanNetConfig;
use lexdannet_core::{DatasetError, DumpSource, LemmaIndex};
use lexdannet_types::{LexicalCategory, RawRecord};

pub use archive::DanNetArchive;
pub use fetch::{ensure_dump, http_client};

/// A word every DanNet 2.2 dump carries; used to sanity-check a load
const KNOWN_ENTRY: (&str, &str, LexicalCategory) = ("11010114", "dyr", LexicalCategory::Noun);

/// The DanNet 2.2 OWL zip, read from disk
pub struct Dannet22Dump {
    path: PathBuf,
    words_member: String,
    pos_member: String,
}

impl Dannet22Dump {
    pub fn new(path: PathBuf, config: &DanNetConfig) -> Self {
        Self {
            path,
            words_member: config.words_member.clone(),
            pos_member: config.pos_member.clone(),
        }
    }
}

impl DumpSource for Dannet22Dump {
    fn name(&self) -> &str {
        "DanNet 2.2 (OWL)"
    }

    fn read_records(&mut self) -> Result<Vec<RawRecord>, DatasetError> {
        let archive = DanNetArchive::open(&self.path, &self.words_member, &self.pos_member)?;

        let words = rdf::parse_words(&archive.words);
        if words.is_empty() {
            return Err(DatasetError::Format(format!(
                "no word elements in {}",
                self.words_member
            )));
        }

        let parts_of_speech = rdf::parse_parts_of_speech(&archive.parts_of_speech);
        if parts_of_speech.is_empty() {
            return Err(DatasetError::Format(format!(
                "no parts of speech in {}",
                self.pos_member
            )));
        }

        tracing::info!(
            "Extracted {} word forms and {} parts of speech",
            words.len(),
            parts_of_speech.len()
        );

        Ok(rdf::join_records(words, parts_of_speech))
    }
}

/// Warn when a word every dump should contain is absent or looks wrong.
/// Returns whether the check passed; never fails the load.
pub fn check_known_entry(index: &LemmaIndex) -> bool {
    let (id, lemma, category) = KNOWN_ENTRY;

    match index.get(id) {
        Some(entry) if entry.lemma == lemma && entry.category == category => {
            tracing::debug!("Sanity check passed: {id} is '{lemma}' ({category})");
            true
        }
        Some(entry) => {
            tracing::warn!(
                "Sanity check: {id} is '{}' ({}), expected '{lemma}' ({category})",
                entry.lemma,
                entry.category
            );
            false
        }
        None => {
            tracing::warn!("Sanity check: DanNet word {id} ('{lemma}') not found");
            false
        }
    }
}
