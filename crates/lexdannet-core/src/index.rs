use std::collections::{BTreeMap, BTreeSet, HashMap};

use lexdannet_types::{DanNetEntry, LexicalCategory};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

type IndexKey = (String, LexicalCategory);

/// Lookup table from (lemma, category) to DanNet word ids
///
/// Homonyms share a key, so a lookup can yield several ids. Each entry sits
/// under exactly one key, derived from its own lemma and category.
#[derive(Debug, Default)]
pub struct LemmaIndex {
    entries: HashMap<String, DanNetEntry>,
    by_key: HashMap<IndexKey, BTreeSet<String>>,
}

impl LemmaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries; later duplicates of an id are dropped
    pub fn from_entries(entries: impl IntoIterator<Item = DanNetEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    fn key_for(lemma: &str, category: &LexicalCategory) -> IndexKey {
        (DefaultPreprocessor.process(lemma), category.clone())
    }

    /// Insert an entry. Returns false when the id is already present.
    pub fn insert(&mut self, entry: DanNetEntry) -> bool {
        if self.entries.contains_key(&entry.id) {
            return false;
        }

        let key = Self::key_for(&entry.lemma, &entry.category);
        self.by_key
            .entry(key)
            .or_default()
            .insert(entry.id.clone());
        self.entries.insert(entry.id.clone(), entry);

        true
    }

    /// All entries sharing the lemma and category, ordered by id
    pub fn candidates(&self, lemma: &str, category: &LexicalCategory) -> Vec<&DanNetEntry> {
        let key = Self::key_for(lemma, category);

        self.by_key
            .get(&key)
            .map(|ids| ids.iter().filter_map(|id| self.entries.get(id)).collect())
            .unwrap_or_default()
    }

    /// All entries with this lemma in any category
    pub fn lookup_lemma(&self, lemma: &str) -> Vec<&DanNetEntry> {
        let lemma = DefaultPreprocessor.process(lemma);

        let mut found: Vec<&DanNetEntry> = self
            .by_key
            .iter()
            .filter(|((key_lemma, _), _)| *key_lemma == lemma)
            .flat_map(|(_, ids)| ids.iter().filter_map(|id| self.entries.get(id)))
            .collect();

        found.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id)));
        found
    }

    pub fn get(&self, id: &str) -> Option<&DanNetEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by id
    pub fn entries(&self) -> Vec<&DanNetEntry> {
        let mut entries: Vec<&DanNetEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    pub fn category_counts(&self) -> BTreeMap<LexicalCategory, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of (lemma, category) keys with more than one entry
    pub fn ambiguous_keys(&self) -> usize {
        self.by_key.values().filter(|ids| ids.len() > 1).count()
    }

    /// Rebuild every entry's key and check it is indexed there and nowhere else
    pub fn verify_consistency(&self) -> Result<(), String> {
        let mut seen: HashMap<&str, &IndexKey> = HashMap::new();

        for (key, ids) in &self.by_key {
            for id in ids {
                if let Some(previous) = seen.insert(id.as_str(), key) {
                    return Err(format!(
                        "entry {id} indexed under both {previous:?} and {key:?}"
                    ));
                }

                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| format!("index refers to unknown entry {id}"))?;

                let expected = Self::key_for(&entry.lemma, &entry.category);
                if &expected != key {
                    return Err(format!(
                        "entry {id} indexed under {key:?}, expected {expected:?}"
                    ));
                }
            }
        }

        if seen.len() != self.entries.len() {
            return Err(format!(
                "{} entries loaded but {} indexed",
                self.entries.len(),
                seen.len()
            ));
        }

        Ok(())
    }
}
