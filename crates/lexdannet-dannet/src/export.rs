use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lexdannet_core::{LemmaIndex, category};
use serde::Serialize;

#[derive(Serialize)]
struct WordRow<'a> {
    id: &'a str,
    lemma: &'a str,
    pos: &'a str,
    /// Wikidata lexical category item, when one corresponds
    pos_qid: Option<&'static str>,
}

/// Write the joined word table as a JSON array, ordered by id
pub fn write_json(path: &Path, index: &LemmaIndex) -> std::io::Result<usize> {
    let rows: Vec<WordRow> = index
        .entries()
        .into_iter()
        .map(|entry| WordRow {
            id: &entry.id,
            lemma: &entry.lemma,
            pos: entry.category.as_str(),
            pos_qid: category::to_wikidata(&entry.category),
        })
        .collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;

    tracing::info!("Exported {} DanNet words to {}", rows.len(), path.display());
    Ok(rows.len())
}
