use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use lexdannet_core::DatasetError;
use zip::ZipArchive;

/// The two members of the DanNet archive the loader needs, decoded to text
pub struct DanNetArchive {
    pub words: String,
    pub parts_of_speech: String,
}

impl DanNetArchive {
    /// Open the archive at `path` and read the word and part-of-speech members
    pub fn open(path: &Path, words_member: &str, pos_member: &str) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|e| {
            DatasetError::Unavailable(format!("cannot open {}: {e}", path.display()))
        })?;

        Self::from_reader(BufReader::new(file), words_member, pos_member)
    }

    pub fn from_reader<R: Read + Seek>(
        reader: R,
        words_member: &str,
        pos_member: &str,
    ) -> Result<Self, DatasetError> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| DatasetError::Format(format!("not a readable zip archive: {e}")))?;

        let words = read_member(&mut archive, words_member)?;
        let parts_of_speech = read_member(&mut archive, pos_member)?;

        Ok(Self {
            words,
            parts_of_speech,
        })
    }
}

/// Upper bound on the buffer reserved up front for a member
const MAX_SIZE_HINT: u64 = 256 * 1024 * 1024;

/// The header's uncompressed size is not trusted beyond [`MAX_SIZE_HINT`]
fn capacity_hint(declared: u64) -> usize {
    declared.min(MAX_SIZE_HINT) as usize
}

/// Read the first member whose name ends with `suffix`
fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    suffix: &str,
) -> Result<String, DatasetError> {
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| DatasetError::Format(format!("corrupt archive entry {i}: {e}")))?;

        if !file.name().ends_with(suffix) {
            continue;
        }

        let name = file.name().to_string();
        tracing::debug!("Reading {name} ({} bytes)", file.size());

        let mut bytes = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut bytes)
            .map_err(|e| DatasetError::Format(format!("cannot read {name}: {e}")))?;
        return Ok(decode_latin1(&bytes));
    }

    Err(DatasetError::Format(format!(
        "no member ending in '{suffix}' in the archive"
    )))
}

/// The OWL files are ISO-8859-1, where every byte is its own code point
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
