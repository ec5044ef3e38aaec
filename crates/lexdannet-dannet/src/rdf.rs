//! Record extraction from the DanNet 2.2 OWL files.
//!
//! The files are large, flat RDF/XML with one element per word. A full XML
//! parser chokes on parts of them, so records are pulled out with patterns
//! over the element text instead.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use lexdannet_types::RawRecord;
use regex::{Captures, Regex};

static WORD_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<wn20schema:Word\b([^>]*)>").expect("valid regex"));

static WORD_ABOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"rdf:about="[^"]*?word-([^"]*)""#).expect("valid regex"));

static LEXICAL_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"wn20schema:lexicalForm="([^"]*)""#).expect("valid regex"));

static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<rdf:Description\s+rdf:about="[^"]*?word-([^"]*)"\s*>(.*?)</rdf:Description>"#,
    )
    .expect("valid regex")
});

static PART_OF_SPEECH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<dn_schema:partOfSpeech>(.*?)</dn_schema:partOfSpeech>").expect("valid regex")
});

static XML_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid regex")
});

/// A `wn20schema:Word` element; either field may be missing in a bad record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordForm {
    pub id: Option<String>,
    pub lemma: Option<String>,
}

/// Resolve the predefined and numeric XML entities
pub fn unescape_xml(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let resolved = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match name.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => name[1..].parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };

            resolved
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Every word element in `words.rdf`, in document order
pub fn parse_words(xml: &str) -> Vec<WordForm> {
    WORD_ELEMENT
        .captures_iter(xml)
        .map(|caps| {
            let attributes = &caps[1];
            WordForm {
                id: WORD_ABOUT
                    .captures(attributes)
                    .map(|c| c[1].trim().to_string()),
                lemma: LEXICAL_FORM
                    .captures(attributes)
                    .map(|c| unescape_xml(&c[1])),
            }
        })
        .collect()
}

/// (word id, part of speech) pairs from `part_of_speech.rdf`
pub fn parse_parts_of_speech(xml: &str) -> Vec<(String, String)> {
    DESCRIPTION
        .captures_iter(xml)
        .filter_map(|caps| {
            let id = caps[1].trim().to_string();
            PART_OF_SPEECH
                .captures(&caps[2])
                .map(|pos| (id, unescape_xml(pos[1].trim())))
        })
        .collect()
}

/// Inner-join words with their parts of speech on word id
///
/// Words without a part of speech come out without a category, and parts of
/// speech without a word come out without a lemma, so both are visible to the
/// loader as malformed rather than silently dropped.
pub fn join_records(
    words: Vec<WordForm>,
    parts_of_speech: Vec<(String, String)>,
) -> Vec<RawRecord> {
    let mut pos_by_id: HashMap<String, String> = HashMap::with_capacity(parts_of_speech.len());
    let mut pos_order = Vec::with_capacity(parts_of_speech.len());
    for (id, pos) in parts_of_speech {
        if !pos_by_id.contains_key(&id) {
            pos_order.push(id.clone());
            pos_by_id.insert(id, pos);
        }
    }

    let mut word_ids: HashSet<String> = HashSet::with_capacity(words.len());
    let mut records = Vec::with_capacity(words.len());

    for word in words {
        let category = word.id.as_ref().and_then(|id| pos_by_id.get(id).cloned());
        if let Some(id) = &word.id {
            word_ids.insert(id.clone());
        }
        records.push(RawRecord {
            id: word.id,
            lemma: word.lemma,
            category,
        });
    }

    for id in pos_order {
        if !word_ids.contains(&id) {
            let category = pos_by_id.remove(&id);
            records.push(RawRecord {
                id: Some(id),
                lemma: None,
                category,
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<rdf:RDF>
  <wn20schema:Word rdf:about="&dn;word-11010114" wn20schema:lexicalForm="dyr"/>
  <wn20schema:Word rdf:about="&dn;word-11021628"
      wn20schema:lexicalForm="have ondt"/>
  <wn20schema:Word rdf:about="&dn;word-11028002" wn20schema:lexicalForm="R&amp;D"/>
  <wn20schema:Word rdf:about="&dn;word-99"/>
</rdf:RDF>"#;

    const POS: &str = r#"<rdf:RDF>
<rdf:Description rdf:about="&dn;word-11010114"><dn_schema:partOfSpeech>Noun</dn_schema:partOfSpeech></rdf:Description>
<rdf:Description rdf:about="&dn;word-11021628">
  <dn_schema:partOfSpeech> Verb </dn_schema:partOfSpeech>
</rdf:Description>
<rdf:Description rdf:about="&dn;word-77"><dn_schema:partOfSpeech>Adjective</dn_schema:partOfSpeech></rdf:Description>
<rdf:Description rdf:about="&dn;synset-1"><rdfs:label>x</rdfs:label></rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn words_are_extracted_in_order() {
        let words = parse_words(WORDS);
        assert_eq!(words.len(), 4);
        assert_eq!(
            words[0],
            WordForm {
                id: Some("11010114".to_string()),
                lemma: Some("dyr".to_string())
            }
        );
        assert_eq!(words[1].lemma.as_deref(), Some("have ondt"));
        assert_eq!(words[2].lemma.as_deref(), Some("R&D"));
        assert_eq!(words[3].lemma, None);
    }

    #[test]
    fn parts_of_speech_are_trimmed() {
        let pos = parse_parts_of_speech(POS);
        assert_eq!(
            pos,
            vec![
                ("11010114".to_string(), "Noun".to_string()),
                ("11021628".to_string(), "Verb".to_string()),
                ("77".to_string(), "Adjective".to_string()),
            ]
        );
    }

    #[test]
    fn join_keeps_unpaired_records_for_the_loader() {
        let records = join_records(parse_words(WORDS), parse_parts_of_speech(POS));
        assert_eq!(records.len(), 5);

        assert_eq!(records[0].category.as_deref(), Some("Noun"));
        assert_eq!(records[1].category.as_deref(), Some("Verb"));
        // R&D has no part of speech
        assert_eq!(records[2].category, None);
        // word 77 has a part of speech but no form
        assert_eq!(records[4].id.as_deref(), Some("77"));
        assert_eq!(records[4].lemma, None);
    }

    #[test]
    fn entities_are_resolved() {
        assert_eq!(unescape_xml("s&#248;&#x00E5;"), "søå");
        assert_eq!(unescape_xml("&lt;x&gt; &quot;&apos;"), "<x> \"'");
        assert_eq!(unescape_xml("&dn; &#xFFFFFFF;"), "&dn; &#xFFFFFFF;");
    }
}
