use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Part of speech in DanNet's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LexicalCategory {
    Noun,
    Verb,
    Adjective,
    /// Any other label the dump carries, kept verbatim
    Other(String),
}

impl LexicalCategory {
    /// Parse a DanNet part-of-speech label, case-insensitive. Empty labels are rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        let category = match label.to_lowercase().as_str() {
            "noun" => LexicalCategory::Noun,
            "verb" => LexicalCategory::Verb,
            "adjective" => LexicalCategory::Adjective,
            _ => LexicalCategory::Other(label.to_string()),
        };

        Some(category)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LexicalCategory::Noun => "noun",
            LexicalCategory::Verb => "verb",
            LexicalCategory::Adjective => "adjective",
            LexicalCategory::Other(label) => label,
        }
    }
}

impl fmt::Display for LexicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LexicalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| "empty lexical category".to_string())
    }
}

/// One record as a dump adapter sees it, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub lemma: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Id,
    Lemma,
    Category,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::Id => "id",
            MissingField::Lemma => "lemma",
            MissingField::Category => "category",
        };
        f.write_str(name)
    }
}

/// A dump record that cannot become a [`DanNetEntry`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed record {}: missing {missing}", .id.as_deref().unwrap_or("<no id>"))]
pub struct MalformedRecord {
    pub id: Option<String>,
    pub missing: MissingField,
}

/// A validated DanNet word
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DanNetEntry {
    pub id: String,
    pub lemma: String,
    pub category: LexicalCategory,
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<RawRecord> for DanNetEntry {
    type Error = MalformedRecord;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let id = required(raw.id).ok_or(MalformedRecord {
            id: None,
            missing: MissingField::Id,
        })?;

        let Some(lemma) = required(raw.lemma) else {
            return Err(MalformedRecord {
                id: Some(id),
                missing: MissingField::Lemma,
            });
        };

        let Some(category) = raw.category.as_deref().and_then(LexicalCategory::from_label) else {
            return Err(MalformedRecord {
                id: Some(id),
                missing: MissingField::Category,
            });
        };

        Ok(Self {
            id,
            lemma,
            category,
        })
    }
}

/// A Wikidata lexeme as the knowledge base reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLexeme {
    /// Bare lexeme id, e.g. `L1234`
    pub id: String,
    pub lemma: String,
    /// Lexical category item, e.g. `Q1084`
    pub category_qid: String,
    pub dannet_id: Option<String>,
    /// Carries a "missing in DanNet 2.2" statement
    pub missing_in_dannet: bool,
}

impl TargetLexeme {
    /// Already handled by an earlier run, either linked or marked missing
    pub fn is_settled(&self) -> bool {
        self.dannet_id.is_some() || self.missing_in_dannet
    }
}

/// A mutation the matcher asks the knowledge base to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditRequest {
    AttachIdentifier { lexeme_id: String, dannet_id: String },
    MarkMissing { lexeme_id: String },
}

impl EditRequest {
    pub fn lexeme_id(&self) -> &str {
        match self {
            EditRequest::AttachIdentifier { lexeme_id, .. } => lexeme_id,
            EditRequest::MarkMissing { lexeme_id } => lexeme_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    NotInDanNet,
    CategoryUntranslatable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Unique(String),
    Ambiguous(Vec<String>),
    NoMatch(NoMatchReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, lemma: &str, category: &str) -> RawRecord {
        RawRecord {
            id: Some(id.to_string()),
            lemma: Some(lemma.to_string()),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn category_labels_are_case_insensitive() {
        assert_eq!(LexicalCategory::from_label("Noun"), Some(LexicalCategory::Noun));
        assert_eq!(LexicalCategory::from_label(" VERB "), Some(LexicalCategory::Verb));
        assert_eq!(
            LexicalCategory::from_label("Pronoun"),
            Some(LexicalCategory::Other("Pronoun".to_string()))
        );
        assert_eq!(LexicalCategory::from_label("  "), None);
    }

    #[test]
    fn valid_record_becomes_entry() {
        let entry = DanNetEntry::try_from(raw("11010114", " dyr ", "Noun")).unwrap();
        assert_eq!(entry.id, "11010114");
        assert_eq!(entry.lemma, "dyr");
        assert_eq!(entry.category, LexicalCategory::Noun);
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = DanNetEntry::try_from(raw("1", "", "Noun")).unwrap_err();
        assert_eq!(err.missing, MissingField::Lemma);
        assert_eq!(err.id.as_deref(), Some("1"));

        let mut no_category = raw("2", "hus", "");
        no_category.category = None;
        let err = DanNetEntry::try_from(no_category).unwrap_err();
        assert_eq!(err.missing, MissingField::Category);

        let err = DanNetEntry::try_from(RawRecord::default()).unwrap_err();
        assert_eq!(err.missing, MissingField::Id);
        assert_eq!(err.to_string(), "malformed record <no id>: missing id");
    }

    #[test]
    fn settled_lexemes() {
        let mut lexeme = TargetLexeme {
            id: "L1".to_string(),
            lemma: "hus".to_string(),
            category_qid: "Q1084".to_string(),
            dannet_id: None,
            missing_in_dannet: false,
        };
        assert!(!lexeme.is_settled());

        lexeme.missing_in_dannet = true;
        assert!(lexeme.is_settled());

        lexeme.missing_in_dannet = false;
        lexeme.dannet_id = Some("D1".to_string());
        assert!(lexeme.is_settled());
    }
}
