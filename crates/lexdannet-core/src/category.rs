use lexdannet_types::LexicalCategory;

/// Wikidata lexical category items and their DanNet counterparts
const WIKIDATA_CATEGORIES: [(&str, LexicalCategory); 3] = [
    ("Q1084", LexicalCategory::Noun),
    ("Q24905", LexicalCategory::Verb),
    ("Q34698", LexicalCategory::Adjective),
];

/// Translate a Wikidata lexical category item into DanNet's vocabulary
pub fn from_wikidata(qid: &str) -> Option<LexicalCategory> {
    let qid = qid.trim();
    WIKIDATA_CATEGORIES
        .iter()
        .find(|(item, _)| *item == qid)
        .map(|(_, category)| category.clone())
}

pub fn to_wikidata(category: &LexicalCategory) -> Option<&'static str> {
    WIKIDATA_CATEGORIES
        .iter()
        .find(|(_, c)| c == category)
        .map(|(item, _)| *item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_items_translate() {
        assert_eq!(from_wikidata("Q1084"), Some(LexicalCategory::Noun));
        assert_eq!(from_wikidata("Q24905"), Some(LexicalCategory::Verb));
        assert_eq!(from_wikidata("Q34698"), Some(LexicalCategory::Adjective));
    }

    #[test]
    fn unknown_items_do_not() {
        // adverb
        assert_eq!(from_wikidata("Q380057"), None);
        assert_eq!(from_wikidata(""), None);
    }

    #[test]
    fn reverse_mapping() {
        assert_eq!(to_wikidata(&LexicalCategory::Verb), Some("Q24905"));
        assert_eq!(to_wikidata(&LexicalCategory::Other("Pronoun".into())), None);
    }
}
