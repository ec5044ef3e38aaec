use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Lemmas from both sides go through here before they become index keys
    fn process(&self, lemma: &str) -> String {
        let lemma = lemma.trim();

        if lemma.is_empty() {
            return String::new();
        }

        // Canonical composition, so "å" written as a + ring still matches
        let composed: String = lemma.nfc().collect();

        // Multi-word lemmas: collapse runs of whitespace
        composed.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
