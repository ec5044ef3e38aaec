use serde::{Deserialize, Serialize};

fn default_zip_url() -> String {
    "https://repository.clarin.dk/repository/xmlui/bitstream/handle/20.500.12115/25/DanNet-2.2_owl.zip"
        .to_string()
}

fn default_zip_path() -> String {
    "dannet.zip".to_string()
}

fn default_words_member() -> String {
    "words.rdf".to_string()
}

fn default_pos_member() -> String {
    "part_of_speech.rdf".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DanNetConfig {
    /// Where the DanNet 2.2 OWL archive is published
    #[serde(default = "default_zip_url")]
    pub zip_url: String,
    /// Local copy of the archive; downloaded only when absent
    #[serde(default = "default_zip_path")]
    pub zip_path: String,
    /// Suffix of the archive member holding word forms
    #[serde(default = "default_words_member")]
    pub words_member: String,
    /// Suffix of the archive member holding parts of speech
    #[serde(default = "default_pos_member")]
    pub pos_member: String,
}

impl Default for DanNetConfig {
    fn default() -> Self {
        Self {
            zip_url: default_zip_url(),
            zip_path: default_zip_path(),
            words_member: default_words_member(),
            pos_member: default_pos_member(),
        }
    }
}

impl DanNetConfig {
    pub(crate) fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DANNET_ZIP_URL") {
            self.zip_url = url;
        }
        if let Some(path) = lookup("DANNET_ZIP_PATH") {
            self.zip_path = path;
        }
    }
}
