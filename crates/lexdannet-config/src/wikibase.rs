use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_sparql_url() -> String {
    "https://query.wikidata.org/sparql".to_string()
}

fn default_user_agent() -> String {
    concat!(
        "LexDanNet/",
        env!("CARGO_PKG_VERSION"),
        " (https://www.wikidata.org/wiki/Wikidata:Tools/LexDanNet)"
    )
    .to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> usize {
    500
}

fn default_language_item() -> String {
    "Q9035".to_string()
}

fn default_lemma_language() -> String {
    "da".to_string()
}

fn default_dannet_property() -> String {
    "P6140".to_string()
}

fn default_missing_in_property() -> String {
    "P9660".to_string()
}

fn default_dannet_item() -> String {
    "Q123739672".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WikibaseConfig {
    /// Action API endpoint used for login and edits
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_sparql_url")]
    pub sparql_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Bot password user, e.g. `Name@BotName`
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub bot_password: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Lexemes fetched per SPARQL page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Language item of the lexemes to match (Danish)
    #[serde(default = "default_language_item")]
    pub language_item: String,
    /// Language code of the lemma to match on
    #[serde(default = "default_lemma_language")]
    pub lemma_language: String,
    /// DanNet 2.2 word ID property
    #[serde(default = "default_dannet_property")]
    pub dannet_property: String,
    /// "missing in" property
    #[serde(default = "default_missing_in_property")]
    pub missing_in_property: String,
    /// Item for DanNet 2.2, target of the "missing in" statement
    #[serde(default = "default_dannet_item")]
    pub dannet_item: String,
}

impl Default for WikibaseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            sparql_url: default_sparql_url(),
            user_agent: default_user_agent(),
            username: String::new(),
            bot_password: String::new(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            language_item: default_language_item(),
            lemma_language: default_lemma_language(),
            dannet_property: default_dannet_property(),
            missing_in_property: default_missing_in_property(),
            dannet_item: default_dannet_item(),
        }
    }
}

impl WikibaseConfig {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.bot_password.is_empty()
    }

    pub(crate) fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("WIKIBASE_API_URL") {
            self.api_url = url;
        }
        if let Some(url) = lookup("WIKIBASE_SPARQL_URL") {
            self.sparql_url = url;
        }
        if let Some(agent) = lookup("WIKIBASE_USER_AGENT") {
            self.user_agent = agent;
        }
        if let Some(username) = lookup("WIKIBASE_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("WIKIBASE_BOT_PASSWORD") {
            self.bot_password = password;
        }

        self.timeout_seconds = lookup("HTTP_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.timeout_seconds);

        self.page_size = lookup("PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|size: &usize| *size > 0)
            .unwrap_or(self.page_size);
    }
}
