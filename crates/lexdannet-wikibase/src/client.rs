use std::time::Duration;

use lexdannet_config::wikibase::WikibaseConfig;
use serde_json::Value;

use crate::error::WikibaseError;
use crate::sparql::SparqlResponse;

/// Proof of a successful login. Only [`WikibaseClient::login`] creates one,
/// and edits cannot be made without it.
pub struct Session {
    username: String,
    csrf_token: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

pub struct WikibaseClient {
    client: reqwest::Client,
    config: WikibaseConfig,
}

impl WikibaseClient {
    pub fn new(config: WikibaseConfig) -> Result<Self, WikibaseError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WikibaseConfig {
        &self.config
    }

    /// Log in with a bot password and fetch an edit token
    pub async fn login(&self) -> Result<Session, WikibaseError> {
        if !self.config.has_credentials() {
            return Err(WikibaseError::Login(
                "WIKIBASE_USERNAME and WIKIBASE_BOT_PASSWORD must be set".to_string(),
            ));
        }

        let login_token = self.fetch_token("login").await?;

        let response = self
            .api_post(&[
                ("action", "login"),
                ("lgname", self.config.username.as_str()),
                ("lgpassword", self.config.bot_password.as_str()),
                ("lgtoken", login_token.as_str()),
            ])
            .await?;

        let username = check_login(&response)?.unwrap_or_else(|| self.config.username.clone());
        let csrf_token = self.fetch_token("csrf").await?;

        tracing::info!("Logged in to {} as {}", self.config.api_url, username);

        Ok(Session {
            username,
            csrf_token,
        })
    }

    async fn fetch_token(&self, kind: &str) -> Result<String, WikibaseError> {
        let response = self
            .api_get(&[("action", "query"), ("meta", "tokens"), ("type", kind)])
            .await?;

        response["query"]["tokens"][format!("{kind}token")]
            .as_str()
            .map(String::from)
            .ok_or_else(|| WikibaseError::Decode(format!("no {kind} token in response")))
    }

    pub(crate) async fn api_get(&self, params: &[(&str, &str)]) -> Result<Value, WikibaseError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .query(params)
            .query(&[("format", "json"), ("formatversion", "2")])
            .send()
            .await?
            .error_for_status()?;

        check_api_error(response.json().await?)
    }

    pub(crate) async fn api_post(&self, params: &[(&str, &str)]) -> Result<Value, WikibaseError> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.extend([("format", "json"), ("formatversion", "2")]);

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        check_api_error(response.json().await?)
    }

    /// Current statements on an entity, keyed by property
    pub async fn claims(&self, entity_id: &str) -> Result<Value, WikibaseError> {
        let response = self
            .api_get(&[
                ("action", "wbgetentities"),
                ("ids", entity_id),
                ("props", "claims"),
            ])
            .await?;

        let entity = &response["entities"][entity_id];
        if entity.get("missing").is_some() {
            return Err(WikibaseError::Api {
                code: "no-such-entity".to_string(),
                info: format!("{entity_id} does not exist"),
            });
        }

        Ok(entity["claims"].clone())
    }

    /// Add one statement. `value` is the JSON-encoded data value.
    pub async fn create_claim(
        &self,
        session: &Session,
        entity_id: &str,
        property: &str,
        value: &str,
        summary: &str,
    ) -> Result<u64, WikibaseError> {
        let response = self
            .api_post(&[
                ("action", "wbcreateclaim"),
                ("entity", entity_id),
                ("property", property),
                ("snaktype", "value"),
                ("value", value),
                ("summary", summary),
                ("bot", "1"),
                ("token", session.csrf_token()),
            ])
            .await?;

        response["pageinfo"]["lastrevid"]
            .as_u64()
            .ok_or_else(|| WikibaseError::Decode("no revision id after edit".to_string()))
    }

    pub async fn sparql(&self, query: &str) -> Result<SparqlResponse, WikibaseError> {
        let response = self
            .client
            .get(&self.config.sparql_url)
            .query(&[("query", query), ("format", "json")])
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<SparqlResponse>().await?)
    }
}

/// Turn an `{"error": {...}}` body into an error
pub(crate) fn check_api_error(body: Value) -> Result<Value, WikibaseError> {
    if let Some(error) = body.get("error") {
        return Err(WikibaseError::Api {
            code: error["code"].as_str().unwrap_or("unknown").to_string(),
            info: error["info"].as_str().unwrap_or_default().to_string(),
        });
    }
    Ok(body)
}

/// The logged-in user name on success
fn check_login(body: &Value) -> Result<Option<String>, WikibaseError> {
    let login = &body["login"];
    match login["result"].as_str() {
        Some("Success") => Ok(login["lgusername"].as_str().map(String::from)),
        Some(result) => Err(WikibaseError::Login(format!(
            "{result}: {}",
            login["reason"].as_str().unwrap_or("no reason given")
        ))),
        None => Err(WikibaseError::Decode("no login result in response".to_string())),
    }
}

/// Data values of every statement for `property`
pub(crate) fn claim_values<'a>(claims: &'a Value, property: &str) -> Vec<&'a Value> {
    claims[property]
        .as_array()
        .map(|statements| {
            statements
                .iter()
                .filter_map(|s| s["mainsnak"]["datavalue"].get("value"))
                .collect()
        })
        .unwrap_or_default()
}
