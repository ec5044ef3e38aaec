use lexdannet_config::wikibase::WikibaseConfig;
use lexdannet_core::{EditOutcome, Editor, ExternalRequestFailure};
use lexdannet_types::EditRequest;
use serde_json::{Value, json};

use crate::client::{Session, WikibaseClient, claim_values};
use crate::error::WikibaseError;

const TOOL_PAGE: &str = "[[Wikidata:Tools/LexDanNet]]";

/// Writes match results to Wikibase on behalf of a logged-in session
pub struct WikibaseEditor<'a> {
    client: &'a WikibaseClient,
    session: Session,
}

/// The statement an edit request turns into
#[derive(Debug, PartialEq)]
struct Statement {
    property: String,
    /// JSON-encoded data value, as `wbcreateclaim` expects it
    value: String,
    summary: String,
}

fn item_numeric_id(item: &str) -> Result<u64, WikibaseError> {
    item.strip_prefix('Q')
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| WikibaseError::InvalidItem(item.to_string()))
}

fn statement_for(
    config: &WikibaseConfig,
    request: &EditRequest,
) -> Result<Statement, WikibaseError> {
    match request {
        EditRequest::AttachIdentifier { dannet_id, .. } => Ok(Statement {
            property: config.dannet_property.clone(),
            value: Value::String(dannet_id.clone()).to_string(),
            summary: format!(
                "Added [[Property:{}]] using {TOOL_PAGE}",
                config.dannet_property
            ),
        }),
        EditRequest::MarkMissing { .. } => {
            let numeric_id = item_numeric_id(&config.dannet_item)?;
            Ok(Statement {
                property: config.missing_in_property.clone(),
                value: json!({ "entity-type": "item", "numeric-id": numeric_id }).to_string(),
                summary: format!(
                    "Added [[Property:{}]]->[[{}]] using {TOOL_PAGE}",
                    config.missing_in_property, config.dannet_item
                ),
            })
        }
    }
}

/// Whether the entity's current statements already settle it
///
/// A lexeme that gained a DanNet ID or a "missing in DanNet" marker since the
/// query snapshot gets neither a second ID nor the opposite statement.
fn already_settled(config: &WikibaseConfig, claims: &Value) -> bool {
    let has_dannet_id = !claim_values(claims, &config.dannet_property).is_empty();
    let marked_missing = claim_values(claims, &config.missing_in_property)
        .iter()
        .any(|v| v["id"].as_str() == Some(config.dannet_item.as_str()));

    has_dannet_id || marked_missing
}

impl<'a> WikibaseEditor<'a> {
    pub fn new(client: &'a WikibaseClient, session: Session) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn apply(&self, request: &EditRequest) -> Result<EditOutcome, WikibaseError> {
        let config = self.client.config();
        let lexeme_id = request.lexeme_id();

        // The query service lags behind edits; check the live entity first
        let claims = self.client.claims(lexeme_id).await?;
        if already_settled(config, &claims) {
            tracing::debug!("{lexeme_id} was settled since the query snapshot");
            return Ok(EditOutcome::AlreadyPresent);
        }

        let statement = statement_for(config, request)?;
        let revision = self
            .client
            .create_claim(
                &self.session,
                lexeme_id,
                &statement.property,
                &statement.value,
                &statement.summary,
            )
            .await?;

        tracing::debug!("{lexeme_id}: {} saved as revision {revision}", statement.property);
        Ok(EditOutcome::Applied)
    }
}

#[async_trait::async_trait]
impl Editor for WikibaseEditor<'_> {
    async fn submit(&self, request: &EditRequest) -> Result<EditOutcome, ExternalRequestFailure> {
        Ok(self.apply(request).await?)
    }
}
