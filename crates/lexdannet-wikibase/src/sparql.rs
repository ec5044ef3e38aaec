use std::collections::HashMap;

use lexdannet_config::wikibase::WikibaseConfig;
use lexdannet_core::{ExternalRequestFailure, LexemeSource};
use lexdannet_types::TargetLexeme;
use serde::Deserialize;

use crate::client::WikibaseClient;

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlValue {
    pub value: String,
}

/// `http://www.wikidata.org/entity/L42` -> `L42`
pub fn strip_entity_uri(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// One page of the language's lexemes, with their DanNet state
///
/// All lexemes of the language are listed, linked or not, so that the result
/// set does not shift under OFFSET while the run is adding statements.
pub fn lexeme_page_query(config: &WikibaseConfig, limit: usize, offset: usize) -> String {
    format!(
        r#"SELECT ?lexeme ?lemma ?category (SAMPLE(?dannet) AS ?dannetId) (SAMPLE(?marked) AS ?markedMissing) WHERE {{
  ?lexeme dct:language wd:{language};
          wikibase:lemma ?lemma;
          wikibase:lexicalCategory ?category.
  FILTER(LANG(?lemma) = "{lemma_language}")
  OPTIONAL {{ ?lexeme wdt:{dannet_property} ?dannet. }}
  BIND(EXISTS {{ ?lexeme wdt:{missing_in_property} wd:{dannet_item}. }} AS ?marked)
}}
GROUP BY ?lexeme ?lemma ?category
ORDER BY ?lexeme
LIMIT {limit}
OFFSET {offset}"#,
        language = config.language_item,
        lemma_language = config.lemma_language,
        dannet_property = config.dannet_property,
        missing_in_property = config.missing_in_property,
        dannet_item = config.dannet_item,
    )
}

/// Decode one result row. Rows without lexeme, lemma or category are dropped.
pub fn row_to_lexeme(row: &HashMap<String, SparqlValue>) -> Option<TargetLexeme> {
    let id = strip_entity_uri(&row.get("lexeme")?.value).to_string();
    let lemma = row.get("lemma")?.value.clone();
    let category_qid = strip_entity_uri(&row.get("category")?.value).to_string();

    let dannet_id = row
        .get("dannetId")
        .map(|v| v.value.trim().to_string())
        .filter(|v| !v.is_empty());

    let missing_in_dannet = row
        .get("markedMissing")
        .is_some_and(|v| matches!(v.value.as_str(), "true" | "1"));

    Some(TargetLexeme {
        id,
        lemma,
        category_qid,
        dannet_id,
        missing_in_dannet,
    })
}

/// Pages through the language's lexemes on the query service
pub struct SparqlLexemeSource<'a> {
    client: &'a WikibaseClient,
    page_size: usize,
    offset: usize,
    exhausted: bool,
}

impl<'a> SparqlLexemeSource<'a> {
    pub fn new(client: &'a WikibaseClient) -> Self {
        Self {
            client,
            page_size: client.config().page_size.max(1),
            offset: 0,
            exhausted: false,
        }
    }
}

#[async_trait::async_trait]
impl LexemeSource for SparqlLexemeSource<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<TargetLexeme>>, ExternalRequestFailure> {
        if self.exhausted {
            return Ok(None);
        }

        let query = lexeme_page_query(self.client.config(), self.page_size, self.offset);
        tracing::debug!("Fetching lexemes {}..{}", self.offset, self.offset + self.page_size);

        let response = self.client.sparql(&query).await?;
        let rows = response.results.bindings;

        if rows.len() < self.page_size {
            self.exhausted = true;
        }
        self.offset += rows.len();

        if rows.is_empty() {
            return Ok(None);
        }

        let lexemes: Vec<TargetLexeme> = rows.iter().filter_map(row_to_lexeme).collect();
        if lexemes.len() < rows.len() {
            tracing::warn!("Dropped {} incomplete lexeme rows", rows.len() - lexemes.len());
        }

        tracing::info!("Fetched {} lexemes (offset {})", lexemes.len(), self.offset);
        Ok(Some(lexemes))
    }

    fn restart(&mut self) {
        self.offset = 0;
        self.exhausted = false;
    }
}
