use lexdannet_core::LexemeSource;
use serde_json::{Value, json};

use super::{StubServer, ok, server_error};
use crate::client::WikibaseClient;
use crate::sparql::SparqlLexemeSource;

fn page(ids: &[&str]) -> Value {
    let bindings: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "lexeme": { "type": "uri", "value": format!("http://www.wikidata.org/entity/{id}") },
                "lemma": { "type": "literal", "xml:lang": "da", "value": "hus" },
                "category": { "type": "uri", "value": "http://www.wikidata.org/entity/Q1084" }
            })
        })
        .collect();

    json!({ "head": { "vars": [] }, "results": { "bindings": bindings } })
}

fn ids(page: Option<Vec<lexdannet_types::TargetLexeme>>) -> Vec<String> {
    page.unwrap_or_default().into_iter().map(|l| l.id).collect()
}

fn client_with_page_size(server: &StubServer, page_size: usize) -> WikibaseClient {
    let mut config = server.config();
    config.page_size = page_size;
    WikibaseClient::new(config).unwrap()
}

#[tokio::test]
async fn pages_advance_until_a_short_page() {
    let server = StubServer::start(vec![
        ok(page(&["L1", "L2"])),
        ok(page(&["L3"])),
        ok(page(&["L1", "L2"])),
    ])
    .await;
    let client = client_with_page_size(&server, 2);
    let mut source = SparqlLexemeSource::new(&client);

    assert_eq!(ids(source.next_page().await.unwrap()), ["L1", "L2"]);
    assert_eq!(ids(source.next_page().await.unwrap()), ["L3"]);
    // the short page ended the sequence; no further query is made
    assert!(source.next_page().await.unwrap().is_none());

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /sparql?"));
    assert!(requests[0].contains("LIMIT+2%0AOFFSET+0"));
    assert!(requests[1].contains("LIMIT+2%0AOFFSET+2"));
}

#[tokio::test]
async fn restart_goes_back_to_the_first_page() {
    let server = StubServer::start(vec![ok(page(&["L1"])), ok(page(&["L1"]))]).await;
    let client = client_with_page_size(&server, 2);
    let mut source = SparqlLexemeSource::new(&client);

    assert_eq!(ids(source.next_page().await.unwrap()), ["L1"]);
    assert!(source.next_page().await.unwrap().is_none());

    source.restart();
    assert_eq!(ids(source.next_page().await.unwrap()), ["L1"]);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].contains("OFFSET+0"));
}

#[tokio::test]
async fn empty_page_ends_the_sequence() {
    let server = StubServer::start(vec![ok(page(&["L1", "L2"])), ok(page(&[]))]).await;
    let client = client_with_page_size(&server, 2);
    let mut source = SparqlLexemeSource::new(&client);

    assert_eq!(ids(source.next_page().await.unwrap()), ["L1", "L2"]);
    assert!(source.next_page().await.unwrap().is_none());
    assert!(source.next_page().await.unwrap().is_none());

    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn query_service_error_is_a_request_failure() {
    let server = StubServer::start(vec![server_error()]).await;
    let client = client_with_page_size(&server, 2);
    let mut source = SparqlLexemeSource::new(&client);

    let err = source.next_page().await.unwrap_err();
    assert!(err.message.contains("500"), "got {}", err.message);
}
