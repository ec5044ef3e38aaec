mod client;
mod editor;
mod error;
mod sparql;

pub use client::{Session, WikibaseClient};
pub use editor::WikibaseEditor;
pub use error::WikibaseError;
pub use sparql::{SparqlLexemeSource, SparqlResponse, lexeme_page_query, row_to_lexeme};

#[cfg(test)]
mod tests;
