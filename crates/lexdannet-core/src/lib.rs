pub mod category;
pub mod error;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod preprocess;

pub use error::{DatasetError, ExternalRequestFailure};
pub use index::LemmaIndex;
pub use loader::{DumpSource, LoadReport, build_index, load_index};
pub use matcher::{
    AmbiguousLexeme, EditOutcome, Editor, LexemeSource, Matcher, RequestFailure, RunReport,
};

#[cfg(test)]
mod tests;
