pub mod types;

pub use types::{
    DanNetEntry, EditRequest, LexicalCategory, MalformedRecord, MatchOutcome, MissingField,
    NoMatchReason, RawRecord, TargetLexeme,
};
