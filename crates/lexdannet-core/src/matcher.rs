use lexdannet_types::{EditRequest, MatchOutcome, NoMatchReason, TargetLexeme};
use serde::Serialize;

use crate::category;
use crate::error::ExternalRequestFailure;
use crate::index::LemmaIndex;

/// Paged, restartable supply of lexemes to match
#[async_trait::async_trait]
pub trait LexemeSource: Send {
    /// Next page, or `None` once the sequence is exhausted
    async fn next_page(&mut self) -> Result<Option<Vec<TargetLexeme>>, ExternalRequestFailure>;

    /// Start over from the first page
    fn restart(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The knowledge base already had the statement; nothing was written
    AlreadyPresent,
}

/// Authenticated write access to the knowledge base
#[async_trait::async_trait]
pub trait Editor: Send + Sync {
    async fn submit(&self, request: &EditRequest) -> Result<EditOutcome, ExternalRequestFailure>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousLexeme {
    pub lexeme_id: String,
    pub lemma: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestFailure {
    pub request: EditRequest,
    pub error: String,
}

/// Everything a matcher run did, for the end-of-run summary
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Lexemes classified (settled ones excluded)
    pub processed: usize,
    /// Already linked or marked missing
    pub skipped: usize,
    pub attached: usize,
    pub marked_missing: usize,
    pub already_present: usize,
    pub untranslatable: usize,
    pub ambiguous: Vec<AmbiguousLexeme>,
    pub failures: Vec<RequestFailure>,
    /// Requests that would have been sent, in dry-run mode
    pub planned: Vec<EditRequest>,
    /// Set when paging stopped early
    pub interrupted: Option<String>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

/// Classifies lexemes against the lemma index and submits the resulting edits
///
/// Without an editor the matcher runs dry: requests are planned and reported
/// but never sent.
pub struct Matcher<'a> {
    index: &'a LemmaIndex,
    editor: Option<&'a dyn Editor>,
    limit: Option<usize>,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a LemmaIndex) -> Self {
        Self {
            index,
            editor: None,
            limit: None,
        }
    }

    pub fn with_editor(mut self, editor: &'a dyn Editor) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.editor.is_none()
    }

    pub fn classify(&self, lexeme: &TargetLexeme) -> MatchOutcome {
        let Some(category) = category::from_wikidata(&lexeme.category_qid) else {
            return MatchOutcome::NoMatch(NoMatchReason::CategoryUntranslatable);
        };

        let candidates = self.index.candidates(&lexeme.lemma, &category);
        match candidates.as_slice() {
            [] => MatchOutcome::NoMatch(NoMatchReason::NotInDanNet),
            [only] => MatchOutcome::Unique(only.id.clone()),
            many => MatchOutcome::Ambiguous(many.iter().map(|e| e.id.clone()).collect()),
        }
    }

    /// The request an outcome calls for, if any
    pub fn plan(lexeme: &TargetLexeme, outcome: &MatchOutcome) -> Option<EditRequest> {
        match outcome {
            MatchOutcome::Unique(dannet_id) => Some(EditRequest::AttachIdentifier {
                lexeme_id: lexeme.id.clone(),
                dannet_id: dannet_id.clone(),
            }),
            MatchOutcome::NoMatch(NoMatchReason::NotInDanNet) => Some(EditRequest::MarkMissing {
                lexeme_id: lexeme.id.clone(),
            }),
            MatchOutcome::NoMatch(NoMatchReason::CategoryUntranslatable)
            | MatchOutcome::Ambiguous(_) => None,
        }
    }

    /// Handle one lexeme. Returns false if it was skipped as already settled.
    pub async fn process(&self, lexeme: &TargetLexeme, report: &mut RunReport) -> bool {
        if lexeme.is_settled() {
            tracing::debug!("{} already settled, skipping", lexeme.id);
            report.skipped += 1;
            return false;
        }

        report.processed += 1;
        let outcome = self.classify(lexeme);

        match &outcome {
            MatchOutcome::Ambiguous(candidates) => {
                tracing::info!(
                    "{} '{}' matches {} DanNet entries, leaving it alone",
                    lexeme.id,
                    lexeme.lemma,
                    candidates.len()
                );
                report.ambiguous.push(AmbiguousLexeme {
                    lexeme_id: lexeme.id.clone(),
                    lemma: lexeme.lemma.clone(),
                    candidates: candidates.clone(),
                });
            }
            MatchOutcome::NoMatch(NoMatchReason::CategoryUntranslatable) => {
                tracing::debug!(
                    "{} has lexical category {} with no DanNet counterpart",
                    lexeme.id,
                    lexeme.category_qid
                );
                report.untranslatable += 1;
            }
            _ => {}
        }

        let Some(request) = Self::plan(lexeme, &outcome) else {
            return true;
        };

        let Some(editor) = self.editor else {
            tracing::info!("[dry run] {:?}", request);
            report.planned.push(request);
            return true;
        };

        let result = editor.submit(&request).await;
        match result {
            Ok(EditOutcome::Applied) => match &request {
                EditRequest::AttachIdentifier { dannet_id, .. } => {
                    tracing::info!(
                        "Linked {} '{}' to DanNet {}",
                        lexeme.id,
                        lexeme.lemma,
                        dannet_id
                    );
                    report.attached += 1;
                }
                EditRequest::MarkMissing { .. } => {
                    tracing::info!("Marked {} '{}' as missing in DanNet", lexeme.id, lexeme.lemma);
                    report.marked_missing += 1;
                }
            },
            Ok(EditOutcome::AlreadyPresent) => {
                tracing::info!("{} already carries the statement, nothing written", lexeme.id);
                report.already_present += 1;
            }
            Err(e) => {
                tracing::error!("Edit on {} failed: {e}", lexeme.id);
                report.failures.push(RequestFailure {
                    request,
                    error: e.message,
                });
            }
        }

        true
    }

    /// Walk the source from its first page and handle every lexeme
    pub async fn run(&self, source: &mut dyn LexemeSource) -> RunReport {
        let mut report = RunReport::default();
        source.restart();

        loop {
            let page = match source.next_page().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Fetching lexemes failed, stopping: {e}");
                    report.interrupted = Some(e.message);
                    break;
                }
            };

            tracing::debug!("Got a page of {} lexemes", page.len());

            for lexeme in &page {
                if self.limit.is_some_and(|limit| report.processed >= limit) {
                    tracing::info!("Reached limit of {} lexemes", report.processed);
                    return report;
                }
                self.process(lexeme, &mut report).await;
            }
        }

        report
    }
}
