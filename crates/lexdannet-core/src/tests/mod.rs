
use std::collections::HashSet;
use std::sync::Mutex;

use lexdannet_types::{DanNetEntry, EditRequest, LexicalCategory, TargetLexeme};

use crate::error::ExternalRequestFailure;
use crate::matcher::{EditOutcome, Editor, LexemeSource};

pub(crate) fn entry(id: &str, lemma: &str, category: LexicalCategory) -> DanNetEntry {
    DanNetEntry {
        id: id.to_string(),
        lemma: lemma.to_string(),
        category,
    }
}

pub(crate) fn lexeme(id: &str, lemma: &str, category_qid: &str) -> TargetLexeme {
    TargetLexeme {
        id: id.to_string(),
        lemma: lemma.to_string(),
        category_qid: category_qid.to_string(),
        dannet_id: None,
        missing_in_dannet: false,
    }
}

/// In-memory pages, optionally failing when asked for page `fail_at`
pub(crate) struct PagedSource {
    pages: Vec<Vec<TargetLexeme>>,
    next: usize,
    fail_at: Option<usize>,
}

impl PagedSource {
    pub(crate) fn new(pages: Vec<Vec<TargetLexeme>>) -> Self {
        Self {
            pages,
            next: 0,
            fail_at: None,
        }
    }

    pub(crate) fn failing_at(mut self, page: usize) -> Self {
        self.fail_at = Some(page);
        self
    }
}

#[async_trait::async_trait]
impl LexemeSource for PagedSource {
    async fn next_page(&mut self) -> Result<Option<Vec<TargetLexeme>>, ExternalRequestFailure> {
        if self.fail_at == Some(self.next) {
            return Err(ExternalRequestFailure::new("query service timed out"));
        }
        let page = self.pages.get(self.next).cloned();
        self.next += 1;
        Ok(page)
    }

    fn restart(&mut self) {
        self.next = 0;
    }
}

/// Records every request; fails for the listed lexeme ids
#[derive(Default)]
pub(crate) struct RecordingEditor {
    pub(crate) requests: Mutex<Vec<EditRequest>>,
    fail_for: HashSet<String>,
    present_for: HashSet<String>,
}

impl RecordingEditor {
    pub(crate) fn failing_for(ids: &[&str]) -> Self {
        Self {
            fail_for: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn already_present_for(ids: &[&str]) -> Self {
        Self {
            present_for: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<EditRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Editor for RecordingEditor {
    async fn submit(&self, request: &EditRequest) -> Result<EditOutcome, ExternalRequestFailure> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_for.contains(request.lexeme_id()) {
            return Err(ExternalRequestFailure::new("badtoken: Invalid CSRF token"));
        }
        if self.present_for.contains(request.lexeme_id()) {
            return Ok(EditOutcome::AlreadyPresent);
        }
        Ok(EditOutcome::Applied)
    }
}
