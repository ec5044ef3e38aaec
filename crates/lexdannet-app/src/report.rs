use std::fmt;

use lexdannet_core::{LoadReport, RunReport};

/// End-of-run summary: what was done, then non-fatal problems per kind
pub struct Summary<'a> {
    pub load: &'a LoadReport,
    pub run: &'a RunReport,
    pub dry_run: bool,
}

impl Summary<'_> {
    /// Non-fatal problem counts: malformed records, untranslatable categories, failed requests
    pub fn problem_counts(&self) -> (usize, usize, usize) {
        let request_failures =
            self.run.failures.len() + usize::from(self.run.interrupted.is_some());
        (self.load.skipped(), self.run.untranslatable, request_failures)
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run = self.run;
        let (malformed, untranslatable, failures) = self.problem_counts();

        writeln!(f, "DanNet entries loaded:        {}", self.load.loaded)?;
        writeln!(f, "Lexemes classified:           {}", run.processed)?;
        writeln!(f, "Lexemes already settled:      {}", run.skipped)?;

        if self.dry_run {
            let (attach, missing): (Vec<_>, Vec<_>) = run.planned.iter().partition(|r| {
                matches!(r, lexdannet_types::EditRequest::AttachIdentifier { .. })
            });
            writeln!(f, "Would attach DanNet ID:       {}", attach.len())?;
            writeln!(f, "Would mark missing:           {}", missing.len())?;
        } else {
            writeln!(f, "DanNet ID attached:           {}", run.attached)?;
            writeln!(f, "Marked missing in DanNet:     {}", run.marked_missing)?;
            writeln!(f, "Already present on Wikidata:  {}", run.already_present)?;
        }

        writeln!(f, "Ambiguous (left alone):       {}", run.ambiguous.len())?;
        writeln!(f)?;
        writeln!(f, "Malformed DanNet records:     {malformed}")?;
        writeln!(f, "Untranslatable categories:    {untranslatable}")?;
        writeln!(f, "Failed requests:              {failures}")?;

        if !run.ambiguous.is_empty() {
            writeln!(f)?;
            writeln!(f, "Ambiguous lexemes:")?;
            for a in &run.ambiguous {
                writeln!(f, "  {} '{}': {}", a.lexeme_id, a.lemma, a.candidates.join(", "))?;
            }
        }

        if !run.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed edits:")?;
            for failure in &run.failures {
                writeln!(f, "  {}: {}", failure.request.lexeme_id(), failure.error)?;
            }
        }

        if let Some(reason) = &run.interrupted {
            writeln!(f)?;
            writeln!(f, "Run interrupted: {reason}")?;
        }

        Ok(())
    }
}
