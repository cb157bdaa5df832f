//! Pass/fail tallies of a persisted report

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write as _;
use verity_report::ReportDocument;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Tally {
    pub(crate) passed: usize,
    pub(crate) failed: usize,
}

impl Tally {
    fn add(&mut self, success: bool) {
        if success {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Summary {
    pub(crate) title: String,
    pub(crate) timestamp: String,
    pub(crate) total: usize,
    #[serde(flatten)]
    pub(crate) overall: Tally,
    pub(crate) labels: IndexMap<String, Tally>,
}

impl Summary {
    pub(crate) fn of(doc: &ReportDocument) -> Self {
        let mut overall = Tally::default();
        let mut labels: IndexMap<String, Tally> = IndexMap::new();

        for record in &doc.results {
            let success = record.is_success();
            overall.add(success);
            for label in record.labels.iter() {
                labels.entry(label.to_string()).or_default().add(success);
            }
        }

        Self {
            title: doc.details.title.clone(),
            timestamp: doc.timestamp.clone(),
            total: doc.results.len(),
            overall,
            labels,
        }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Report: {} ({})", self.title, self.timestamp);
        let _ = writeln!(
            out,
            "Results: {} ({} passed, {} failed)",
            self.total, self.overall.passed, self.overall.failed
        );
        if self.labels.is_empty() {
            return out;
        }

        let width = self
            .labels
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("Label".len());
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<width$}  {:>6}  {:>6}", "Label", "Passed", "Failed");
        for (label, tally) in &self.labels {
            let _ = writeln!(
                out,
                "{label:<width$}  {:>6}  {:>6}",
                tally.passed, tally.failed
            );
        }
        out
    }
}
