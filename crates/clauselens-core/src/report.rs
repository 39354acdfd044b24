//! Derived render inputs for the summary header and the tabular report.
//!
//! The report always covers the whole document, independent of the active
//! filter; only the clause list and detail cards follow the filtered view.

use shared_types::{Clause, RiskLevel};

/// Clause count per risk band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub safe: usize,
}

impl RiskCounts {
    pub fn tally(clauses: &[Clause]) -> Self {
        let mut counts = RiskCounts::default();
        for clause in clauses {
            match clause.risk {
                RiskLevel::High => counts.high += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::Safe => counts.safe += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.safe
    }
}

/// One row of the tabular report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportRow {
    pub id: u32,
    #[serde(rename = "type")]
    pub clause_type: String,
    /// Lead sentence of the explanation, "-" when there is none.
    pub summary: String,
    pub risk: RiskLevel,
}

/// Build one row per clause of the unfiltered document, in document order.
pub fn report_rows(clauses: &[Clause]) -> Vec<ReportRow> {
    clauses
        .iter()
        .map(|clause| ReportRow {
            id: clause.id,
            clause_type: clause.clause_type.clone(),
            summary: lead_sentence(&clause.explanation),
            risk: clause.risk,
        })
        .collect()
}

fn lead_sentence(text: &str) -> String {
    let lead = text.split('.').next().unwrap_or("").trim();
    if lead.is_empty() {
        "-".to_string()
    } else {
        format!("{lead}.")
    }
}
