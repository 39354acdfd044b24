//! Wire and display types shared between the core state crate and the
//! browser client. Field renames track the analysis service's JSON shape.

/// Risk band assigned to a clause by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Safe,
}

impl RiskLevel {
    /// Parse a risk band from its wire/filter-button name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(RiskLevel::High),
            "medium" => Some(RiskLevel::Medium),
            "safe" => Some(RiskLevel::Safe),
            _ => None,
        }
    }

    /// Indicator icon shown next to a clause
    pub fn icon(&self) -> &'static str {
        match self {
            RiskLevel::High => "🔴",
            RiskLevel::Medium => "🟡",
            RiskLevel::Safe => "🟢",
        }
    }

    /// Badge text shown on risk tags and pills
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "⚠ High Risk",
            RiskLevel::Medium => "⚡ Medium Risk",
            RiskLevel::Safe => "✓ Safe",
        }
    }

    /// CSS class used by the risk-colored markup
    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Safe => "safe",
        }
    }
}

/// One extracted unit of contract text with an assigned risk level and a
/// plain-language explanation. Immutable once received; owned by the
/// document session it arrived with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub id: u32,
    #[serde(rename = "type")]
    pub clause_type: String,
    pub risk: RiskLevel,
    /// Source-language clause text as it appears in the contract
    pub original: String,
    /// Urdu plain-language explanation
    #[serde(rename = "urdu")]
    pub explanation: String,
    /// Short advisory for risky clauses. Observed absent on safe clauses in
    /// sample data, but the service does not guarantee that correlation.
    #[serde(rename = "tooltip", default)]
    pub note: Option<String>,
}

/// Body of a successful analyze call.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalyzeResponse {
    pub document_id: String,
    pub document_name: String,
    pub clauses: Vec<Clause>,
}

/// Body of a successful ask call. Everything beyond the primary answer is
/// optional and renders as omitted when absent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
    pub answer_en: String,
    #[serde(default)]
    pub answer_ur: Option<String>,
    #[serde(default)]
    pub source_clause: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Persisted layout of the last analyzed document (session-scoped,
/// best-effort). Key casing matches the stored record.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "documentId")]
    pub document_id: String,
    #[serde(rename = "documentName")]
    pub document_name: String,
    pub clauses: Vec<Clause>,
}
