pub mod types;

pub use types::{AnalyzeResponse, AnswerResponse, Clause, RiskLevel, SessionSnapshot};
