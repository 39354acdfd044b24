//! Core state and derivation logic for the clauselens review client.
//!
//! Everything here is synchronous and DOM-free: the single mutable
//! [`ViewState`], the pure filtered-view derivation, the chat transcript,
//! upload validation, report-row derivation, and the deterministic
//! simulation dataset. The browser crate (`apps/clauselens-web/wasm`)
//! layers rendering and network I/O on top and is this crate's only
//! writer at runtime.

pub mod demo;
pub mod error;
pub mod filter;
pub mod report;
pub mod state;
pub mod transcript;
pub mod upload;

pub use error::{GatewayError, UploadError};
pub use filter::{filtered_clauses, RiskFilter};
pub use report::{report_rows, ReportRow, RiskCounts};
pub use state::{DocumentSession, Page, ViewState};
pub use transcript::{ChatMessage, ChatRole, MessageBody, MessageId, Transcript};
pub use upload::{validate_upload, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
