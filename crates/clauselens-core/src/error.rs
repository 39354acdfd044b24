use thiserror::Error;

/// Local upload validation failures. Detected synchronously, before any
/// network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Unsupported file type. Use PDF, DOC, DOCX, or TXT.")]
    UnsupportedType,
    #[error("File exceeds 10MB limit.")]
    TooLarge,
}

/// Failures surfaced by the analysis gateway. Every variant's `Display`
/// text is shown to the user as-is; the controller converts all of these
/// into transient notices and never lets one escape an event handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Ask or report attempted with no document loaded. Local precondition,
    /// never reaches the network.
    #[error("No document loaded. Upload a document first.")]
    NoDocument,
    /// Transport-level failure: the service could not be reached at all.
    #[error("Cannot reach the analysis service. Is it running? ({0})")]
    Unreachable(String),
    /// The service answered with a non-success status. `message` carries the
    /// body's `detail`/`message` field when present, else the status code.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A success status with a body that does not match the contract.
    #[error("Unexpected response from the analysis service: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            UploadError::TooLarge.to_string(),
            "File exceeds 10MB limit."
        );
        assert_eq!(
            GatewayError::NoDocument.to_string(),
            "No document loaded. Upload a document first."
        );
        let rejected = GatewayError::Rejected {
            status: 500,
            message: "HTTP 500".into(),
        };
        assert_eq!(rejected.to_string(), "HTTP 500");
    }

    #[test]
    fn test_local_precondition_is_distinguishable() {
        // The no-document case must not be mistaken for a network failure.
        let local = GatewayError::NoDocument;
        let transport = GatewayError::Unreachable("connection refused".into());
        assert_ne!(local, transport);
    }
}
