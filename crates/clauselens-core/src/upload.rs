//! Local validation of user-selected upload files.
//!
//! Violations are terminal: the controller shows the error and never
//! touches the network.

use crate::error::UploadError;

/// Accepted file extensions, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Check a candidate upload against the extension allow-list and the size
/// ceiling. Only the file's name and byte size are inspected; content stays
/// opaque to this layer.
pub fn validate_upload(file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    if !ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| extension.eq_ignore_ascii_case(allowed))
    {
        return Err(UploadError::UnsupportedType);
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}
