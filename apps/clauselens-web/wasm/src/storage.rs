//! Best-effort session persistence.
//!
//! One record in `sessionStorage` holding the last analyzed document, so a
//! page reload lands back on the analysis view. Absence, quota failures and
//! corrupt snapshots all degrade to "no prior session" — nothing in here
//! can fail startup.

use clauselens_core::DocumentSession;
use shared_types::SessionSnapshot;
use web_sys::Storage;

const STORAGE_KEY: &str = "clauselens_state";

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

/// Persist the snapshot. Failures (private browsing, quota) are ignored.
pub fn save(snapshot: &SessionSnapshot) {
    let Some(storage) = session_storage() else {
        return;
    };
    if let Ok(json) = serde_json::to_string(snapshot) {
        let _ = storage.set_item(STORAGE_KEY, &json);
    }
}

/// Restore the persisted session. `None` on absence, parse failure, or a
/// snapshot without a document, so the caller gets one clear branch instead
/// of error handling threaded through startup.
pub fn restore() -> Option<DocumentSession> {
    let storage = session_storage()?;
    let json = storage.get_item(STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str::<SessionSnapshot>(&json) {
        Ok(snapshot) if !snapshot.document_id.is_empty() && !snapshot.clauses.is_empty() => {
            Some(DocumentSession::from_snapshot(snapshot))
        }
        Ok(_) => None,
        Err(_) => {
            // Drop the corrupt snapshot so the next load starts clean.
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use shared_types::{Clause, RiskLevel};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            document_id: "doc-1".to_string(),
            document_name: "lease.pdf".to_string(),
            clauses: vec![Clause {
                id: 1,
                clause_type: "Termination".to_string(),
                risk: RiskLevel::High,
                original: "7 days notice".to_string(),
                explanation: "وضاحت۔".to_string(),
                note: None,
            }],
        }
    }

    #[wasm_bindgen_test]
    fn test_save_restore_roundtrip() {
        save(&snapshot());
        let restored = restore().expect("saved session restores");
        assert_eq!(restored.document_id, "doc-1");
        assert_eq!(restored.clauses.len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_absent_snapshot_is_no_session() {
        session_storage().unwrap().remove_item(STORAGE_KEY).unwrap();
        assert!(restore().is_none());
    }

    #[wasm_bindgen_test]
    fn test_corrupt_snapshot_degrades_silently() {
        let storage = session_storage().unwrap();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        assert!(restore().is_none());
        // The corrupt record was dropped, not left to fail again.
        assert!(storage.get_item(STORAGE_KEY).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_empty_clause_list_is_no_session() {
        let mut empty = snapshot();
        empty.clauses.clear();
        save(&empty);
        assert!(restore().is_none());
    }
}
