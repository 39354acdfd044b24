//! The single mutable view state and the document session it carries.
//!
//! One writer only: the interaction controller. The render layer and the
//! derivation functions read through the accessors and never mutate, which
//! is what makes the lock-free single-thread model of the client sound.

use shared_types::{AnalyzeResponse, Clause, SessionSnapshot};

use crate::filter::{filtered_clauses, RiskFilter};
use crate::report::RiskCounts;
use crate::transcript::Transcript;

/// The navigable pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Analysis,
    Qa,
    Report,
    About,
}

impl Page {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" => Some(Page::Home),
            "analysis" => Some(Page::Analysis),
            "qa" => Some(Page::Qa),
            "report" => Some(Page::Report),
            "about" => Some(Page::About),
            _ => None,
        }
    }

    /// Element-id suffix of the page container (`page-{name}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Analysis => "analysis",
            Page::Qa => "qa",
            Page::Report => "report",
            Page::About => "about",
        }
    }
}

/// The currently loaded analysis result. Replaced wholesale by the next
/// successful analyze call; identity and clauses always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSession {
    pub document_id: String,
    pub document_name: String,
    pub clauses: Vec<Clause>,
}

impl From<AnalyzeResponse> for DocumentSession {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            document_id: response.document_id,
            document_name: response.document_name,
            clauses: response.clauses,
        }
    }
}

impl DocumentSession {
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            document_id: snapshot.document_id,
            document_name: snapshot.document_name,
            clauses: snapshot.clauses,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            document_id: self.document_id.clone(),
            document_name: self.document_name.clone(),
            clauses: self.clauses.clone(),
        }
    }
}

/// Everything currently on screen. The selection cursor is kept as a stable
/// clause id, never a raw position: positions shift whenever the filter or
/// the search text changes the filtered view.
#[derive(Debug, Default)]
pub struct ViewState {
    current_page: Page,
    session: Option<DocumentSession>,
    active_filter: RiskFilter,
    search_query: String,
    selected: Option<u32>,
    transcript: Transcript,
    uploading: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.document_id.as_str())
    }

    pub fn document_name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.document_name.as_str())
    }

    pub fn clauses(&self) -> &[Clause] {
        self.session.as_ref().map(|s| s.clauses.as_slice()).unwrap_or(&[])
    }

    pub fn active_filter(&self) -> RiskFilter {
        self.active_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The filtered view, derived fresh on every call.
    pub fn filtered(&self) -> Vec<&Clause> {
        filtered_clauses(self.clauses(), self.active_filter, &self.search_query)
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    /// Position of the selected clause within the current filtered view.
    /// `None` whenever the view no longer contains it.
    pub fn selection_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.filtered().iter().position(|c| c.id == selected)
    }

    pub fn selected_clause(&self) -> Option<&Clause> {
        let selected = self.selected?;
        self.filtered().into_iter().find(|c| c.id == selected)
    }

    pub fn risk_counts(&self) -> RiskCounts {
        RiskCounts::tally(self.clauses())
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(DocumentSession::snapshot)
    }

    // ── Writes (interaction controller only) ─────────────────────────────

    pub fn show_page(&mut self, page: Page) {
        self.current_page = page;
    }

    /// Install a fresh analysis result: the session is replaced wholesale,
    /// the filter and search reset, the first clause becomes selected and
    /// the transcript is dropped. Applied in resolution order: when two
    /// analyze calls overlap, whichever resolves last wins.
    pub fn apply_analysis(&mut self, response: AnalyzeResponse) -> usize {
        self.install(response.into())
    }

    /// Same resets as [`ViewState::apply_analysis`], for a session restored
    /// from persistence.
    pub fn restore_session(&mut self, session: DocumentSession) -> usize {
        self.install(session)
    }

    fn install(&mut self, session: DocumentSession) -> usize {
        let count = session.clauses.len();
        self.selected = session.clauses.first().map(|c| c.id);
        self.session = Some(session);
        self.active_filter = RiskFilter::All;
        self.search_query.clear();
        self.transcript.clear();
        count
    }

    pub fn set_filter(&mut self, filter: RiskFilter) {
        self.active_filter = filter;
        self.reconcile_selection();
    }

    /// Normalize and store the search text (lower-cased, trimmed; empty
    /// means no filter).
    pub fn set_search(&mut self, raw: &str) {
        self.search_query = raw.trim().to_lowercase();
        self.reconcile_selection();
    }

    /// Select a clause by its stable id. Ignored when the clause is not in
    /// the current filtered view.
    pub fn select(&mut self, id: u32) -> bool {
        if self.filtered().iter().any(|c| c.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Move the selection within the filtered view, clamped to its ends.
    /// Starts from the top when nothing is selected. Returns the id that
    /// ends up selected.
    pub fn navigate(&mut self, delta: i32) -> Option<u32> {
        let filtered_ids: Vec<u32> = self.filtered().iter().map(|c| c.id).collect();
        if filtered_ids.is_empty() {
            return None;
        }
        let current = self.selection_index().unwrap_or(0) as i32;
        let target = (current + delta).clamp(0, filtered_ids.len() as i32 - 1) as usize;
        self.selected = Some(filtered_ids[target]);
        self.selected
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    /// Re-resolve the selection by id after the filtered view changed. A
    /// clause no longer visible is deselected rather than silently remapped
    /// to whatever now sits at its old position.
    fn reconcile_selection(&mut self) {
        if let Some(selected) = self.selected {
            if !self.filtered().iter().any(|c| c.id == selected) {
                self.selected = None;
            }
        }
    }
}
