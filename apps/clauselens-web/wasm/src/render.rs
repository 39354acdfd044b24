//! Render layer: idempotent repaints of each screen region.
//!
//! Every method rebuilds its region from the current [`ViewState`]: calling
//! one twice with unchanged state produces the same markup, and calling one
//! after a state change leaves nothing behind from the previous state. No
//! method here mutates state; the interaction controller is the only
//! writer.

use clauselens_core::{report_rows, ChatMessage, ChatRole, MessageBody, Page, RiskFilter, ViewState};
use shared_types::Clause;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

/// Urdu fallback line shown under a failed answer.
const ANSWER_FAILED_UR: &str = "جواب حاصل نہیں ہو سکا۔ دوبارہ کوشش کریں۔";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

pub struct Renderer {
    document: Document,
}

impl Renderer {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window object available"))?
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Ok(Self { document })
    }

    // ── Page visibility ──────────────────────────────────────────────────

    /// Show exactly one page container; navigation never touches session
    /// data, only which surfaces are visible.
    pub fn page(&self, page: Page) {
        self.for_each(".page", |el| {
            let _ = el.class_list().remove_1("active");
        });
        if let Some(target) = self.document.get_element_by_id(&format!("page-{}", page.as_str())) {
            let _ = target.class_list().add_1("active");
        }
    }

    // ── Document summary ─────────────────────────────────────────────────

    /// Document name, clause counts per risk band, report header counters
    /// and the Q&A sidebar meta.
    pub fn summary(&self, state: &ViewState) {
        let counts = state.risk_counts();
        let name = state.document_name().unwrap_or("Document");
        let meta = format!(
            "{} clauses · {} high risk · {} medium risk",
            counts.total(),
            counts.high,
            counts.medium
        );

        self.set_text("doc-name-display", name);
        self.set_text("doc-meta-display", &meta);
        self.set_text("report-doc-name", &display_stem(name));
        self.set_text("report-total", &counts.total().to_string());
        self.set_text("report-total-2", &counts.total().to_string());
        self.set_text("report-high", &counts.high.to_string());
        self.set_text("report-med", &counts.medium.to_string());
        self.set_text("report-safe", &counts.safe.to_string());
        self.set_text("report-date", &today());

        self.set_text("qa-doc-name-live", name);
        self.set_text(
            "qa-doc-stat-live",
            &format!(
                "{} clauses · {} high risk · {} medium",
                counts.total(),
                counts.high,
                counts.medium
            ),
        );
    }

    // ── Clause list ──────────────────────────────────────────────────────

    /// One entry per filtered clause, in filtered order; an empty state
    /// when nothing matches.
    pub fn clause_list(&self, state: &ViewState) {
        let Some(container) = self.document.get_element_by_id("clause-list") else {
            return;
        };
        container.set_inner_html("");

        let filtered = state.filtered();
        if filtered.is_empty() {
            container.set_inner_html(
                r#"<div class="empty-state"><div class="empty-state-icon">🔍</div>No clauses match your filter.</div>"#,
            );
            return;
        }

        for clause in filtered {
            let Ok(entry) = self.document.create_element("div") else {
                continue;
            };
            let selected = state.selected_id() == Some(clause.id);
            entry.set_class_name(if selected { "clause-orig selected" } else { "clause-orig" });
            let _ = entry.set_attribute("data-clause-id", &clause.id.to_string());
            entry.set_inner_html(&clause_entry_markup(clause));
            let _ = container.append_child(&entry);
        }
    }

    // ── Detail cards ─────────────────────────────────────────────────────

    /// One card per filtered clause, same order as the list.
    pub fn cards(&self, state: &ViewState) {
        let Some(container) = self.document.get_element_by_id("analysis-cards") else {
            return;
        };
        container.set_inner_html("");

        for clause in state.filtered() {
            let Ok(card) = self.document.create_element("div") else {
                continue;
            };
            card.set_class_name("analysis-card");
            card.set_id(&format!("card-{}", clause.id));
            card.set_inner_html(&card_markup(clause));
            let _ = container.append_child(&card);
        }
    }

    // ── Tabular report ───────────────────────────────────────────────────

    /// One row per clause of the whole document, independent of the active
    /// filter.
    pub fn report_table(&self, state: &ViewState) {
        let Some(tbody) = self.document.get_element_by_id("report-tbody") else {
            return;
        };
        let rows: String = report_rows(state.clauses())
            .iter()
            .map(|row| {
                format!(
                    r#"<tr><td>{id:02}</td><td>{clause_type}</td><td class="urdu-cell">{summary}</td><td><span class="risk-badge-sm {risk}">{label}</span></td></tr>"#,
                    id = row.id,
                    clause_type = escape_html(&row.clause_type),
                    summary = escape_html(&row.summary),
                    risk = row.risk.css_class(),
                    label = row.risk.label(),
                )
            })
            .collect();
        tbody.set_inner_html(&rows);
    }

    // ── Selection highlight ──────────────────────────────────────────────

    /// Mark exactly one list entry and its matching card as selected; the
    /// previous highlight is always cleared first. Resolution is by stable
    /// clause id, because positions shift under filtering and search.
    pub fn selection(&self, state: &ViewState) {
        self.for_each(".clause-orig", |el| {
            let _ = el.class_list().remove_1("selected");
        });
        self.for_each(".analysis-card", |el| {
            let _ = el.class_list().remove_1("card-highlight");
        });

        let Some(id) = state.selected_id() else {
            return;
        };
        let selector = format!("[data-clause-id=\"{id}\"]");
        if let Ok(Some(entry)) = self.document.query_selector(&selector) {
            let _ = entry.class_list().add_1("selected");
        }
        if let Some(card) = self.document.get_element_by_id(&format!("card-{id}")) {
            let _ = card.class_list().add_1("card-highlight");
            card.scroll_into_view();
        }
    }

    // ── Filter buttons ───────────────────────────────────────────────────

    pub fn filter_buttons(&self, filter: RiskFilter) {
        self.for_each(".filter-btn", |el| {
            let _ = el.class_list().remove_1("on");
        });
        if let Some(button) = self
            .document
            .get_element_by_id(&format!("filter-{}", filter.as_str()))
        {
            let _ = button.class_list().add_1("on");
        }
    }

    /// Reset the search box to the state's query (cleared on new analysis).
    pub fn search_box(&self, value: &str) {
        if let Some(input) = self
            .document
            .get_element_by_id("clause-search")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(value);
        }
    }

    // ── Upload affordance ────────────────────────────────────────────────

    pub fn upload_busy(&self, busy: bool) {
        if let Some(button) = self.document.get_element_by_id("upload-btn") {
            if busy {
                button.set_text_content(Some("Analyzing..."));
                let _ = button.set_attribute("disabled", "disabled");
            } else {
                button.set_inner_html("🔍 Upload &amp; Analyze Document");
                let _ = button.remove_attribute("disabled");
            }
        }
        if let Some(drop_zone) = self.document.get_element_by_id("drop-zone") {
            let list = drop_zone.class_list();
            let _ = if busy {
                list.add_1("loading")
            } else {
                list.remove_1("loading")
            };
        }
    }

    // ── Chat transcript ──────────────────────────────────────────────────

    /// Append a message, or rewrite it in place when its element already
    /// exists. This is how the pending placeholder becomes the answer (or
    /// the error) without ever duplicating or orphaning a bubble.
    pub fn chat_message(&self, message: &ChatMessage) {
        let Some(container) = self.document.get_element_by_id("qa-messages") else {
            return;
        };
        let element_id = format!("msg-{}", message.id);
        let (wrap_class, inner) = message_markup(message);

        match self.document.get_element_by_id(&element_id) {
            Some(existing) => {
                existing.set_class_name(&wrap_class);
                existing.set_inner_html(&inner);
            }
            None => {
                let Ok(wrap) = self.document.create_element("div") else {
                    return;
                };
                wrap.set_id(&element_id);
                wrap.set_class_name(&wrap_class);
                wrap.set_inner_html(&inner);
                let _ = container.append_child(&wrap);
            }
        }
        container.set_scroll_top(container.scroll_height());
    }

    /// Drop every bubble (explicit transcript clear on new document).
    pub fn chat_clear(&self) {
        if let Some(container) = self.document.get_element_by_id("qa-messages") {
            container.set_inner_html("");
        }
    }

    // ── Notices ──────────────────────────────────────────────────────────

    /// Transient notice. The previous toast, if any, is replaced.
    pub fn toast(&self, kind: ToastKind, message: &str) {
        if let Some(previous) = self.document.get_element_by_id("toast") {
            previous.remove();
        }
        let Ok(toast) = self.document.create_element("div") else {
            return;
        };
        toast.set_id("toast");
        toast.set_class_name(&format!("toast toast-{} toast-show", kind.css_class()));
        toast.set_text_content(Some(message));

        let host = self
            .document
            .get_element_by_id("toast-container")
            .or_else(|| self.document.body().map(|b| b.into()));
        if let Some(host) = host {
            let _ = host.append_child(&toast);
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn set_text(&self, id: &str, value: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_text_content(Some(value));
        }
    }

    fn for_each(&self, selector: &str, mut f: impl FnMut(&Element)) {
        if let Ok(nodes) = self.document.query_selector_all(selector) {
            for i in 0..nodes.length() {
                if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    f(&element);
                }
            }
        }
    }
}

fn clause_entry_markup(clause: &Clause) -> String {
    format!(
        r#"<div class="clause-num">Clause {id:02} · {clause_type}<span class="clause-risk-tag {risk}">{label}</span></div><div class="clause-text">{text}</div>"#,
        id = clause.id,
        clause_type = escape_html(&clause.clause_type),
        risk = clause.risk.css_class(),
        label = clause.risk.label(),
        text = escape_html(&clause.original),
    )
}

fn card_markup(clause: &Clause) -> String {
    let note = clause
        .note
        .as_deref()
        .map(|note| {
            format!(
                r#"<div class="risk-tooltip">{icon} <strong>Note:</strong> {note}</div>"#,
                icon = clause.risk.icon(),
                note = escape_html(note),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="ac-header {risk}"><span class="risk-icon">{icon}</span><span class="clause-type-label">{clause_type}</span><span class="risk-pill {risk}">{label}</span></div><div class="ac-body"><div class="urdu-explanation"><div class="urdu-tag">Urdu Explanation — اردو وضاحت</div><div class="urdu-exp-text">{explanation}</div></div>{note}</div>"#,
        risk = clause.risk.css_class(),
        icon = clause.risk.icon(),
        clause_type = escape_html(&clause.clause_type),
        label = clause.risk.label(),
        explanation = escape_html(&clause.explanation),
    )
}

fn message_markup(message: &ChatMessage) -> (String, String) {
    match (&message.role, &message.body) {
        (ChatRole::User, body) => {
            let text = match body {
                MessageBody::Text(text) => escape_html(text),
                _ => String::new(),
            };
            (
                "msg-wrap user".to_string(),
                format!(
                    r#"<div class="msg-avatar user">👤</div><div class="msg-bubble user">{text}</div>"#
                ),
            )
        }
        (ChatRole::Assistant, MessageBody::Pending) => (
            "msg-wrap".to_string(),
            r#"<div class="msg-avatar ai">AI</div><div class="msg-bubble ai typing-dots"><span></span><span></span><span></span></div>"#
                .to_string(),
        ),
        (ChatRole::Assistant, MessageBody::Answer(answer)) => {
            let secondary = answer
                .answer_ur
                .as_deref()
                .map(|ur| format!(r#"<div class="urdu-reply">{}</div>"#, escape_html(ur)))
                .unwrap_or_default();
            let citation = answer
                .source_clause
                .as_deref()
                .map(|src| format!(r#"<div class="related-clause">📎 {}</div>"#, escape_html(src)))
                .unwrap_or_default();
            (
                "msg-wrap".to_string(),
                format!(
                    r#"<div class="msg-avatar ai">AI</div><div class="msg-bubble ai"><strong>Based on your document:</strong> {en}{secondary}{citation}</div>"#,
                    en = escape_html(&answer.answer_en),
                ),
            )
        }
        (ChatRole::Assistant, MessageBody::Error(text)) => (
            "msg-wrap".to_string(),
            format!(
                r#"<div class="msg-avatar ai">AI</div><div class="msg-bubble ai">Could not get answer: {err}<div class="urdu-reply">{ur}</div></div>"#,
                err = escape_html(text),
                ur = ANSWER_FAILED_UR,
            ),
        ),
        (ChatRole::Assistant, MessageBody::Text(text)) => (
            "msg-wrap".to_string(),
            format!(
                r#"<div class="msg-avatar ai">AI</div><div class="msg-bubble ai">{}</div>"#,
                escape_html(text)
            ),
        ),
    }
}

/// Document name shown on the report header: extension off, underscores to
/// spaces.
fn display_stem(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(name)
        .replace('_', " ")
}

fn today() -> String {
    let formatted = js_sys::Date::new_0().to_locale_date_string("en-PK", &JsValue::UNDEFINED);
    String::from(formatted)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}


// Browser-environment tests for the DOM-touching renders.
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use clauselens_core::ViewState;
    use shared_types::{AnalyzeResponse, AnswerResponse, RiskLevel};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn install_markup() {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(
            r#"<div id="clause-list"></div>
               <div id="analysis-cards"></div>
               <table><tbody id="report-tbody"></tbody></table>
               <div id="qa-messages"></div>"#,
        );
    }

    fn clause(id: u32, risk: RiskLevel) -> Clause {
        Clause {
            id,
            clause_type: format!("Type {id}"),
            risk,
            original: format!("clause {id} text"),
            explanation: "وضاحت۔".to_string(),
            note: None,
        }
    }

    fn state_with(document_id: &str, clauses: Vec<Clause>) -> ViewState {
        let mut state = ViewState::new();
        state.apply_analysis(AnalyzeResponse {
            document_id: document_id.to_string(),
            document_name: format!("{document_id}.pdf"),
            clauses,
        });
        state
    }

    fn count(selector: &str) -> u32 {
        web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .query_selector_all(selector)
            .unwrap()
            .length()
    }

    #[wasm_bindgen_test]
    fn test_list_and_cards_follow_filter_report_does_not() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let mut state = state_with(
            "doc",
            vec![
                clause(1, RiskLevel::High),
                clause(2, RiskLevel::Medium),
                clause(3, RiskLevel::Safe),
            ],
        );
        state.set_filter(RiskFilter::Only(RiskLevel::High));

        renderer.clause_list(&state);
        renderer.cards(&state);
        renderer.report_table(&state);

        assert_eq!(count(".clause-orig"), 1);
        assert_eq!(count(".analysis-card"), 1);
        assert_eq!(count("#report-tbody tr"), 3);
    }

    #[wasm_bindgen_test]
    fn test_render_is_idempotent() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let state = state_with("doc", vec![clause(1, RiskLevel::High), clause(2, RiskLevel::Safe)]);

        renderer.clause_list(&state);
        renderer.clause_list(&state);
        renderer.cards(&state);
        renderer.cards(&state);

        assert_eq!(count(".clause-orig"), 2);
        assert_eq!(count(".analysis-card"), 2);
    }

    #[wasm_bindgen_test]
    fn test_new_document_leaves_no_stale_cards() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let first = state_with("doc-a", vec![clause(1, RiskLevel::High), clause(2, RiskLevel::Safe)]);
        renderer.clause_list(&first);
        renderer.cards(&first);
        renderer.report_table(&first);

        let second = state_with("doc-b", vec![clause(9, RiskLevel::Medium)]);
        renderer.clause_list(&second);
        renderer.cards(&second);
        renderer.report_table(&second);

        assert_eq!(count(".clause-orig"), 1);
        assert_eq!(count(".analysis-card"), 1);
        assert_eq!(count("#report-tbody tr"), 1);
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.get_element_by_id("card-1").is_none());
        assert!(document.get_element_by_id("card-9").is_some());
    }

    #[wasm_bindgen_test]
    fn test_empty_filtered_view_shows_empty_state() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let mut state = state_with("doc", vec![clause(1, RiskLevel::Safe)]);
        state.set_search("nothing matches this");

        renderer.clause_list(&state);
        assert_eq!(count(".clause-orig"), 0);
        assert_eq!(count(".empty-state"), 1);
    }

    #[wasm_bindgen_test]
    fn test_selection_is_exclusive_and_cleared() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let mut state = state_with("doc", vec![clause(1, RiskLevel::High), clause(2, RiskLevel::Safe)]);

        renderer.clause_list(&state);
        renderer.cards(&state);
        state.select(2);
        renderer.selection(&state);
        assert_eq!(count(".clause-orig.selected"), 1);

        // A filter that excludes the selected clause leaves nothing marked.
        state.set_filter(RiskFilter::Only(RiskLevel::High));
        renderer.clause_list(&state);
        renderer.cards(&state);
        renderer.selection(&state);
        assert_eq!(count(".clause-orig.selected"), 0);
        assert_eq!(count(".analysis-card.card-highlight"), 0);
    }

    #[wasm_bindgen_test]
    fn test_pending_bubble_is_replaced_in_place() {
        install_markup();
        let renderer = Renderer::new().unwrap();
        let mut state = state_with("doc", vec![clause(1, RiskLevel::High)]);

        let user = state.transcript_mut().push_user("deposit?");
        let pending = state.transcript_mut().begin_pending();
        renderer.chat_message(state.transcript().get(user).unwrap());
        renderer.chat_message(state.transcript().get(pending).unwrap());
        assert_eq!(count(".typing-dots"), 1);

        state.transcript_mut().resolve(
            pending,
            AnswerResponse {
                answer_en: "Two months rent.".to_string(),
                answer_ur: None,
                source_clause: None,
                confidence: None,
            },
        );
        renderer.chat_message(state.transcript().get(pending).unwrap());

        // The placeholder is gone, nothing was duplicated, the user message
        // survived.
        assert_eq!(count(".typing-dots"), 0);
        assert_eq!(count(".msg-wrap"), 2);
    }
}
