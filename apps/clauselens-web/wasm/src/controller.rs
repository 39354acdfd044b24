//! The interaction controller: the only writer of the view state.
//!
//! Every handler validates locally first, then calls the gateway, writes
//! the result into state, and repaints from state. Gateway failures become
//! transient notices; none escape a handler. The HTML shell constructs one
//! [`App`] and routes its events (clicks, input, drops) to these exported
//! methods.

use std::cell::RefCell;
use std::rc::Rc;

use clauselens_core::{report_rows, validate_upload, GatewayError, Page, RiskFilter, ViewState};
use wasm_bindgen::prelude::*;

use crate::gateway::{AnalysisGateway, GatewayConfig, ReportDelivery};
use crate::render::{Renderer, ToastKind};
use crate::storage;

#[wasm_bindgen]
pub struct App {
    state: Rc<RefCell<ViewState>>,
    gateway: Rc<AnalysisGateway>,
    renderer: Rc<Renderer>,
}

#[wasm_bindgen]
impl App {
    /// Build the app against the window's gateway configuration. The mode
    /// (live vs simulation) is fixed from here on.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<App, JsValue> {
        console_error_panic_hook::set_once();
        Ok(App {
            state: Rc::new(RefCell::new(ViewState::new())),
            gateway: Rc::new(AnalysisGateway::new(GatewayConfig::from_window())),
            renderer: Rc::new(Renderer::new()?),
        })
    }

    /// Startup: a restored session lands on the analysis page; otherwise
    /// the simulation preloads the demonstration dataset (so every surface
    /// works before any upload) and the home page is shown.
    pub fn init(&self) {
        let mut landing = Page::Home;
        if let Some(session) = storage::restore() {
            web_sys::console::log_1(&JsValue::from_str(&format!(
                "restored session: {}",
                session.document_name
            )));
            self.state.borrow_mut().restore_session(session);
            landing = Page::Analysis;
        } else if let Some(preload) = self.gateway.preload() {
            self.state.borrow_mut().apply_analysis(preload);
        }
        self.state.borrow_mut().show_page(landing);

        self.render_analysis();
        self.renderer.page(landing);
    }

    /// Navigate between pages. No effect on session data, only on which
    /// surfaces are visible.
    #[wasm_bindgen(js_name = showPage)]
    pub fn show_page(&self, name: &str) {
        let Some(page) = Page::parse(name) else {
            web_sys::console::warn_1(&JsValue::from_str(&format!("unknown page: {name}")));
            return;
        };
        self.state.borrow_mut().show_page(page);
        self.renderer.page(page);
    }

    /// Upload flow. Validation rejects bad files before any network call;
    /// on success the session is replaced wholesale and every analysis
    /// surface repainted; on failure the previous session stays untouched.
    /// Overlapping uploads are not sequenced: the response that resolves
    /// last is the one left on screen.
    #[wasm_bindgen(js_name = handleFileSelect)]
    pub async fn handle_file_select(&self, file: web_sys::File) {
        let name = file.name();
        if let Err(err) = validate_upload(&name, file.size() as u64) {
            self.renderer.toast(ToastKind::Error, &err.to_string());
            return;
        }

        self.set_uploading(true);
        match self.gateway.analyze(&file).await {
            Ok(analysis) => {
                let (count, document_name) = {
                    let mut state = self.state.borrow_mut();
                    let count = state.apply_analysis(analysis);
                    if let Some(snapshot) = state.snapshot() {
                        storage::save(&snapshot);
                    }
                    (count, state.document_name().unwrap_or("Document").to_string())
                };

                self.render_analysis();
                self.renderer.chat_clear();
                self.set_uploading(false);
                self.show_page("analysis");
                self.renderer.toast(
                    ToastKind::Success,
                    &format!("\"{document_name}\" analyzed — {count} clauses found."),
                );
            }
            Err(err) => {
                self.set_uploading(false);
                self.renderer
                    .toast(ToastKind::Error, &format!("Analysis failed: {err}"));
            }
        }
    }

    /// Activate a risk filter button and repaint the filtered surfaces.
    #[wasm_bindgen(js_name = setActiveFilter)]
    pub fn set_active_filter(&self, name: &str) {
        let Some(filter) = RiskFilter::parse(name) else {
            web_sys::console::warn_1(&JsValue::from_str(&format!("unknown filter: {name}")));
            return;
        };
        self.state.borrow_mut().set_filter(filter);
        self.renderer.filter_buttons(filter);
        self.render_filtered();
    }

    /// Search-as-you-type over clause type and original text.
    #[wasm_bindgen(js_name = handleSearch)]
    pub fn handle_search(&self, raw: &str) {
        self.state.borrow_mut().set_search(raw);
        self.render_filtered();
    }

    /// Move the selection up or down within the filtered view.
    #[wasm_bindgen(js_name = navigateClause)]
    pub fn navigate_clause(&self, delta: i32) {
        self.state.borrow_mut().navigate(delta);
        let state = self.state.borrow();
        self.renderer.selection(&state);
    }

    /// Select a clause by its stable id (list entry click).
    #[wasm_bindgen(js_name = selectClause)]
    pub fn select_clause(&self, id: u32) {
        self.state.borrow_mut().select(id);
        let state = self.state.borrow();
        self.renderer.selection(&state);
    }

    /// Ask flow. The question is appended immediately with a pending
    /// placeholder; the placeholder is replaced exactly once, by the answer
    /// or by a visible error. With no document loaded the rejection is
    /// local and no network call is made.
    #[wasm_bindgen(js_name = sendMessage)]
    pub async fn send_message(&self, question: String) {
        let question = question.trim().to_string();
        if question.is_empty() {
            return;
        }

        let document_id = self.state.borrow().document_id().map(str::to_string);
        let Some(document_id) = document_id else {
            self.renderer
                .toast(ToastKind::Error, &GatewayError::NoDocument.to_string());
            return;
        };

        let (user_id, pending_id) = {
            let mut state = self.state.borrow_mut();
            let transcript = state.transcript_mut();
            let user_id = transcript.push_user(&question);
            let pending_id = transcript.begin_pending();
            (user_id, pending_id)
        };
        {
            let state = self.state.borrow();
            for id in [user_id, pending_id] {
                if let Some(message) = state.transcript().get(id) {
                    self.renderer.chat_message(message);
                }
            }
        }

        let outcome = self.gateway.ask(&question, &document_id).await;
        {
            let mut state = self.state.borrow_mut();
            match outcome {
                Ok(answer) => state.transcript_mut().resolve(pending_id, answer),
                Err(err) => state.transcript_mut().fail(pending_id, err.to_string()),
            };
        }
        let state = self.state.borrow();
        if let Some(message) = state.transcript().get(pending_id) {
            self.renderer.chat_message(message);
        }
    }

    /// Report download. Local rejection with no document; gateway failures
    /// surface as notices; a completed save has no further state effect.
    #[wasm_bindgen(js_name = downloadReport)]
    pub async fn download_report(&self) {
        let identity = {
            let state = self.state.borrow();
            state.document_id().map(|id| {
                (
                    id.to_string(),
                    state.document_name().unwrap_or("document").to_string(),
                )
            })
        };
        let Some((document_id, document_name)) = identity else {
            self.renderer
                .toast(ToastKind::Error, &GatewayError::NoDocument.to_string());
            return;
        };

        self.renderer.toast(ToastKind::Info, "Generating PDF report...");
        match self.gateway.fetch_report(&document_id, &document_name).await {
            Ok(ReportDelivery::Saved) => {}
            Ok(ReportDelivery::Notice(message)) => self.renderer.toast(ToastKind::Info, &message),
            Err(err) => self
                .renderer
                .toast(ToastKind::Error, &format!("Download failed: {err}")),
        }
    }

    /// Report rows of the whole document as JSON, for host-side use.
    #[wasm_bindgen(js_name = getReportRowsJson)]
    pub fn get_report_rows_json(&self) -> String {
        let state = self.state.borrow();
        serde_json::to_string(&report_rows(state.clauses())).unwrap_or_else(|_| "[]".to_string())
    }

    /// Document identity and per-band counts as JSON.
    #[wasm_bindgen(js_name = getSummaryJson)]
    pub fn get_summary_json(&self) -> String {
        let state = self.state.borrow();
        let counts = state.risk_counts();
        serde_json::json!({
            "documentName": state.document_name(),
            "total": counts.total(),
            "high": counts.high,
            "medium": counts.medium,
            "safe": counts.safe,
        })
        .to_string()
    }
}

impl App {
    /// Repaint every analysis surface from the current state.
    fn render_analysis(&self) {
        let state = self.state.borrow();
        self.renderer.summary(&state);
        self.renderer.filter_buttons(state.active_filter());
        self.renderer.search_box(state.search_query());
        self.renderer.clause_list(&state);
        self.renderer.cards(&state);
        self.renderer.report_table(&state);
        self.renderer.selection(&state);
    }

    /// Repaint only the surfaces that follow the filtered view.
    fn render_filtered(&self) {
        let state = self.state.borrow();
        self.renderer.clause_list(&state);
        self.renderer.cards(&state);
        self.renderer.selection(&state);
    }

    fn set_uploading(&self, uploading: bool) {
        self.state.borrow_mut().set_uploading(uploading);
        self.renderer.upload_busy(uploading);
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_ask_without_document_is_rejected_locally() {
        let document = web_sys::window().unwrap().document().unwrap();
        document
            .body()
            .unwrap()
            .set_inner_html(r#"<div id="qa-messages"></div>"#);

        let app = App::new().unwrap();
        app.send_message("is this safe?".to_string()).await;

        // Nothing was appended to the transcript and the rejection surfaced
        // as a notice; the gateway was never involved.
        let messages = document.get_element_by_id("qa-messages").unwrap();
        assert_eq!(messages.child_element_count(), 0);
        assert!(document.get_element_by_id("toast").is_some());
    }

    #[wasm_bindgen_test]
    fn test_empty_state_summary_json() {
        let app = App::new().unwrap();
        let summary = app.get_summary_json();
        assert!(summary.contains("\"total\":0"));
        assert_eq!(app.get_report_rows_json(), "[]");
    }
}
