//! Remote analysis gateway: the single boundary to the analysis service.
//!
//! Three operations (analyze, ask, fetch report), each a pure
//! request/response exchange with no shared-state side effects. The
//! gateway also owns the choice between live network calls and the
//! deterministic simulation; the mode is read once at startup and never
//! changes afterwards.

use clauselens_core::demo;
use clauselens_core::GatewayError;
use js_sys::Reflect;
use serde::de::DeserializeOwned;
use shared_types::{AnalyzeResponse, AnswerResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, HtmlAnchorElement, Request, RequestInit, RequestMode, Response, Url};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Live,
    Simulation,
}

/// Gateway configuration, read once from window globals at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub api_base: String,
}

impl GatewayConfig {
    /// `CLAUSELENS_API_URL` overrides the API base;
    /// `CLAUSELENS_DEMO_MODE = true` selects the simulation. Runtime mode
    /// switching is not supported.
    pub fn from_window() -> Self {
        let global = js_sys::global();
        let api_base = Reflect::get(&global, &JsValue::from_str("CLAUSELENS_API_URL"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let simulation = Reflect::get(&global, &JsValue::from_str("CLAUSELENS_DEMO_MODE"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Self {
            mode: if simulation {
                GatewayMode::Simulation
            } else {
                GatewayMode::Live
            },
            api_base,
        }
    }

    pub fn simulation() -> Self {
        Self {
            mode: GatewayMode::Simulation,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// What a report request produced: a completed browser save, or (in
/// simulation mode) an explanatory message for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDelivery {
    Saved,
    Notice(String),
}

pub struct AnalysisGateway {
    config: GatewayConfig,
}

impl AnalysisGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> GatewayMode {
        self.config.mode
    }

    /// Simulation-mode preload used when no prior session exists; `None` in
    /// live mode, where nothing is shown until a real upload.
    pub fn preload(&self) -> Option<AnalyzeResponse> {
        match self.config.mode {
            GatewayMode::Simulation => Some(demo::demo_analysis(None)),
            GatewayMode::Live => None,
        }
    }

    /// Upload a file for analysis. The caller has already validated the
    /// file name and size; content stays opaque here.
    pub async fn analyze(&self, file: &web_sys::File) -> Result<AnalyzeResponse, GatewayError> {
        if self.config.mode == GatewayMode::Simulation {
            return Ok(demo::demo_analysis(Some(&file.name())));
        }

        let form = FormData::new().map_err(unreachable_err)?;
        form.append_with_blob("file", file).map_err(unreachable_err)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(form.as_ref());

        let url = format!("{}/api/analyze", self.config.api_base);
        let request = build_request(&url, &opts)?;
        let response = send(&request).await?;
        parse_body(&response).await
    }

    /// Ask a free-text question against the loaded document. The
    /// missing-document precondition is the controller's to enforce; by
    /// the time a call reaches here, `document_id` is real.
    pub async fn ask(
        &self,
        question: &str,
        document_id: &str,
    ) -> Result<AnswerResponse, GatewayError> {
        if self.config.mode == GatewayMode::Simulation {
            return Ok(demo::demo_answer(question));
        }

        let payload = serde_json::json!({
            "question": question,
            "document_id": document_id,
        });

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&payload.to_string()));

        let url = format!("{}/api/qa", self.config.api_base);
        let request = build_request(&url, &opts)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(unreachable_err)?;

        let response = send(&request).await?;
        parse_body(&response).await
    }

    /// Fetch the summary report and hand it to the browser's save
    /// affordance. Success has no further state effect.
    pub async fn fetch_report(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> Result<ReportDelivery, GatewayError> {
        if self.config.mode == GatewayMode::Simulation {
            return Ok(ReportDelivery::Notice(demo::REPORT_NOTICE.to_string()));
        }

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let url = format!("{}/api/report/{}", self.config.api_base, document_id);
        let request = build_request(&url, &opts)?;
        let response = send(&request).await?;

        let blob_promise = response
            .blob()
            .map_err(|e| GatewayError::Malformed(describe(&e)))?;
        let blob: Blob = JsFuture::from(blob_promise)
            .await
            .map_err(|e| GatewayError::Malformed(describe(&e)))?
            .dyn_into()
            .map_err(|e| GatewayError::Malformed(describe(&e)))?;

        save_blob(&blob, &report_file_name(document_name))?;
        Ok(ReportDelivery::Saved)
    }
}

fn build_request(url: &str, opts: &RequestInit) -> Result<Request, GatewayError> {
    Request::new_with_str_and_init(url, opts).map_err(unreachable_err)
}

async fn send(request: &Request) -> Result<Response, GatewayError> {
    let window =
        web_sys::window().ok_or_else(|| GatewayError::Unreachable("no window".to_string()))?;
    let fetched = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| GatewayError::Unreachable(describe(&e)))?;
    let response: Response = fetched
        .dyn_into()
        .map_err(|e| GatewayError::Unreachable(describe(&e)))?;

    if !response.ok() {
        return Err(rejection(&response).await);
    }
    Ok(response)
}

/// Build the error for a non-success status: the body's `detail` or
/// `message` field when one exists, else the bare status code.
async fn rejection(response: &Response) -> GatewayError {
    let status = response.status();
    let message = match body_text(response).await {
        Some(text) => extract_error_message(&text).unwrap_or_else(|| format!("HTTP {status}")),
        None => format!("HTTP {status}"),
    };
    GatewayError::Rejected { status, message }
}

async fn body_text(response: &Response) -> Option<String> {
    let promise = response.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

async fn parse_body<T: DeserializeOwned>(response: &Response) -> Result<T, GatewayError> {
    let text = body_text(response)
        .await
        .ok_or_else(|| GatewayError::Malformed("empty response body".to_string()))?;
    serde_json::from_str(&text).map_err(|e| GatewayError::Malformed(e.to_string()))
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn report_file_name(document_name: &str) -> String {
    let stem = document_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(document_name);
    format!("Clauselens_Report_{stem}.pdf")
}

/// Hand a blob to the browser's save affordance via a synthesized anchor.
fn save_blob(blob: &Blob, file_name: &str) -> Result<(), GatewayError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| GatewayError::Malformed("no document".to_string()))?;
    let object_url = Url::create_object_url_with_blob(blob)
        .map_err(|e| GatewayError::Malformed(describe(&e)))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| GatewayError::Malformed(describe(&e)))?
        .dyn_into()
        .map_err(|_| GatewayError::Malformed("anchor element".to_string()))?;
    anchor.set_href(&object_url);
    anchor.set_download(file_name);

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
    }
    anchor.click();
    anchor.remove();
    let _ = Url::revoke_object_url(&object_url);
    Ok(())
}

fn unreachable_err(err: JsValue) -> GatewayError {
    GatewayError::Unreachable(describe(&err))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_prefers_detail() {
        let body = r#"{"detail": "document not found", "message": "other"}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("document not found")
        );
    }

    #[test]
    fn test_extract_error_message_falls_back_to_message() {
        let body = r#"{"message": "bad request"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("bad request"));
    }

    #[test]
    fn test_extract_error_message_ignores_unstructured_bodies() {
        assert_eq!(extract_error_message("<html>oops</html>"), None);
        assert_eq!(extract_error_message(r#"{"error": "x"}"#), None);
    }

    #[test]
    fn test_report_file_name_strips_extension() {
        assert_eq!(
            report_file_name("Rental_Agreement_Karachi_2024.pdf"),
            "Clauselens_Report_Rental_Agreement_Karachi_2024.pdf"
        );
        assert_eq!(report_file_name("document"), "Clauselens_Report_document.pdf");
    }

    #[test]
    fn test_simulation_config() {
        let config = GatewayConfig::simulation();
        assert_eq!(config.mode, GatewayMode::Simulation);
        let gateway = AnalysisGateway::new(config);
        assert!(gateway.preload().is_some());
    }

    #[test]
    fn test_live_mode_has_no_preload() {
        let gateway = AnalysisGateway::new(GatewayConfig {
            mode: GatewayMode::Live,
            api_base: DEFAULT_API_BASE.to_string(),
        });
        assert!(gateway.preload().is_none());
    }
}
