//! Browser client for the clauselens contract review workflow.
//!
//! The HTML shell owns markup, styling and event wiring; everything with
//! state or failure modes lives here: the gateway to the analysis service,
//! the render layer, the interaction controller and session persistence.
//! Core state and derivation logic comes from `clauselens-core`.

use wasm_bindgen::prelude::*;

// Export modules
pub mod controller;
pub mod gateway;
pub mod render;
pub mod storage;

// Re-export commonly used items
pub use controller::App;
pub use gateway::{AnalysisGateway, GatewayConfig, GatewayMode, ReportDelivery};
pub use render::{Renderer, ToastKind};

/// Build the app and run startup (restore or demo preload). Convenience
/// entry point for the HTML shell; equivalent to `new App()` + `init()`.
#[wasm_bindgen(js_name = startApp)]
pub fn start_app() -> Result<App, JsValue> {
    let app = App::new()?;
    app.init();
    Ok(app)
}
