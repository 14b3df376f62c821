use common::{PageLocation, PipelineConfig};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Global the hosting page may set to override the pipeline defaults.
pub const CONFIG_GLOBAL: &str = "__topo_config";

pub fn page_location(window: &Window) -> Option<PageLocation> {
    let location = window.location();
    Some(PageLocation::new(
        location.origin().ok()?,
        location.pathname().ok()?,
        location.href().ok()?,
    ))
}

/// Read `window.__topo_config`, falling back to defaults when it is absent
/// or does not deserialize.
pub fn pipeline_config(window: &Window) -> PipelineConfig {
    let raw = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    config_from_value(raw)
}

pub(crate) fn config_from_value(raw: JsValue) -> PipelineConfig {
    if raw.is_undefined() || raw.is_null() {
        return PipelineConfig::default();
    }
    serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring malformed page config");
        PipelineConfig::default()
    })
}
