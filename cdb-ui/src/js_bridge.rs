//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Chart.js and Toastify glue lives in `assets/js/*.js` and is loaded at
//! runtime as globals (no ES modules) exposed via `window.*`. The libraries
//! themselves are loaded by the host page.

use cdb_dashboard::chart_config::ChartConfig;
use cdb_dashboard::notify::Toast;
use js_sys::{Function, Promise, Reflect};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

static CHART_BRIDGE_JS: &str = include_str!("../assets/js/chart-bridge.js");
static TOAST_JS: &str = include_str!("../assets/js/toast.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('CDB JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the glue scripts at global scope. Call once at app startup.
pub fn load_scripts() {
    let all_js = [CHART_BRIDGE_JS, TOAST_JS].join("\n");
    let store_js = format!(
        "window.__cdbScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    call_js(&store_js);
    call_js(
        r#"
        (0, eval)(window.__cdbScripts);
        delete window.__cdbScripts;
        window.cdbCreateChart = cdbCreateChart;
        window.cdbDestroyChart = cdbDestroyChart;
        window.cdbShowToast = cdbShowToast;
        "#,
    );
}

/// Resolve once `window[name]` exists, polling every 100 ms.
pub async fn wait_for_global(name: &str) -> Result<(), String> {
    let name_json = serde_json::to_string(name).map_err(|e| e.to_string())?;
    let promise = js_sys::eval(&format!(
        r#"
        new Promise(function(resolve) {{
            var poll = setInterval(function() {{
                if (typeof window[{name_json}] !== 'undefined') {{
                    clearInterval(poll);
                    resolve(true);
                }}
            }}, 100);
        }})
        "#,
    ))
    .map_err(|e| js_error(&e))?;
    let promise: Promise = promise
        .dyn_into()
        .map_err(|_| "polling did not yield a promise".to_string())?;
    JsFuture::from(promise).await.map_err(|e| js_error(&e))?;
    Ok(())
}

/// Create a Chart.js chart on `canvas_id` and return the live instance.
pub fn create_chart(canvas_id: &str, config: &ChartConfig) -> Result<JsValue, String> {
    let id_json = serde_json::to_string(canvas_id).map_err(|e| e.to_string())?;
    let config_json = serde_json::to_string(config).map_err(|e| e.to_string())?;
    js_sys::eval(&format!(
        "window.cdbCreateChart({}, {})",
        id_json, config_json
    ))
    .map_err(|e| js_error(&e))
}

/// Call `destroy()` on a chart returned by [`create_chart`].
pub fn destroy_chart(chart: &JsValue) {
    let destroy = Reflect::get(chart, &JsValue::from_str("destroy"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok());
    match destroy {
        Some(destroy) => {
            if let Err(e) = destroy.call0(chart) {
                warn!("Chart destroy failed: {}", js_error(&e));
            }
        }
        None => warn!("Chart handle has no destroy()"),
    }
}

/// Show a toast once Toastify and the glue script are available.
pub fn show_toast(toast: &Toast) {
    let toast_json = match serde_json::to_string(toast) {
        Ok(json) => json,
        Err(e) => {
            warn!("Cannot serialize toast: {}", e);
            return;
        }
    };
    call_js(&format!(
        r#"
        (function() {{
            var toast = {toast_json};
            var poll = setInterval(function() {{
                if (typeof window.Toastify !== 'undefined' &&
                    typeof window.cdbShowToast !== 'undefined') {{
                    clearInterval(poll);
                    try {{
                        window.cdbShowToast(toast);
                    }} catch(e) {{ console.error('[CDB] cdbShowToast error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Read `window.CDB_CONFIG` as a JSON string, if the host page set it.
pub fn page_config_json() -> Option<String> {
    js_sys::eval("window.CDB_CONFIG ? JSON.stringify(window.CDB_CONFIG) : null")
        .ok()
        .and_then(|v| v.as_string())
}

/// Best-effort text for a thrown JS value.
pub fn js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
