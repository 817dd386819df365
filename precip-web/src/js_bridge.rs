//! Browser interop via `web_sys` and `js_sys::eval()`.
//!
//! Everything the controller needs from the page that Dioxus does not model:
//! blocking notices, the delayed page reload after an upload, and reading the
//! raw bytes of the selected upload file.

use precip_core::client::DEFAULT_SERVER;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Precip JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Blocking user-facing notice.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Reload the whole page after `delay_ms` so the server-side dataset list is re-read.
pub fn schedule_reload(delay_ms: u32) {
    call_js(&format!(
        "setTimeout(function() {{ window.location.reload(); }}, {});",
        delay_ms
    ));
}

/// Origin of the page, which is also the analysis server.
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

fn input_element(id: &str) -> Option<HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// The first file chosen in the file input `id`, if any.
pub fn selected_file(id: &str) -> Option<File> {
    input_element(id)?.files()?.get(0)
}

pub fn clear_file_input(id: &str) {
    if let Some(input) = input_element(id) {
        input.set_value("");
    }
}

/// Read the full contents of a browser `File`.
pub async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
