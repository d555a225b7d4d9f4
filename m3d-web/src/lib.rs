/// m3d Web - WASM bindings for bundler plugins
///
/// Exposes the compiler to JavaScript so a build plugin can hand over
/// `transform` values or whole stylesheet assets.
use m3d_core::{ConvertOptions, Converter};
use wasm_bindgen::prelude::*;

/// `matrix3d(...)` for a transform value, or `undefined` to keep it as-is
#[wasm_bindgen]
pub fn convert(value: &str) -> Option<String> {
    m3d_core::convert(value)
}

/// Rewrite every `transform` declaration in a stylesheet
#[wasm_bindgen(js_name = rewriteStylesheet)]
pub fn rewrite_stylesheet(css: &str, keep_original: bool) -> String {
    let converter = Converter::new(ConvertOptions {
        keep_original,
        ..ConvertOptions::default()
    });
    m3d_core::rewrite_stylesheet(css, &converter).css
}
