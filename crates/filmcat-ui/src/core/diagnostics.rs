//! Browser-console diagnostics that compile to no-ops off-wasm.

/// Report a swallowed failure to the browser console.
pub fn log_error(context: &str, detail: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::error!(context.to_string(), detail.to_string());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (context, detail);
}
