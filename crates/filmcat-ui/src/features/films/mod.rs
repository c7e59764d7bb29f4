//! Films catalog page.
pub mod filters;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
