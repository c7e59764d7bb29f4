//! Sign-in, sign-up and OAuth pages.
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
