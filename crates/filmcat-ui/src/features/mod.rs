//! Feature slices: DOM-free state per page plus wasm-only views.
pub mod auth;
pub mod films;
pub mod profile;
