//! Browser-backed implementations of the core API and token seams.
pub(crate) mod api;
pub(crate) mod cookies;
