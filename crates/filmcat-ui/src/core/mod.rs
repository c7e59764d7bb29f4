//! Core, DOM-free primitives and helpers for the Web UI.
pub mod api;
pub mod auth;
pub mod config;
pub mod diagnostics;
pub mod logic;
pub mod store;
pub mod theme;
pub mod token;
