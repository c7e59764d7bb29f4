//! UI-side view models shared by the shell, toasts and feature views.

pub use filmcat_api_models::{Film, UserProfile};

/// Toast variants used across the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

impl ToastKind {
    /// CSS modifier class for the toast card.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Info => "toast-info",
            Self::Success => "toast-success",
            Self::Error => "toast-error",
        }
    }
}

/// Toast payload used by the host and app state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Navigation labels supplied by the router shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLabels {
    /// Brand title shown in the header.
    pub brand: String,
    /// Films nav label.
    pub films: String,
    /// Profile nav label.
    pub profile: String,
    /// Sign-in nav label.
    pub sign_in: String,
    /// Sign-out nav label.
    pub sign_out: String,
    /// Accessible label of the theme toggle.
    pub theme: String,
}

/// Short display line for a film card: year, running time and rating.
#[must_use]
pub fn film_meta_line(film: &Film) -> String {
    let mut parts = Vec::new();
    if let Some(year) = film.release_year() {
        parts.push(year.to_string());
    }
    if let Some(minutes) = film.duration {
        parts.push(format!("{minutes} min"));
    }
    if let Some(rating) = film.rating {
        parts.push(format!("★ {rating:.0}"));
    }
    parts.join(" · ")
}
