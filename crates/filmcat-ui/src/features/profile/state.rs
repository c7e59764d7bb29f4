//! Profile editor state.
//!
//! # Design
//! - Keep the login edit buffer separate from the stored profile so cancel
//!   can restore it.
//! - Build a [`ProfileUpdate`] only when something actually changed.

use crate::core::theme::ThemeMode;
use filmcat_api_models::{ProfileUpdate, UserProfile};

/// Avatar rendition requested from the CDN.
const AVATAR_SIZE: &str = "512x512";

/// Resolve the displayed avatar URL for a profile.
///
/// Default avatars ship in light/dark variants; custom uploads do not.
#[must_use]
pub fn avatar_src(profile: &UserProfile, theme: ThemeMode) -> Option<String> {
    let base = profile.avatar_url.as_deref()?.trim();
    if base.is_empty() {
        return None;
    }
    if base.contains("default") {
        Some(format!("{base}{AVATAR_SIZE}{}.webp", theme.avatar_suffix()))
    } else {
        Some(format!("{base}{AVATAR_SIZE}.webp"))
    }
}

/// Login edit buffer for the profile page.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProfileForm {
    /// Current text of the login field.
    pub login: String,
    /// Whether the login field is in edit mode.
    pub editing: bool,
}

impl ProfileForm {
    /// Enter edit mode seeded with the stored login.
    pub fn begin_edit(&mut self, profile: &UserProfile) {
        self.login = profile.login.clone().unwrap_or_default();
        self.editing = true;
    }

    /// Leave edit mode, restoring the stored login.
    pub fn cancel(&mut self, profile: &UserProfile) {
        self.login = profile.login.clone().unwrap_or_default();
        self.editing = false;
    }

    /// Update to submit, or `None` when the login is blank or unchanged.
    #[must_use]
    pub fn submission(&self, profile: &UserProfile) -> Option<ProfileUpdate> {
        let login = self.login.trim();
        if login.is_empty() || profile.login.as_deref() == Some(login) {
            return None;
        }
        Some(ProfileUpdate {
            login: Some(login.to_string()),
        })
    }
}
