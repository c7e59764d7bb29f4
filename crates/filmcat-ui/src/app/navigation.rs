//! Router-backed navigation for the session service and feature views.

use crate::app::routes::Route;
use crate::core::auth::{NavIntent, Navigation};
use crate::core::diagnostics::log_error;
use crate::core::logic::parse_query;
use gloo::utils::window;
use yew_router::prelude::Navigator;

/// Translates navigation intents into router pushes.
#[derive(Clone)]
pub(crate) struct RouteNavigator {
    navigator: Navigator,
}

impl RouteNavigator {
    pub(crate) const fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

impl Navigation for RouteNavigator {
    fn navigate(&self, intent: NavIntent) {
        match intent {
            NavIntent::Profile => self.navigator.push(&Route::Profile),
            NavIntent::Auth => self.navigator.push(&Route::Auth),
            NavIntent::ConfirmEmail { email } => {
                push_query(&self.navigator, &Route::ConfirmEmail, &[("email".to_string(), email)]);
            }
        }
    }

    fn redirect(&self, url: &str) {
        if let Err(err) = window().location().set_href(url) {
            log_error("redirect failed", &format!("{err:?}"));
        }
    }
}

/// Navigate to `route` with an already-encoded query string (empty means none).
pub(crate) fn push_with_raw_query(navigator: &Navigator, route: &Route, query: &str) {
    push_query(navigator, route, &parse_query(query));
}

fn push_query(navigator: &Navigator, route: &Route, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        navigator.push(route);
        return;
    }
    if let Err(err) = navigator.push_with_query(route, pairs) {
        log_error("navigation failed", &err.to_string());
    }
}
