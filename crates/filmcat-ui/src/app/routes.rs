//! Routing definitions for the catalog UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/films")]
    Films,
    #[at("/auth")]
    Auth,
    #[at("/confirm-email")]
    ConfirmEmail,
    #[at("/auth/:provider/callback")]
    OAuthCallback { provider: String },
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}
