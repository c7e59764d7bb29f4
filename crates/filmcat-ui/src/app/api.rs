//! Contexts sharing the API client and the session service.
//!
//! # Design
//! - Create exactly one API client and one session service per app boot.
//! - Compare contexts by pointer so re-renders never rebuild them.

use crate::app::navigation::RouteNavigator;
use crate::core::auth::SessionService;
use crate::core::config::ApiConfig;
use crate::services::api::ApiClient;
use crate::services::cookies::CookieTokenStore;
use std::rc::Rc;

/// Session service wired to the browser adapters.
pub(crate) type AppSession = SessionService<ApiClient, CookieTokenStore, RouteNavigator>;

/// Shared API client context for catalog reads.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    /// Create a new context for the configured API.
    pub(crate) fn new(config: ApiConfig) -> Self {
        Self {
            client: Rc::new(ApiClient::new(config)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Shared session service context.
#[derive(Clone)]
pub(crate) struct SessionCtx {
    /// Singleton session service.
    pub service: Rc<AppSession>,
}

impl SessionCtx {
    /// Build the session service for this boot.
    pub(crate) fn new(config: ApiConfig, navigator: RouteNavigator) -> Self {
        Self {
            service: Rc::new(SessionService::new(
                ApiClient::new(config.clone()),
                CookieTokenStore,
                navigator,
                config,
            )),
        }
    }
}

impl PartialEq for SessionCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.service, &other.service)
    }
}
