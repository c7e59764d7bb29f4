//! Session service: the client's view of the authenticated user.
//!
//! # Design
//! - One explicit service per app boot, injected through context; no ambient
//!   globals.
//! - Remote calls, token persistence and navigation are seams so the service
//!   runs against fakes in native tests.
//! - Every operation brackets itself with the loading flag and clears it on
//!   all exit paths.
//! - State changes are pushed to a single subscriber (the app store).

use crate::core::api::{ApiError, AuthApi, AvatarUpload};
use crate::core::config::{ApiConfig, OAuthProvider};
use crate::core::diagnostics::log_error;
use crate::core::logic::parse_query;
use crate::core::token::TOKEN_TTL;
use filmcat_api_models::{AccessTokenData, ProfileUpdate, SignInRequest, SignUpRequest, UserProfile};
use std::cell::RefCell;
use std::time::Duration;

/// Snapshot of the current session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user, if a token was exchanged for a profile.
    pub user: Option<UserProfile>,
    /// Whether an auth/profile operation is in flight.
    pub is_loading: bool,
}

impl Session {
    /// State at app mount, before the boot-time session check completes.
    #[must_use]
    pub const fn booting() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Where the session service wants the UI to go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavIntent {
    /// Profile page after a successful sign-in.
    Profile,
    /// Email confirmation notice after sign-up.
    ConfirmEmail {
        /// Address the confirmation was sent to.
        email: String,
    },
    /// Sign-in page after logout or account deletion.
    Auth,
}

/// Navigation seam: in-app routing plus full-page redirects.
pub trait Navigation {
    /// Navigate within the app.
    fn navigate(&self, intent: NavIntent);
    /// Leave the app for an external URL.
    fn redirect(&self, url: &str);
}

/// Persistence seam for the bearer token.
pub trait TokenStore {
    /// Current token, if one is stored and non-blank.
    fn load(&self) -> Option<String>;
    /// Store `token` for `ttl`.
    fn save(&self, token: &str, ttl: Duration);
    /// Remove any stored token.
    fn clear(&self);
}

type Listener = Box<dyn Fn(&Session)>;

/// Session lifecycle owner: boot check, sign-in/up, OAuth, logout and profile edits.
pub struct SessionService<A, T, N> {
    api: A,
    tokens: T,
    navigation: N,
    config: ApiConfig,
    session: RefCell<Session>,
    listener: RefCell<Option<Listener>>,
}

impl<A, T, N> SessionService<A, T, N>
where
    A: AuthApi,
    T: TokenStore,
    N: Navigation,
{
    /// Build a service in the [`Session::booting`] state.
    pub fn new(api: A, tokens: T, navigation: N, config: ApiConfig) -> Self {
        Self {
            api,
            tokens,
            navigation,
            config,
            session: RefCell::new(Session::booting()),
            listener: RefCell::new(None),
        }
    }

    /// Register the subscriber notified after every state change.
    ///
    /// The current snapshot is delivered immediately.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        let snapshot = self.session();
        listener(&snapshot);
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Drop the subscriber and forget the in-memory session.
    pub fn teardown(&self) {
        self.listener.borrow_mut().take();
        *self.session.borrow_mut() = Session::default();
    }

    /// Boot-time check: restore the user from a persisted token.
    ///
    /// Never fails; any error leaves the session signed out. A token the
    /// API rejects is dropped so later requests go out anonymous.
    pub async fn check_session(&self) {
        self.set_loading(true);
        let user = match self.tokens.load() {
            Some(_) => match self.api.profile().await {
                Ok(profile) => Some(profile),
                Err(err) => {
                    log_error("session check failed", &err.to_string());
                    if err.is_unauthorized() {
                        self.tokens.clear();
                    }
                    None
                }
            },
            None => None,
        };
        self.update(|session| {
            session.user = user;
            session.is_loading = false;
        });
    }

    /// Sign in with email/password, then load the profile and go to it.
    ///
    /// # Errors
    /// Propagates API failures after clearing the loading flag.
    pub async fn sign_in(&self, credentials: &SignInRequest) -> Result<(), ApiError> {
        self.set_loading(true);
        let result = match self.api.sign_in(credentials).await {
            Ok(token) => self.establish(&token).await,
            Err(err) => Err(err),
        };
        self.set_loading(false);
        result
    }

    /// Register an account and show the email confirmation notice.
    ///
    /// # Errors
    /// Propagates API failures after clearing the loading flag.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        self.set_loading(true);
        let result = self.api.sign_up(request).await;
        self.set_loading(false);
        result?;
        self.navigation.navigate(NavIntent::ConfirmEmail {
            email: request.email.clone(),
        });
        Ok(())
    }

    /// Sign out locally and remotely.
    ///
    /// The stored token is removed, the user cleared and the auth view shown
    /// before the remote outcome is reported.
    ///
    /// # Errors
    /// Returns the remote logout failure, if any.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.set_loading(true);
        let token = self.tokens.load();
        self.tokens.clear();
        let remote = self.api.logout(token.as_deref()).await;
        self.update(|session| {
            session.user = None;
            session.is_loading = false;
        });
        self.navigation.navigate(NavIntent::Auth);
        remote
    }

    /// Send the browser to the provider's authorization page.
    pub fn begin_oauth(&self, provider: &OAuthProvider) {
        self.navigation
            .redirect(&self.config.oauth_authorize_url(provider));
    }

    /// Finish an OAuth round-trip from the callback page's query string.
    ///
    /// Failures clear the user and are logged, never returned.
    pub async fn complete_oauth(&self, provider: &OAuthProvider, query: &str) {
        self.set_loading(true);
        let params = parse_query(query);
        let result = match self.api.oauth_exchange(provider, &params).await {
            Ok(token) => self.establish(&token).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log_error("OAuth callback failed", &err.to_string());
            self.update(|session| session.user = None);
        }
        self.set_loading(false);
    }

    /// Update profile fields and/or the avatar, then reload the profile.
    ///
    /// # Errors
    /// Propagates API failures after clearing the loading flag.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        avatar: Option<&AvatarUpload>,
        reset_avatar: bool,
    ) -> Result<(), ApiError> {
        if update.is_empty() && avatar.is_none() && !reset_avatar {
            return Ok(());
        }
        self.set_loading(true);
        let result = match self.api.update_profile(update, avatar, reset_avatar).await {
            Ok(()) => self.api.profile().await,
            Err(err) => Err(err),
        };
        match result {
            Ok(profile) => {
                self.update(|session| {
                    session.user = Some(profile);
                    session.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                self.set_loading(false);
                Err(err)
            }
        }
    }

    /// Delete the account, then drop the local session and show the auth view.
    ///
    /// # Errors
    /// Propagates API failures; the session is untouched in that case.
    pub async fn delete_profile(&self) -> Result<(), ApiError> {
        self.set_loading(true);
        if let Err(err) = self.api.delete_profile().await {
            self.set_loading(false);
            return Err(err);
        }
        self.tokens.clear();
        self.update(|session| {
            session.user = None;
            session.is_loading = false;
        });
        self.navigation.navigate(NavIntent::Auth);
        Ok(())
    }

    async fn establish(&self, token: &AccessTokenData) -> Result<(), ApiError> {
        if token.access_token.trim().is_empty() {
            return Err(ApiError::Decode("missing access token".to_string()));
        }
        self.tokens.save(&token.access_token, TOKEN_TTL);
        let profile = self.api.profile().await?;
        self.update(|session| session.user = Some(profile));
        self.navigation.navigate(NavIntent::Profile);
        Ok(())
    }

    fn set_loading(&self, is_loading: bool) {
        self.update(|session| session.is_loading = is_loading);
    }

    fn update(&self, apply: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            apply(&mut session);
            session.clone()
        };
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeState {
        sign_in: RefCell<Option<Result<AccessTokenData, ApiError>>>,
        profile: RefCell<Option<Result<UserProfile, ApiError>>>,
        logout: RefCell<Option<ApiError>>,
        oauth: RefCell<Option<Result<AccessTokenData, ApiError>>>,
        update_error: RefCell<Option<ApiError>>,
        delete_error: RefCell<Option<ApiError>>,
        profile_calls: Cell<u32>,
        oauth_params: RefCell<Vec<(String, String)>>,
        logout_token: RefCell<Option<String>>,
        update_seen: RefCell<Option<(ProfileUpdate, bool, bool)>>,
    }

    #[derive(Clone, Default)]
    struct FakeApi(Rc<FakeState>);

    impl std::ops::Deref for FakeApi {
        type Target = FakeState;

        fn deref(&self) -> &FakeState {
            &self.0
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeApi {
        async fn sign_in(&self, _request: &SignInRequest) -> Result<AccessTokenData, ApiError> {
            self.sign_in
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Network("unset".into())))
        }

        async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
            if request.email.contains("taken") {
                Err(ApiError::Status {
                    status: 409,
                    message: "email already exists".into(),
                })
            } else {
                Ok(())
            }
        }

        async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
            *self.logout_token.borrow_mut() = token.map(str::to_string);
            self.logout.borrow_mut().take().map_or(Ok(()), Err)
        }

        async fn oauth_exchange(
            &self,
            _provider: &OAuthProvider,
            params: &[(String, String)],
        ) -> Result<AccessTokenData, ApiError> {
            *self.oauth_params.borrow_mut() = params.to_vec();
            self.oauth
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Network("unset".into())))
        }

        async fn profile(&self) -> Result<UserProfile, ApiError> {
            self.profile_calls.set(self.profile_calls.get() + 1);
            self.profile
                .borrow()
                .clone()
                .unwrap_or_else(|| Err(ApiError::Unauthorized("no session".into())))
        }

        async fn update_profile(
            &self,
            update: &ProfileUpdate,
            avatar: Option<&AvatarUpload>,
            reset_avatar: bool,
        ) -> Result<(), ApiError> {
            *self.update_seen.borrow_mut() = Some((update.clone(), avatar.is_some(), reset_avatar));
            self.update_error.borrow_mut().take().map_or(Ok(()), Err)
        }

        async fn delete_profile(&self) -> Result<(), ApiError> {
            self.delete_error.borrow_mut().take().map_or(Ok(()), Err)
        }
    }

    #[derive(Clone, Default)]
    struct MemoryTokens {
        token: Rc<RefCell<Option<(String, Duration)>>>,
    }

    impl TokenStore for MemoryTokens {
        fn load(&self) -> Option<String> {
            self.token
                .borrow()
                .as_ref()
                .map(|(token, _)| token.clone())
                .filter(|token| !token.trim().is_empty())
        }

        fn save(&self, token: &str, ttl: Duration) {
            *self.token.borrow_mut() = Some((token.to_string(), ttl));
        }

        fn clear(&self) {
            self.token.borrow_mut().take();
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNav {
        intents: Rc<RefCell<Vec<NavIntent>>>,
        redirects: Rc<RefCell<Vec<String>>>,
    }

    impl Navigation for RecordingNav {
        fn navigate(&self, intent: NavIntent) {
            self.intents.borrow_mut().push(intent);
        }

        fn redirect(&self, url: &str) {
            self.redirects.borrow_mut().push(url.to_string());
        }
    }

    fn profile(login: &str) -> UserProfile {
        UserProfile {
            email: Some(format!("{login}@example.com")),
            login: Some(login.to_string()),
            avatar_url: None,
        }
    }

    fn token(value: &str) -> AccessTokenData {
        AccessTokenData {
            access_token: value.to_string(),
        }
    }

    fn service(
        api: &FakeApi,
    ) -> (
        SessionService<FakeApi, MemoryTokens, RecordingNav>,
        MemoryTokens,
        RecordingNav,
    ) {
        let tokens = MemoryTokens::default();
        let nav = RecordingNav::default();
        let service = SessionService::new(
            api.clone(),
            tokens.clone(),
            nav.clone(),
            ApiConfig::new("https://api.example"),
        );
        (service, tokens, nav)
    }

    fn credentials() -> SignInRequest {
        SignInRequest {
            email: "neo@example.com".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn check_session_without_token_skips_network() {
        let api = FakeApi::default();
        let (service, _tokens, _nav) = service(&api);
        assert!(service.session().is_loading);
        block_on(service.check_session());
        assert_eq!(api.profile_calls.get(), 0);
        assert_eq!(service.session(), Session::default());
    }

    #[test]
    fn check_session_with_token_restores_user() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("neo")));
        let (service, tokens, _nav) = service(&api);
        tokens.save("stored", TOKEN_TTL);
        block_on(service.check_session());
        assert_eq!(api.profile_calls.get(), 1);
        let session = service.session();
        assert_eq!(session.user, Some(profile("neo")));
        assert!(!session.is_loading);
    }

    #[test]
    fn check_session_failure_clears_user_and_loading() {
        let api = FakeApi::default();
        let (service, tokens, _nav) = service(&api);
        tokens.save("expired", TOKEN_TTL);
        block_on(service.check_session());
        assert_eq!(api.profile_calls.get(), 1);
        assert_eq!(service.session(), Session::default());
    }

    #[test]
    fn check_session_drops_rejected_token() {
        let api = FakeApi::default();
        let (service, tokens, _nav) = service(&api);
        tokens.save("revoked", TOKEN_TTL);
        block_on(service.check_session());
        assert!(tokens.load().is_none());
    }

    #[test]
    fn check_session_keeps_token_on_network_failure() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Err(ApiError::Network("offline".into())));
        let (service, tokens, _nav) = service(&api);
        tokens.save("stored", TOKEN_TTL);
        block_on(service.check_session());
        assert_eq!(tokens.load().as_deref(), Some("stored"));
        assert_eq!(service.session(), Session::default());
    }

    #[test]
    fn sign_in_persists_token_and_navigates_to_profile() {
        let api = FakeApi::default();
        *api.sign_in.borrow_mut() = Some(Ok(token("fresh")));
        *api.profile.borrow_mut() = Some(Ok(profile("trinity")));
        let (service, tokens, nav) = service(&api);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            service.subscribe(move |session| seen.borrow_mut().push(session.is_loading));
        }

        block_on(service.sign_in(&credentials())).expect("sign in");

        assert_eq!(
            *tokens.token.borrow(),
            Some(("fresh".to_string(), TOKEN_TTL))
        );
        assert_eq!(service.session().user, Some(profile("trinity")));
        assert_eq!(*nav.intents.borrow(), vec![NavIntent::Profile]);
        let seen = seen.borrow();
        assert!(seen.contains(&true));
        assert_eq!(seen.last(), Some(&false));
    }

    #[test]
    fn sign_in_failure_propagates_and_resets_loading() {
        let api = FakeApi::default();
        *api.sign_in.borrow_mut() = Some(Err(ApiError::Unauthorized("bad credentials".into())));
        let (service, tokens, nav) = service(&api);
        let err = block_on(service.sign_in(&credentials())).expect_err("rejected");
        assert_eq!(err, ApiError::Unauthorized("bad credentials".into()));
        assert!(!service.session().is_loading);
        assert!(tokens.load().is_none());
        assert!(nav.intents.borrow().is_empty());
    }

    #[test]
    fn sign_in_rejects_blank_token() {
        let api = FakeApi::default();
        *api.sign_in.borrow_mut() = Some(Ok(token("  ")));
        let (service, tokens, _nav) = service(&api);
        let err = block_on(service.sign_in(&credentials())).expect_err("blank token");
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(tokens.load().is_none());
        assert_eq!(api.profile_calls.get(), 0);
    }

    #[test]
    fn sign_up_navigates_to_confirmation_with_email() {
        let api = FakeApi::default();
        let (service, _tokens, nav) = service(&api);
        let request = SignUpRequest {
            email: "new@example.com".into(),
            login: "new".into(),
            password: "pw".into(),
        };
        block_on(service.sign_up(&request)).expect("sign up");
        assert_eq!(
            *nav.intents.borrow(),
            vec![NavIntent::ConfirmEmail {
                email: "new@example.com".into()
            }]
        );
        assert!(!service.session().is_loading);
    }

    #[test]
    fn sign_up_failure_does_not_navigate() {
        let api = FakeApi::default();
        let (service, _tokens, nav) = service(&api);
        let request = SignUpRequest {
            email: "taken@example.com".into(),
            login: "dup".into(),
            password: "pw".into(),
        };
        let err = block_on(service.sign_up(&request)).expect_err("conflict");
        assert_eq!(err.to_string(), "email already exists (HTTP 409)");
        assert!(!service.session().is_loading);
        assert!(nav.intents.borrow().is_empty());
    }

    #[test]
    fn logout_clears_token_and_navigates_before_reporting_failure() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("neo")));
        *api.logout.borrow_mut() = Some(ApiError::Network("offline".into()));
        let (service, tokens, nav) = service(&api);
        tokens.save("live", TOKEN_TTL);
        block_on(service.check_session());

        let err = block_on(service.logout()).expect_err("remote failure");

        assert_eq!(err, ApiError::Network("offline".into()));
        assert!(tokens.load().is_none());
        assert_eq!(*nav.intents.borrow(), vec![NavIntent::Auth]);
        assert_eq!(service.session(), Session::default());
        assert_eq!(api.logout_token.borrow().as_deref(), Some("live"));
    }

    #[test]
    fn begin_oauth_redirects_to_provider_url() {
        let api = FakeApi::default();
        let (service, _tokens, nav) = service(&api);
        let provider = OAuthProvider::parse("google").expect("provider");
        service.begin_oauth(&provider);
        assert_eq!(
            *nav.redirects.borrow(),
            vec!["https://api.example/v1/auth/google".to_string()]
        );
    }

    #[test]
    fn complete_oauth_forwards_params_and_signs_in() {
        let api = FakeApi::default();
        *api.oauth.borrow_mut() = Some(Ok(token("oauth-token")));
        *api.profile.borrow_mut() = Some(Ok(profile("morpheus")));
        let (service, tokens, nav) = service(&api);
        let provider = OAuthProvider::parse("yandex").expect("provider");

        block_on(service.complete_oauth(&provider, "?code=abc%2F1&state=xyz"));

        assert_eq!(
            *api.oauth_params.borrow(),
            vec![
                ("code".to_string(), "abc/1".to_string()),
                ("state".to_string(), "xyz".to_string())
            ]
        );
        assert_eq!(tokens.load().as_deref(), Some("oauth-token"));
        assert_eq!(service.session().user, Some(profile("morpheus")));
        assert_eq!(*nav.intents.borrow(), vec![NavIntent::Profile]);
    }

    #[test]
    fn complete_oauth_failure_is_swallowed() {
        let api = FakeApi::default();
        *api.oauth.borrow_mut() = Some(Err(ApiError::Unauthorized("state mismatch".into())));
        let (service, tokens, nav) = service(&api);
        let provider = OAuthProvider::parse("google").expect("provider");
        block_on(service.complete_oauth(&provider, "code=1"));
        assert_eq!(service.session(), Session::default());
        assert!(tokens.load().is_none());
        assert!(nav.intents.borrow().is_empty());
    }

    #[test]
    fn update_profile_refreshes_user() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("renamed")));
        let (service, _tokens, _nav) = service(&api);
        let update = ProfileUpdate {
            login: Some("renamed".into()),
        };
        block_on(service.update_profile(&update, None, true)).expect("update");
        assert_eq!(service.session().user, Some(profile("renamed")));
        assert_eq!(
            *api.update_seen.borrow(),
            Some((update, false, true))
        );
    }

    #[test]
    fn update_profile_failure_keeps_user() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("neo")));
        *api.update_error.borrow_mut() = Some(ApiError::Status {
            status: 400,
            message: "invalid type avatar".into(),
        });
        let (service, tokens, _nav) = service(&api);
        tokens.save("live", TOKEN_TTL);
        block_on(service.check_session());
        let avatar = AvatarUpload {
            file_name: "me.gif".into(),
            content_type: "image/gif".into(),
            bytes: vec![1, 2, 3],
        };
        let err = block_on(service.update_profile(&ProfileUpdate::default(), Some(&avatar), false))
            .expect_err("rejected");
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert_eq!(service.session().user, Some(profile("neo")));
        assert!(!service.session().is_loading);
    }

    #[test]
    fn update_profile_without_changes_skips_request() {
        let api = FakeApi::default();
        let (service, _tokens, _nav) = service(&api);
        block_on(service.update_profile(&ProfileUpdate::default(), None, false))
            .expect("nothing to send");
        assert!(api.update_seen.borrow().is_none());
        assert_eq!(api.profile_calls.get(), 0);
    }

    #[test]
    fn delete_profile_drops_session() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("neo")));
        let (service, tokens, nav) = service(&api);
        tokens.save("live", TOKEN_TTL);
        block_on(service.check_session());
        block_on(service.delete_profile()).expect("deleted");
        assert!(tokens.load().is_none());
        assert_eq!(service.session(), Session::default());
        assert_eq!(*nav.intents.borrow(), vec![NavIntent::Auth]);
    }

    #[test]
    fn delete_profile_failure_keeps_session() {
        let api = FakeApi::default();
        *api.profile.borrow_mut() = Some(Ok(profile("neo")));
        *api.delete_error.borrow_mut() = Some(ApiError::Network("offline".into()));
        let (service, tokens, nav) = service(&api);
        tokens.save("live", TOKEN_TTL);
        block_on(service.check_session());
        assert!(block_on(service.delete_profile()).is_err());
        assert_eq!(tokens.load().as_deref(), Some("live"));
        assert!(service.session().is_authenticated());
        assert!(nav.intents.borrow().is_empty());
    }

    #[test]
    fn teardown_drops_subscriber() {
        let api = FakeApi::default();
        let (service, _tokens, _nav) = service(&api);
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            service.subscribe(move |_| count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
        service.teardown();
        block_on(service.check_session());
        assert_eq!(count.get(), 1);
        assert!(!service.session().is_loading);
    }
}
