//! HTTP client helpers (REST).

use crate::core::api::{
    ACTORS_PATH, ApiError, AuthApi, AvatarUpload, CatalogApi, GENRES_PATH, LOGOUT_PATH,
    PROFILE_PATH, SIGN_IN_PATH, SIGN_UP_PATH, decode_envelope, film_search_path, films_path,
    oauth_exchange_path,
};
use crate::core::auth::TokenStore;
use crate::core::config::{ApiConfig, OAuthProvider};
use crate::services::cookies::CookieTokenStore;
use async_trait::async_trait;
use filmcat_api_models::{
    AccessTokenData, Actor, Film, Genre, ProfileUpdate, SignInRequest, SignUpRequest, UserProfile,
};
use gloo::file::Blob;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::FormData;

/// REST client for the catalog API; attaches the stored bearer token.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    config: ApiConfig,
    tokens: CookieTokenStore,
}

impl ApiClient {
    pub(crate) const fn new(config: ApiConfig) -> Self {
        Self {
            config,
            tokens: CookieTokenStore,
        }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send<T: DeserializeOwned>(&self, req: Request) -> Result<Option<T>, ApiError> {
        let token = self.tokens.load();
        self.send_with(req, token.as_deref()).await
    }

    async fn send_with<T: DeserializeOwned>(
        &self,
        req: Request,
        token: Option<&str>,
    ) -> Result<Option<T>, ApiError> {
        let resp = authorize(req, token)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_envelope(status, &body)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        Ok(self
            .send::<Vec<T>>(Request::get(&self.url(path)))
            .await?
            .unwrap_or_default())
    }
}

fn authorize(req: Request, token: Option<&str>) -> Request {
    match token {
        Some(token) => req.header("Authorization", &format!("Bearer {token}")),
        None => req,
    }
}

fn required<T>(payload: Option<T>, what: &str) -> Result<T, ApiError> {
    payload.ok_or_else(|| ApiError::Decode(format!("missing {what} in response")))
}

fn json_body<B: serde::Serialize>(req: Request, body: &B) -> Result<Request, ApiError> {
    req.json(body)
        .map_err(|err| ApiError::Decode(format!("encode request: {err}")))
}

fn profile_form(
    update: &ProfileUpdate,
    avatar: Option<&AvatarUpload>,
    reset_avatar: bool,
) -> Result<FormData, ApiError> {
    let form_error = |err: wasm_bindgen::JsValue| ApiError::Decode(format!("form-data: {err:?}"));
    let form = FormData::new().map_err(form_error)?;
    if let Some(login) = &update.login {
        form.append_with_str("login", login).map_err(form_error)?;
    }
    if let Some(upload) = avatar {
        let blob: web_sys::Blob =
            Blob::new_with_options(upload.bytes.as_slice(), Some(upload.content_type.as_str()))
                .into();
        form.append_with_blob_and_filename("avatar", &blob, &upload.file_name)
            .map_err(form_error)?;
    }
    if reset_avatar {
        form.append_with_str("reset_avatar", "true")
            .map_err(form_error)?;
    }
    Ok(form)
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AccessTokenData, ApiError> {
        let req = json_body(Request::post(&self.url(SIGN_IN_PATH)), request)?;
        required(self.send_with(req, None).await?, "access token")
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        let req = json_body(Request::post(&self.url(SIGN_UP_PATH)), request)?;
        self.send_with::<serde_json::Value>(req, None).await?;
        Ok(())
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        self.send_with::<serde_json::Value>(Request::post(&self.url(LOGOUT_PATH)), token)
            .await?;
        Ok(())
    }

    async fn oauth_exchange(
        &self,
        provider: &OAuthProvider,
        params: &[(String, String)],
    ) -> Result<AccessTokenData, ApiError> {
        let req = Request::get(&self.url(&oauth_exchange_path(provider, params)));
        required(self.send_with(req, None).await?, "access token")
    }

    async fn profile(&self) -> Result<UserProfile, ApiError> {
        required(
            self.send(Request::get(&self.url(PROFILE_PATH))).await?,
            "profile",
        )
    }

    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        avatar: Option<&AvatarUpload>,
        reset_avatar: bool,
    ) -> Result<(), ApiError> {
        let form = profile_form(update, avatar, reset_avatar)?;
        let req = Request::put(&self.url(PROFILE_PATH)).body(form);
        self.send::<serde_json::Value>(req).await?;
        Ok(())
    }

    async fn delete_profile(&self) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(Request::delete(&self.url(PROFILE_PATH)))
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl CatalogApi for ApiClient {
    async fn list_films(&self, query: &str) -> Result<Vec<Film>, ApiError> {
        self.get_list(&films_path(query)).await
    }

    async fn search_films(&self, text: &str) -> Result<Vec<Film>, ApiError> {
        self.get_list(&film_search_path(text)).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.get_list(GENRES_PATH).await
    }

    async fn actors(&self) -> Result<Vec<Actor>, ApiError> {
        self.get_list(ACTORS_PATH).await
    }
}
