//! Sign-in/sign-up page, email confirmation notice and OAuth callback.
//!
//! # Design
//! - Forms keep raw input in local state; the session service owns the
//!   request lifecycle and navigation after success.
//! - Errors are shown inline on the form instead of as toasts.

use crate::app::{Route, SessionCtx};
use crate::core::config::OAuthProvider;
use crate::core::logic::parse_query;
use crate::core::store::AppStore;
use crate::features::auth::state::{AuthTab, SignInForm, SignUpForm};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Providers offered as OAuth buttons.
const OAUTH_PROVIDERS: [&str; 2] = ["google", "yandex"];

fn bind<F, T>(state: &UseStateHandle<F>, apply: T) -> Callback<InputEvent>
where
    F: Clone + 'static,
    T: Fn(&mut F, String) + 'static,
{
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*state).clone();
            apply(&mut next, input.value());
            state.set(next);
        }
    })
}

#[function_component(AuthPage)]
pub(crate) fn auth_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session_ctx = use_context::<SessionCtx>();
    let is_loading = use_selector(|store: &AppStore| store.session.is_loading);
    let tab = use_state(AuthTab::default);
    let sign_in = use_state(SignInForm::default);
    let sign_up = use_state(SignUpForm::default);
    let error = use_state(|| None::<String>);

    let Some(session_ctx) = session_ctx else {
        return html! {
            <div class="placeholder error">{bundle.text("auth.oauth_failed", "Authentication is unavailable.")}</div>
        };
    };
    let t = |key: &str, default: &str| bundle.text(key, default);
    let missing = t("auth.missing_fields", "Fill in all fields.");

    let select_tab = |target: AuthTab| {
        let tab = tab.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            tab.set(target);
        })
    };

    let on_sign_in = {
        let service = session_ctx.service.clone();
        let form = sign_in.clone();
        let error = error.clone();
        let missing = missing.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(request) = form.request() else {
                error.set(Some(missing.clone()));
                return;
            };
            error.set(None);
            let service = service.clone();
            let error = error.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = service.sign_in(&request).await {
                    error.set(Some(err.to_string()));
                }
            });
        })
    };
    let on_sign_up = {
        let service = session_ctx.service.clone();
        let form = sign_up.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(request) = form.request() else {
                error.set(Some(missing.clone()));
                return;
            };
            error.set(None);
            let service = service.clone();
            let error = error.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = service.sign_up(&request).await {
                    error.set(Some(err.to_string()));
                }
            });
        })
    };

    let form = match *tab {
        AuthTab::SignIn => html! {
            <form class="auth-form" onsubmit={on_sign_in}>
                <label>
                    <span>{t("auth.email", "Email")}</span>
                    <input type="email" autocomplete="email" value={sign_in.email.clone()}
                        oninput={bind(&sign_in, |form: &mut SignInForm, v| form.email = v)} />
                </label>
                <label>
                    <span>{t("auth.password", "Password")}</span>
                    <input type="password" autocomplete="current-password" value={sign_in.password.clone()}
                        oninput={bind(&sign_in, |form: &mut SignInForm, v| form.password = v)} />
                </label>
                <button type="submit" class="primary" disabled={*is_loading}>{t("auth.sign_in", "Sign in")}</button>
            </form>
        },
        AuthTab::SignUp => html! {
            <form class="auth-form" onsubmit={on_sign_up}>
                <label>
                    <span>{t("auth.email", "Email")}</span>
                    <input type="email" autocomplete="email" value={sign_up.email.clone()}
                        oninput={bind(&sign_up, |form: &mut SignUpForm, v| form.email = v)} />
                </label>
                <label>
                    <span>{t("auth.login", "Login")}</span>
                    <input type="text" autocomplete="username" value={sign_up.login.clone()}
                        oninput={bind(&sign_up, |form: &mut SignUpForm, v| form.login = v)} />
                </label>
                <label>
                    <span>{t("auth.password", "Password")}</span>
                    <input type="password" autocomplete="new-password" value={sign_up.password.clone()}
                        oninput={bind(&sign_up, |form: &mut SignUpForm, v| form.password = v)} />
                </label>
                <button type="submit" class="primary" disabled={*is_loading}>{t("auth.sign_up", "Sign up")}</button>
            </form>
        },
    };

    let oauth_buttons = OAUTH_PROVIDERS.iter().filter_map(|slug| {
        let provider = OAuthProvider::parse(slug)?;
        let service = session_ctx.service.clone();
        let label = provider.as_str().to_string();
        Some(html! {
            <button type="button" class="ghost oauth" key={label.clone()}
                onclick={Callback::from(move |_: MouseEvent| service.begin_oauth(&provider))}>
                {label}
            </button>
        })
    });

    html! {
        <section class="auth-page card">
            <div class="tabs" role="tablist">
                <button role="tab" class={classes!("tab", (*tab == AuthTab::SignIn).then_some("active"))}
                    onclick={select_tab(AuthTab::SignIn)}>{t("auth.sign_in_tab", "Sign in")}</button>
                <button role="tab" class={classes!("tab", (*tab == AuthTab::SignUp).then_some("active"))}
                    onclick={select_tab(AuthTab::SignUp)}>{t("auth.sign_up_tab", "Sign up")}</button>
            </div>
            {form}
            {error.as_ref().map_or_else(|| html! {}, |message| html! {
                <p class="form-error" role="alert">{message.clone()}</p>
            })}
            <p class="divider muted">{t("auth.or", "or")}</p>
            <div class="oauth-buttons">{for oauth_buttons}</div>
        </section>
    }
}

#[function_component(ConfirmEmailPage)]
pub(crate) fn confirm_email_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let email = use_location()
        .and_then(|location| {
            parse_query(location.query_str())
                .into_iter()
                .find_map(|(key, value)| (key == "email" && !value.is_empty()).then_some(value))
        });
    let body = email.map_or_else(
        || bundle.text("auth.confirm_unknown", "Check your inbox to confirm the account."),
        |email| {
            format!(
                "{} {email}",
                bundle.text("auth.confirm_body", "We sent a confirmation link to")
            )
        },
    );
    html! {
        <section class="placeholder card">
            <h2>{bundle.text("auth.confirm_title", "Confirm your email")}</h2>
            <p>{body}</p>
            <Link<Route> to={Route::Auth}>{bundle.text("auth.back", "Back to sign in")}</Link<Route>>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct OAuthCallbackProps {
    pub provider: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CallbackStatus {
    Pending,
    Failed,
    UnknownProvider,
}

#[function_component(OAuthCallbackPage)]
pub(crate) fn oauth_callback_page(props: &OAuthCallbackProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session_ctx = use_context::<SessionCtx>();
    let query = use_location()
        .map(|location| location.query_str().to_string())
        .unwrap_or_default();
    let status = use_state(|| CallbackStatus::Pending);

    {
        let status = status.clone();
        use_effect_with_deps(
            move |provider: &String| {
                match (OAuthProvider::parse(provider), session_ctx) {
                    (Some(provider), Some(ctx)) => {
                        let service = ctx.service;
                        yew::platform::spawn_local(async move {
                            service.complete_oauth(&provider, &query).await;
                            if !service.session().is_authenticated() {
                                status.set(CallbackStatus::Failed);
                            }
                        });
                    }
                    _ => status.set(CallbackStatus::UnknownProvider),
                }
                || ()
            },
            props.provider.clone(),
        );
    }

    let message = match *status {
        CallbackStatus::Pending => bundle.text("auth.oauth_pending", "Signing you in…"),
        CallbackStatus::Failed => bundle.text("auth.oauth_failed", "Sign-in failed."),
        CallbackStatus::UnknownProvider => {
            bundle.text("auth.unknown_provider", "Unknown sign-in provider.")
        }
    };
    html! {
        <section class="placeholder card" role="status">
            {if *status == CallbackStatus::Pending {
                html! { <span class="spinner" aria-hidden="true"></span> }
            } else {
                html! {}
            }}
            <p>{message}</p>
            {if *status == CallbackStatus::Pending {
                html! {}
            } else {
                html! { <Link<Route> to={Route::Auth}>{bundle.text("auth.back", "Back to sign in")}</Link<Route>> }
            }}
        </section>
    }
}
