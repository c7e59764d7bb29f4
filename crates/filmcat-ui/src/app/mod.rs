//! Application root: contexts, router and session boot.
//!
//! # Design
//! - Preferences (theme, locale) live above the router; the session service
//!   is built below it because it navigates.
//! - The session service publishes into the yewdux store; views read the
//!   store and call the service through context.

use crate::components::shell::AppShell;
use crate::components::toast::{ToastHost, push_toast};
use crate::core::config::ApiConfig;
use crate::core::logic::encode_pairs;
use crate::core::store::{AppStore, app_dispatch};
use crate::core::theme::{ACCENT, BRAND, ThemeMode, css_variables};
use crate::features::auth::view::{AuthPage, ConfirmEmailPage, OAuthCallbackPage};
use crate::features::films::view::FilmsPage;
use crate::features::profile::view::ProfilePage;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::models::{NavLabels, ToastKind};
use gloo::utils::document;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

mod api;
mod navigation;
mod preferences;
mod routes;

pub(crate) use api::{ApiCtx, SessionCtx};
pub(crate) use navigation::push_with_raw_query;
pub(crate) use routes::Route;

use navigation::RouteNavigator;
use preferences::{api_config, load_locale, load_theme, persist_locale, persist_theme};

#[function_component(FilmcatApp)]
pub(crate) fn filmcat_app() -> Html {
    let theme = use_state(load_theme);
    let locale = use_state(load_locale);
    let config = use_memo(|_| api_config(), ());
    let api_ctx = {
        let config = (*config).clone();
        use_memo(move |_| ApiCtx::new(config), ())
    };
    let bundle = use_memo(|locale| TranslationBundle::new(*locale), *locale);

    use_effect_with_deps(
        |theme: &ThemeMode| {
            apply_theme(*theme);
            persist_theme(*theme);
            || ()
        },
        *theme,
    );
    use_effect_with_deps(
        |locale: &LocaleCode| {
            apply_lang(*locale);
            persist_locale(*locale);
            || ()
        },
        *locale,
    );

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |()| theme.set(theme.toggle()))
    };
    let on_locale_change = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| locale.set(next))
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <ContextProvider<ThemeMode> context={*theme}>
                    <BrowserRouter>
                        <Root
                            config={(*config).clone()}
                            theme={*theme}
                            locale={*locale}
                            on_toggle_theme={on_toggle_theme}
                            on_locale_change={on_locale_change}
                        />
                    </BrowserRouter>
                </ContextProvider<ThemeMode>>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct RootProps {
    config: ApiConfig,
    theme: ThemeMode,
    locale: LocaleCode,
    on_toggle_theme: Callback<()>,
    on_locale_change: Callback<LocaleCode>,
}

#[function_component(Root)]
fn root(props: &RootProps) -> Html {
    let navigator = use_navigator();
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(props.locale));
    let user = use_selector(|store: &AppStore| store.session.user.clone());
    let active = use_route::<Route>().unwrap_or(Route::NotFound);
    let session_ctx = {
        let config = props.config.clone();
        let navigator = navigator.clone();
        use_memo(
            move |_| navigator.map(|nav| SessionCtx::new(config, RouteNavigator::new(nav))),
            (),
        )
    };

    {
        let session_ctx = (*session_ctx).clone();
        use_effect_with_deps(
            move |_| {
                if let Some(ctx) = session_ctx.clone() {
                    let dispatch = app_dispatch();
                    ctx.service.subscribe(move |snapshot| {
                        let snapshot = snapshot.clone();
                        dispatch.reduce_mut(move |store| store.session = snapshot);
                    });
                    let service = ctx.service.clone();
                    yew::platform::spawn_local(async move {
                        service.check_session().await;
                    });
                }
                move || {
                    if let Some(ctx) = session_ctx {
                        ctx.service.teardown();
                    }
                }
            },
            (),
        );
    }

    let Some(session) = (*session_ctx).clone() else {
        return html! {};
    };

    let on_logout = {
        let service = session.service.clone();
        let failed = bundle.text("toast.logout_failed", "");
        Callback::from(move |()| {
            let service = service.clone();
            let failed = failed.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = service.logout().await {
                    push_toast(ToastKind::Error, format!("{failed}: {err}"));
                }
            });
        })
    };
    let on_search = {
        let navigator = navigator.clone();
        Callback::from(move |text: String| {
            if let Some(navigator) = &navigator {
                let query = if text.is_empty() {
                    String::new()
                } else {
                    encode_pairs([("query", text.as_str())])
                };
                push_with_raw_query(navigator, &Route::Films, &query);
            }
        })
    };

    let nav = NavLabels {
        brand: bundle.text("nav.brand", "Film Catalog"),
        films: bundle.text("nav.films", "Films"),
        profile: bundle.text("nav.profile", "Profile"),
        sign_in: bundle.text("nav.sign_in", "Sign in"),
        sign_out: bundle.text("nav.sign_out", "Sign out"),
        theme: bundle.text("nav.theme", "Toggle theme"),
    };

    html! {
        <ContextProvider<SessionCtx> context={session}>
            <AppShell
                theme={props.theme}
                on_toggle_theme={props.on_toggle_theme.clone()}
                locale={props.locale}
                on_locale_change={props.on_locale_change.clone()}
                active={active}
                nav={nav}
                user={(*user).clone()}
                on_logout={on_logout}
                on_search={on_search}
                search_placeholder={bundle.text("nav.search_placeholder", "Search films")}
            >
                <Switch<Route> render={switch} />
            </AppShell>
            <ToastHost />
        </ContextProvider<SessionCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Films} /> },
        Route::Films => html! { <FilmsPage /> },
        Route::Auth => html! { <AuthPage /> },
        Route::ConfirmEmail => html! { <ConfirmEmailPage /> },
        Route::OAuthCallback { provider } => html! { <OAuthCallbackPage provider={provider} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(crate::i18n::DEFAULT_LOCALE));
    html! {
        <div class="placeholder">
            <h2>{bundle.text("not_found.title", "Not found")}</h2>
            <p class="muted">{bundle.text("not_found.body", "")}</p>
            <Link<Route> to={Route::Films}>{bundle.text("not_found.home", "Films")}</Link<Route>>
        </div>
    }
}

fn apply_theme(theme: ThemeMode) {
    if let Some(body) = document().body() {
        let _ = body.set_attribute("data-theme", theme.as_str());
        let _ = body.set_attribute("style", &css_variables(&[BRAND, ACCENT]));
    }
}

fn apply_lang(locale: LocaleCode) {
    if let Some(root) = document().document_element() {
        let _ = root.set_attribute("lang", locale.code());
    }
}

/// Entry point for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::Renderer::<FilmcatApp>::new().render();
}
