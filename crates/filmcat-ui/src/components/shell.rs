use crate::app::Route;
use crate::core::theme::ThemeMode;
use crate::i18n::LocaleCode;
use crate::models::{NavLabels, UserProfile};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub theme: ThemeMode,
    pub on_toggle_theme: Callback<()>,
    pub locale: LocaleCode,
    pub on_locale_change: Callback<LocaleCode>,
    pub active: Route,
    pub nav: NavLabels,
    pub user: Option<UserProfile>,
    pub on_logout: Callback<()>,
    pub on_search: Callback<String>,
    pub search_placeholder: String,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let search = use_state(String::new);
    let on_search_input = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                search.set(input.value());
            }
        })
    };
    let submit_search = {
        let search = search.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_search.emit((*search).trim().to_string());
        })
    };
    let on_locale = {
        let cb = props.on_locale_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                if let Some(locale) = LocaleCode::from_lang_tag(&select.value()) {
                    cb.emit(locale);
                }
            }
        })
    };
    let toggle_theme = {
        let cb = props.on_toggle_theme.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let account = match &props.user {
        Some(user) => {
            let on_logout = props.on_logout.clone();
            html! {
                <>
                    {nav_item(Route::Profile, user.login.as_deref().unwrap_or(&props.nav.profile), &props.active)}
                    <button class="ghost" onclick={Callback::from(move |_| on_logout.emit(()))}>{&props.nav.sign_out}</button>
                </>
            }
        }
        None => nav_item(Route::Auth, &props.nav.sign_in, &props.active),
    };

    html! {
        <div class={classes!("app-shell", format!("theme-{}", props.theme.as_str()))}>
            <header class="topbar">
                <Link<Route> to={Route::Films} classes="brand">
                    <strong>{&props.nav.brand}</strong>
                </Link<Route>>
                <nav>
                    {nav_item(Route::Films, &props.nav.films, &props.active)}
                </nav>
                <form class="searchbar" onsubmit={submit_search}>
                    <input
                        type="search"
                        value={(*search).clone()}
                        placeholder={props.search_placeholder.clone()}
                        aria-label={props.search_placeholder.clone()}
                        oninput={on_search_input}
                    />
                </form>
                <div class="top-actions">
                    <select class="locale-select" onchange={on_locale}>
                        {for LocaleCode::all().into_iter().map(|locale| html! {
                            <option value={locale.code()} selected={locale == props.locale}>{locale.label()}</option>
                        })}
                    </select>
                    <button class="ghost" onclick={toggle_theme} aria-label={props.nav.theme.clone()}>
                        {if props.theme == ThemeMode::Dark { "☀" } else { "☾" }}
                    </button>
                    {account}
                </div>
            </header>
            <main>
                {for props.children.iter()}
            </main>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!(
        "nav-item",
        if *active == route {
            Some("active")
        } else {
            None
        }
    );
    html! {
        <Link<Route> to={route} classes={classes}>{label.to_string()}</Link<Route>>
    }
}
