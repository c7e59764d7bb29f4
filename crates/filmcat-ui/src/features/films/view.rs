//! Films page: filter sidebar, film grid and pagination.
//!
//! # Design
//! - The location query is the source of truth. Every query change syncs the
//!   store and fetches once; the sidebar only edits the draft until applied.
//! - Apply, reset and paging navigate instead of fetching directly.
//! - Catalog failures are logged and leave the pickers empty.

use crate::app::{ApiCtx, Route, push_with_raw_query};
use crate::components::film_card::FilmCard;
use crate::components::pagination::Pagination;
use crate::components::toast::push_toast;
use crate::core::diagnostics::log_error;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::films::filters::{FilmFilters, SortField, SortOrder};
use crate::features::films::state::{
    FetchOutcome, FilmsState, LoadState, fetch_catalogs, fetch_films,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::ToastKind;
use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[function_component(FilmsPage)]
pub(crate) fn films_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let query = use_location()
        .map(|location| location.query_str().trim_start_matches('?').to_string())
        .unwrap_or_default();
    let films = use_selector(|store: &AppStore| store.films.clone());

    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match fetch_catalogs(&*ctx.client).await {
                            Ok((genres, actors)) => app_dispatch()
                                .reduce_mut(|store| store.films.set_catalogs(genres, actors)),
                            Err(err) => log_error("films: catalog load failed", &err.to_string()),
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    {
        let api_ctx = api_ctx.clone();
        let empty_title = bundle.text("films.empty_title", "Nothing found");
        let failed_title = bundle.text("films.error_title", "Could not load films");
        use_effect_with_deps(
            move |query: &String| {
                let mut ticket = None;
                app_dispatch().reduce_mut(|store| {
                    ticket = Some(store.films.sync_from_location(query));
                });
                let filters = FilmFilters::from_query(query);
                match (api_ctx, ticket) {
                    (Some(ctx), Some(ticket)) => yew::platform::spawn_local(async move {
                        let result = fetch_films(&*ctx.client, &filters).await;
                        let mut outcome = FetchOutcome::Stale;
                        app_dispatch().reduce_mut(|store| {
                            outcome = store.films.finish_fetch(ticket, result);
                        });
                        match outcome {
                            FetchOutcome::Empty => push_toast(ToastKind::Info, empty_title),
                            FetchOutcome::Failed(message) => {
                                push_toast(ToastKind::Error, format!("{failed_title}: {message}"));
                            }
                            FetchOutcome::Loaded(_) | FetchOutcome::Stale => {}
                        }
                    }),
                    _ => log_error("films: missing api context", query),
                }
                || ()
            },
            query,
        );
    }

    let navigate = {
        let navigator = navigator.clone();
        move |query: String| {
            if let Some(navigator) = &navigator {
                push_with_raw_query(navigator, &Route::Films, &query);
            }
        }
    };
    let on_apply = {
        let films = films.clone();
        let navigate = navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            navigate(films.apply_filters());
        })
    };
    let on_reset = {
        let navigate = navigate.clone();
        Callback::from(move |_: MouseEvent| {
            let mut query = String::new();
            app_dispatch().reduce_mut(|store| query = store.films.reset_filters());
            navigate(query);
        })
    };
    let on_page = {
        let films = films.clone();
        Callback::from(move |page: u32| navigate(films.change_page(page)))
    };

    let t = |key: &str, default: &str| bundle.text(key, default);
    let grid = match &films.load {
        LoadState::Loading => html! {
            <div class="placeholder" role="status">
                <span class="spinner" aria-hidden="true"></span>
                <p class="muted">{t("films.loading", "Loading films…")}</p>
            </div>
        },
        LoadState::Error(message) => html! {
            <div class="placeholder error" role="alert">
                <h3>{t("films.error_title", "Could not load films")}</h3>
                <p class="muted">{message.clone()}</p>
            </div>
        },
        LoadState::Ready if films.films.is_empty() => html! {
            <div class="placeholder">
                <h3>{t("films.empty_title", "Nothing found")}</h3>
                <p class="muted">{t("films.empty", "Try other filters.")}</p>
            </div>
        },
        LoadState::Ready => html! {
            <div class="film-grid">
                {for films.films.iter().map(|film| html! { <FilmCard key={film.id} film={film.clone()} /> })}
            </div>
        },
    };

    html! {
        <div class="films-page">
            <FilterSidebar state={(*films).clone()} on_apply={on_apply} on_reset={on_reset} />
            <section class="films-results">
                {grid}
                <Pagination
                    page={films.applied.page}
                    has_next={films.has_next_page()}
                    on_change={on_page}
                    prev_label={t("films.prev", "Previous")}
                    next_label={t("films.next", "Next")}
                    page_label={t("films.page", "Page")}
                />
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    state: FilmsState,
    on_apply: Callback<SubmitEvent>,
    on_reset: Callback<MouseEvent>,
}

fn edit(f: impl FnOnce(&mut FilmsState)) {
    app_dispatch().reduce_mut(|store| f(&mut store.films));
}

fn input_value<E: TargetCast>(e: &E) -> Option<String> {
    e.target_dyn_into::<HtmlInputElement>().map(|input| input.value())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[function_component(FilterSidebar)]
fn filter_sidebar(props: &SidebarProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str, default: &str| bundle.text(key, default);
    let state = &props.state;
    let draft = &state.draft;

    let on_sort = Callback::from(|e: Event| {
        if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
            let field = SortField::parse(&select.value());
            edit(|films| films.draft.sort_by = field);
        }
    });
    let on_order = Callback::from(|_: MouseEvent| edit(|films| films.draft.toggle_order()));
    let on_genre_search = Callback::from(|e: InputEvent| {
        if let Some(text) = input_value(&e) {
            edit(|films| films.genre_search = text);
        }
    });
    let on_actor_search = Callback::from(|e: InputEvent| {
        if let Some(text) = input_value(&e) {
            edit(|films| films.actor_search = text);
        }
    });
    let on_producer = Callback::from(|e: Event| {
        if let Some(text) = input_value(&e) {
            edit(|films| films.draft.set_producer(&text));
        }
    });

    let rating = draft.rating;
    let on_min_rating = Callback::from(move |e: Event| {
        if let Some(min) = input_value(&e).and_then(|v| v.parse().ok()) {
            edit(|films| films.draft.set_rating(min, rating.max()));
        }
    });
    let on_max_rating = Callback::from(move |e: Event| {
        if let Some(max) = input_value(&e).and_then(|v| v.parse().ok()) {
            edit(|films| films.draft.set_rating(rating.min(), max));
        }
    });
    let duration = draft.duration;
    let on_min_duration = Callback::from(move |e: Event| {
        if let Some(min) = input_value(&e).and_then(|v| v.parse().ok()) {
            edit(|films| films.draft.set_duration(min, duration.max()));
        }
    });
    let on_max_duration = Callback::from(move |e: Event| {
        if let Some(max) = input_value(&e).and_then(|v| v.parse().ok()) {
            edit(|films| films.draft.set_duration(duration.min(), max));
        }
    });
    let (min_date, max_date) = (draft.min_date, draft.max_date);
    let on_min_date = Callback::from(move |e: Event| {
        let min = input_value(&e).as_deref().and_then(parse_date);
        edit(|films| films.draft.set_dates(min, max_date));
    });
    let on_max_date = Callback::from(move |e: Event| {
        let max = input_value(&e).as_deref().and_then(parse_date);
        edit(|films| films.draft.set_dates(min_date, max));
    });

    let order_label = match draft.order {
        SortOrder::Asc => t("films.order_asc", "Ascending"),
        SortOrder::Desc => t("films.order_desc", "Descending"),
    };

    html! {
        <form class="filter-sidebar" onsubmit={props.on_apply.clone()}>
            <fieldset>
                <legend>{t("films.sort", "Sort")}</legend>
                <select onchange={on_sort}>
                    <option value="" selected={draft.sort_by.is_none()}>{t("films.sort_none", "Default")}</option>
                    {for SortField::all().into_iter().map(|field| html! {
                        <option value={field.as_str()} selected={draft.sort_by == Some(field)}>
                            {t(&format!("films.sort_{}", field.as_str()), field.as_str())}
                        </option>
                    })}
                </select>
                <button type="button" class="ghost" onclick={on_order}>{order_label}</button>
            </fieldset>

            <fieldset class="picker">
                <legend>{t("films.genres", "Genres")}</legend>
                <input
                    type="search"
                    value={state.genre_search.clone()}
                    placeholder={t("films.search_genres", "Find a genre")}
                    oninput={on_genre_search}
                />
                <ul>
                    {for state.visible_genres().into_iter().map(|genre| {
                        let id = genre.id;
                        html! {
                            <li key={id}>
                                <label>
                                    <input
                                        type="checkbox"
                                        checked={draft.genre_ids.contains(&id)}
                                        onchange={Callback::from(move |_: Event| edit(|films| films.toggle_genre(id)))}
                                    />
                                    {genre.name.clone()}
                                </label>
                            </li>
                        }
                    })}
                </ul>
            </fieldset>

            <fieldset class="picker">
                <legend>{t("films.actors", "Actors")}</legend>
                <input
                    type="search"
                    value={state.actor_search.clone()}
                    placeholder={t("films.search_actors", "Find an actor")}
                    oninput={on_actor_search}
                />
                <ul>
                    {for state.visible_actors().into_iter().map(|actor| {
                        let id = actor.id;
                        html! {
                            <li key={id}>
                                <label>
                                    <input
                                        type="checkbox"
                                        checked={draft.actor_ids.contains(&id)}
                                        onchange={Callback::from(move |_: Event| edit(|films| films.toggle_actor(id)))}
                                    />
                                    {actor.name.clone()}
                                </label>
                            </li>
                        }
                    })}
                </ul>
            </fieldset>

            <fieldset>
                <legend>{t("films.producer", "Producer")}</legend>
                <input type="text" value={draft.producer.clone()} onchange={on_producer} />
            </fieldset>

            <fieldset class="range">
                <legend>{t("films.rating", "Rating")}</legend>
                <input
                    type="number"
                    min={rating.bounds().floor.to_string()}
                    max={rating.bounds().ceil.to_string()}
                    value={rating.min().to_string()}
                    aria-label={t("films.from", "From")}
                    onchange={on_min_rating}
                />
                <input
                    type="number"
                    min={rating.bounds().floor.to_string()}
                    max={rating.bounds().ceil.to_string()}
                    value={rating.max().to_string()}
                    aria-label={t("films.to", "To")}
                    onchange={on_max_rating}
                />
            </fieldset>

            <fieldset class="range">
                <legend>{t("films.duration", "Duration")}</legend>
                <input
                    type="number"
                    min={duration.bounds().floor.to_string()}
                    max={duration.bounds().ceil.to_string()}
                    value={duration.min().to_string()}
                    aria-label={t("films.from", "From")}
                    onchange={on_min_duration}
                />
                <input
                    type="number"
                    min={duration.bounds().floor.to_string()}
                    max={duration.bounds().ceil.to_string()}
                    value={duration.max().to_string()}
                    aria-label={t("films.to", "To")}
                    onchange={on_max_duration}
                />
            </fieldset>

            <fieldset class="range">
                <legend>{t("films.release_date", "Release date")}</legend>
                <input
                    type="date"
                    value={format_date(min_date)}
                    aria-label={t("films.from", "From")}
                    onchange={on_min_date}
                />
                <input
                    type="date"
                    value={format_date(max_date)}
                    aria-label={t("films.to", "To")}
                    onchange={on_max_date}
                />
            </fieldset>

            <div class="actions">
                <button type="submit" class="primary">{t("films.apply", "Apply")}</button>
                <button type="button" class="ghost" onclick={props.on_reset.clone()} disabled={!state.can_reset()}>
                    {t("films.reset", "Reset filters")}
                </button>
            </div>
        </form>
    }
}
