//! Films page state machine.
//!
//! # Design
//! - Applied filters mirror the URL; the sidebar edits a separate draft.
//! - Every location change starts a new fetch ticket. Only the latest ticket
//!   may settle the page, so late responses from superseded requests are
//!   dropped instead of overwriting newer results.
//! - An empty result is a normal `Ready` state with an informational notice.

use crate::core::api::{ApiError, CatalogApi};
use crate::core::logic::{name_matches, toggle_selection};
use crate::features::films::filters::{FetchPlan, FilmFilters, PAGE_SIZE};
use filmcat_api_models::{Actor, Film, Genre};

/// Loading status of the film grid.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    /// A fetch is in flight.
    #[default]
    Loading,
    /// The latest fetch completed.
    Ready,
    /// The latest fetch failed with the given message.
    Error(String),
}

/// Identifies one fetch started by [`FilmsState::sync_from_location`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What settling a fetch did to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Films were loaded.
    Loaded(usize),
    /// The request succeeded with no films.
    Empty,
    /// The request failed; the message is shown to the user.
    Failed(String),
    /// A newer fetch superseded this one; nothing changed.
    Stale,
}

/// State backing the films page.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FilmsState {
    /// Filters parsed from the current URL.
    pub applied: FilmFilters,
    /// Filters being edited in the sidebar.
    pub draft: FilmFilters,
    /// Films of the current page.
    pub films: Vec<Film>,
    /// Grid loading status.
    pub load: LoadState,
    /// All genres, for the genre picker.
    pub genres: Vec<Genre>,
    /// All actors, for the actor picker.
    pub actors: Vec<Actor>,
    /// Genre picker search box.
    pub genre_search: String,
    /// Actor picker search box.
    pub actor_search: String,
    latest_ticket: u64,
}

impl FilmsState {
    /// Adopt the filters from a location query and start a fetch.
    pub fn sync_from_location(&mut self, query: &str) -> FetchTicket {
        self.applied = FilmFilters::from_query(query);
        self.draft = self.applied.clone();
        self.load = LoadState::Loading;
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// URL query for the draft filters, starting again from the first page.
    #[must_use]
    pub fn apply_filters(&self) -> String {
        self.draft.with_page(1).to_query()
    }

    /// URL query for the applied filters at `page`.
    #[must_use]
    pub fn change_page(&self, page: u32) -> String {
        self.applied.with_page(page).to_query()
    }

    /// Restore default filters and clear the picker search boxes.
    ///
    /// Returns the (empty) URL query of the unfiltered list.
    pub fn reset_filters(&mut self) -> String {
        self.draft = FilmFilters::default();
        self.genre_search.clear();
        self.actor_search.clear();
        self.draft.to_query()
    }

    /// Settle the fetch identified by `ticket`.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Film>, ApiError>,
    ) -> FetchOutcome {
        if ticket.0 != self.latest_ticket {
            return FetchOutcome::Stale;
        }
        match result {
            Ok(films) if films.is_empty() => {
                self.films.clear();
                self.load = LoadState::Ready;
                FetchOutcome::Empty
            }
            Ok(films) => {
                let count = films.len();
                self.films = films;
                self.load = LoadState::Ready;
                FetchOutcome::Loaded(count)
            }
            Err(err) => {
                let message = err.to_string();
                self.films.clear();
                self.load = LoadState::Error(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Store the genre and actor catalogs.
    pub fn set_catalogs(&mut self, genres: Vec<Genre>, actors: Vec<Actor>) {
        self.genres = genres;
        self.actors = actors;
    }

    /// Toggle a genre in the draft selection.
    pub fn toggle_genre(&mut self, id: u32) {
        self.draft.genre_ids = toggle_selection(&self.draft.genre_ids, id);
    }

    /// Toggle an actor in the draft selection.
    pub fn toggle_actor(&mut self, id: u32) {
        self.draft.actor_ids = toggle_selection(&self.draft.actor_ids, id);
    }

    /// Genres whose name matches the genre search box.
    #[must_use]
    pub fn visible_genres(&self) -> Vec<&Genre> {
        self.genres
            .iter()
            .filter(|genre| name_matches(&genre.name, &self.genre_search))
            .collect()
    }

    /// Actors whose name matches the actor search box.
    #[must_use]
    pub fn visible_actors(&self) -> Vec<&Actor> {
        self.actors
            .iter()
            .filter(|actor| name_matches(&actor.name, &self.actor_search))
            .collect()
    }

    /// Whether resetting would change anything: filters or picker searches.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        self.applied.is_filtered()
            || self.draft.is_filtered()
            || !self.genre_search.is_empty()
            || !self.actor_search.is_empty()
    }

    /// A full page suggests more results may follow.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u32::try_from(self.films.len()).is_ok_and(|len| len == PAGE_SIZE)
    }

    /// Whether the grid is waiting on a fetch.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }
}

/// Fetch the films for `filters`, via search or listing as planned.
///
/// # Errors
/// Propagates the catalog API failure.
pub async fn fetch_films<C: CatalogApi + ?Sized>(
    api: &C,
    filters: &FilmFilters,
) -> Result<Vec<Film>, ApiError> {
    match filters.fetch_plan() {
        FetchPlan::Search(text) => api.search_films(&text).await,
        FetchPlan::List(query) => api.list_films(&query).await,
    }
}

/// Fetch the genre and actor catalogs for the sidebar pickers.
///
/// # Errors
/// Propagates the first catalog API failure.
pub async fn fetch_catalogs<C: CatalogApi + ?Sized>(
    api: &C,
) -> Result<(Vec<Genre>, Vec<Actor>), ApiError> {
    let genres = api.genres().await?;
    let actors = api.actors().await?;
    Ok((genres, actors))
}
