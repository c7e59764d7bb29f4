use crate::models::{Film, film_meta_line};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct FilmCardProps {
    pub film: Film,
}

#[function_component(FilmCard)]
pub(crate) fn film_card(props: &FilmCardProps) -> Html {
    let film = &props.film;
    let genres = film
        .genres
        .iter()
        .map(|genre| genre.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    html! {
        <article class="film-card">
            {if let Some(poster) = &film.poster_url {
                html! { <img class="poster" src={poster.clone()} alt={film.title.clone()} loading="lazy" /> }
            } else {
                html! { <div class="poster placeholder" aria-hidden="true">{"🎞"}</div> }
            }}
            <div class="film-body">
                <h3>{&film.title}</h3>
                <p class="muted">{film_meta_line(film)}</p>
                {if genres.is_empty() { html! {} } else { html! { <p class="genres">{genres}</p> } }}
                {film.description.as_ref().map_or_else(|| html! {}, |text| html! { <p class="synopsis">{text}</p> })}
            </div>
        </article>
    }
}
