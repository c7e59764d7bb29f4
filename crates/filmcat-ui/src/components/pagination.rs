use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub page: u32,
    pub has_next: bool,
    pub on_change: Callback<u32>,
    pub prev_label: String,
    pub next_label: String,
    pub page_label: String,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    let page = props.page;
    let go = |target: u32| {
        let cb = props.on_change.clone();
        Callback::from(move |_: MouseEvent| cb.emit(target))
    };
    html! {
        <nav class="pagination" aria-label={props.page_label.clone()}>
            <button class="ghost" disabled={page <= 1} onclick={go(page.saturating_sub(1).max(1))}>
                {&props.prev_label}
            </button>
            <span class="pill subtle">{format!("{} {page}", props.page_label)}</span>
            <button class="ghost" disabled={!props.has_next} onclick={go(page.saturating_add(1))}>
                {&props.next_label}
            </button>
        </nav>
    }
}
