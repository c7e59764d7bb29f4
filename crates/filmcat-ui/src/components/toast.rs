use crate::core::store::{AppStore, ToastTimers, app_dispatch};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{Toast, ToastKind};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::use_selector;

const TOAST_TTL_MS: u32 = 5000;

/// Queue a toast in the app store.
pub(crate) fn push_toast(kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    app_dispatch().reduce_mut(move |store| {
        store.toasts.push(kind, message);
    });
}

fn dismiss_toast(id: u64) {
    app_dispatch().reduce_mut(|store| store.toasts.dismiss(id));
}

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toasts = use_selector(|store: &AppStore| store.toasts.items.clone());
    let timers = use_mut_ref(ToastTimers::<Timeout>::default);
    {
        let timers = timers.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                timers.borrow_mut().sync(list, |id| {
                    Timeout::new(TOAST_TTL_MS, move || dismiss_toast(id))
                });
                || ()
            },
            (*toasts).clone(),
        );
    }
    {
        let timers = timers.clone();
        use_effect_with_deps(move |_| move || timers.borrow_mut().clear(), ());
    }

    let dismiss_label = bundle.text("toast.dismiss", "Dismiss");
    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| render_toast(toast, &dismiss_label))}
        </div>
    }
}

fn render_toast(toast: &Toast, dismiss_label: &str) -> Html {
    let id = toast.id;
    let on_close = Callback::from(move |_| dismiss_toast(id));
    html! {
        <div class={classes!("toast", toast.kind.class())} role="status">
            <span>{toast.message.clone()}</span>
            <button class="ghost" aria-label={dismiss_label.to_string()} onclick={on_close}>{"✕"}</button>
        </div>
    }
}
