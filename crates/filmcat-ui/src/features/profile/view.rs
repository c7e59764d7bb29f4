//! Profile page: avatar, login editing and account removal.
//!
//! # Design
//! - Guarded by the session: a spinner while it boots, the auth page once
//!   it is known to be signed out.
//! - Every mutation goes through the session service, which reloads the
//!   profile; outcomes are reported as toasts.

use crate::app::{Route, SessionCtx};
use crate::components::toast::push_toast;
use crate::core::api::AvatarUpload;
use crate::core::store::AppStore;
use crate::core::theme::ThemeMode;
use crate::features::profile::state::{ProfileForm, avatar_src};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::ToastKind;
use filmcat_api_models::ProfileUpdate;
use gloo::file::File;
use gloo::file::callbacks::{FileReader, read_as_bytes};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

fn submit_update(
    ctx: &SessionCtx,
    update: ProfileUpdate,
    avatar: Option<AvatarUpload>,
    reset_avatar: bool,
    success: String,
) {
    let service = ctx.service.clone();
    yew::platform::spawn_local(async move {
        match service
            .update_profile(&update, avatar.as_ref(), reset_avatar)
            .await
        {
            Ok(()) => push_toast(ToastKind::Success, success),
            Err(err) => push_toast(ToastKind::Error, err.to_string()),
        }
    });
}

#[function_component(ProfilePage)]
pub(crate) fn profile_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let theme = use_context::<ThemeMode>().unwrap_or_default();
    let session_ctx = use_context::<SessionCtx>();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let form = use_state(ProfileForm::default);
    let reader = use_mut_ref(|| None::<FileReader>);
    let t = |key: &str, default: &str| bundle.text(key, default);

    let Some(user) = session.user.clone() else {
        return if session.is_loading {
            html! {
                <div class="placeholder" role="status">
                    <span class="spinner" aria-hidden="true"></span>
                    <p class="muted">{t("profile.loading", "Loading profile…")}</p>
                </div>
            }
        } else {
            html! { <Redirect<Route> to={Route::Auth} /> }
        };
    };
    let Some(ctx) = session_ctx else {
        return html! { <Redirect<Route> to={Route::Auth} /> };
    };

    let on_edit = {
        let form = form.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.begin_edit(&user);
            form.set(next);
        })
    };
    let on_cancel = {
        let form = form.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.cancel(&user);
            form.set(next);
        })
    };
    let on_login = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                form.set(ProfileForm {
                    login: input.value(),
                    editing: true,
                });
            }
        })
    };
    let on_save = {
        let form = form.clone();
        let user = user.clone();
        let ctx = ctx.clone();
        let updated = t("profile.updated", "Profile updated");
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(update) = form.submission(&user) {
                submit_update(&ctx, update, None, false, updated.clone());
            }
            let mut next = (*form).clone();
            next.editing = false;
            form.set(next);
        })
    };
    let on_avatar = {
        let ctx = ctx.clone();
        let reader = reader.clone();
        let uploaded = t("profile.avatar_updated", "Avatar updated");
        let read_failed = t("profile.read_failed", "Could not read the selected file");
        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(raw) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            let file = File::from(raw);
            let file_name = file.name();
            let content_type = file.raw_mime_type();
            let ctx = ctx.clone();
            let uploaded = uploaded.clone();
            let read_failed = read_failed.clone();
            let task = read_as_bytes(&file, move |result| match result {
                Ok(bytes) => {
                    let upload = AvatarUpload {
                        file_name,
                        content_type,
                        bytes,
                    };
                    submit_update(&ctx, ProfileUpdate::default(), Some(upload), false, uploaded);
                }
                Err(err) => push_toast(ToastKind::Error, format!("{read_failed}: {err}")),
            });
            *reader.borrow_mut() = Some(task);
        })
    };
    let on_reset_avatar = {
        let ctx = ctx.clone();
        let reset = t("profile.avatar_reset", "Avatar reset");
        Callback::from(move |_: MouseEvent| {
            submit_update(&ctx, ProfileUpdate::default(), None, true, reset.clone());
        })
    };
    let on_delete = {
        let service = ctx.service.clone();
        let question = t("profile.delete_confirm", "Delete your account permanently?");
        let deleted = t("profile.deleted", "Account deleted");
        Callback::from(move |_: MouseEvent| {
            if !gloo::dialogs::confirm(&question) {
                return;
            }
            let service = service.clone();
            let deleted = deleted.clone();
            yew::platform::spawn_local(async move {
                match service.delete_profile().await {
                    Ok(()) => push_toast(ToastKind::Info, deleted),
                    Err(err) => push_toast(ToastKind::Error, err.to_string()),
                }
            });
        })
    };

    let avatar = avatar_src(&user, theme).map_or_else(
        || html! { <div class="avatar placeholder" aria-hidden="true">{"👤"}</div> },
        |src| html! { <img class="avatar" src={src} alt={user.login.clone().unwrap_or_default()} /> },
    );
    let login_row = if form.editing {
        html! {
            <form class="inline-form" onsubmit={on_save}>
                <input type="text" value={form.login.clone()} oninput={on_login} aria-label={t("profile.login", "Login")} />
                <button type="submit" class="primary" disabled={session.is_loading}>{t("profile.save", "Save")}</button>
                <button type="button" class="ghost" onclick={on_cancel}>{t("profile.cancel", "Cancel")}</button>
            </form>
        }
    } else {
        html! {
            <div class="inline-form">
                <span>{user.login.clone().unwrap_or_default()}</span>
                <button type="button" class="ghost" onclick={on_edit}>{t("profile.edit", "Edit")}</button>
            </div>
        }
    };

    html! {
        <section class="profile-page card">
            <h2>{t("profile.title", "Profile")}</h2>
            <div class="avatar-block">
                {avatar}
                <label class="ghost button">
                    {t("profile.upload_avatar", "Upload avatar")}
                    <input type="file" accept="image/*" hidden=true onchange={on_avatar} disabled={session.is_loading} />
                </label>
                <button type="button" class="ghost" onclick={on_reset_avatar} disabled={session.is_loading}>
                    {t("profile.reset_avatar", "Reset avatar")}
                </button>
            </div>
            <dl class="profile-fields">
                <dt>{t("profile.email", "Email")}</dt>
                <dd>{user.email.clone().unwrap_or_default()}</dd>
                <dt>{t("profile.login", "Login")}</dt>
                <dd>{login_row}</dd>
            </dl>
            <button type="button" class="danger" onclick={on_delete} disabled={session.is_loading}>
                {t("profile.delete", "Delete account")}
            </button>
        </section>
    }
}
