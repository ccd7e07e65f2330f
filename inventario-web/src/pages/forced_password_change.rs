use crate::{
    api::InventarioClient,
    components::{AuthCard, FormAlert, TextField, bind},
    hooks::{log_out, sign_in, use_notifier, use_session, use_submission},
    models::forms::{ForcedPasswordForm, FormModel},
    models::toast::Notifier,
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use shared::models::SessionUser;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

/// Shown after signing in with a temporary password. Every other page
/// redirects here until the change succeeds.
#[function_component(ForcedPasswordChangePage)]
pub fn forced_password_change_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(ForcedPasswordForm::default);
    let submission = use_submission();
    let notifier = use_notifier();
    let navigator = use_navigator();
    let user = use_session();

    let onsubmit = {
        let form = form.clone();
        let submission = submission.clone();
        let navigator = navigator.clone();
        let done = i18n.t("forced.done");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form_handle = form.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let done = done.clone();
            submission.submit(
                form.validate(),
                |request| async move {
                    InventarioClient::shared()
                        .forced_password_change(&request)
                        .await
                },
                move |mut user: SessionUser| {
                    user.must_change_password = false;
                    sign_in(user);
                    form_handle.set(ForcedPasswordForm::default());
                    notifier.success(&done);
                    if let Some(navigator) = navigator {
                        navigator.push(&MainRoute::Dashboard);
                    }
                },
            );
        })
    };

    let on_logout = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        let navigator = navigator.clone();
        spawn_local(async move {
            log_out().await;
            if let Some(navigator) = navigator {
                navigator.push(&MainRoute::Login);
            }
        });
    });

    let is_busy = submission.is_busy();
    let subtitle = user.map(|user| format!("{} ({})", i18n.t("forced.subtitle"), user.email));

    html! {
        <AuthCard title={i18n.t("forced.title")} subtitle={subtitle.map(AttrValue::from)}>
            <div class="alert alert-warning text-sm">
                <i class="fa-solid fa-key"></i>
                <span>{i18n.t("forced.notice")}</span>
            </div>
            <form class="flex flex-col gap-2" {onsubmit} novalidate=true>
                <FormAlert error={submission.error().map(str::to_string)} />
                <TextField
                    id="current_password"
                    label={i18n.t("fields.current_password")}
                    input_type="password"
                    autocomplete="current-password"
                    value={form.current_password.clone()}
                    on_input={bind(&form, |form, value| form.current_password = value)}
                />
                <TextField
                    id="new_password"
                    label={i18n.t("fields.new_password")}
                    input_type="password"
                    autocomplete="new-password"
                    value={form.new_password.clone()}
                    on_input={bind(&form, |form, value| form.new_password = value)}
                />
                <TextField
                    id="confirmation"
                    label={i18n.t("fields.confirmation")}
                    input_type="password"
                    autocomplete="new-password"
                    value={form.confirmation.clone()}
                    on_input={bind(&form, |form, value| form.confirmation = value)}
                />
                <p class="text-xs text-base-content/60">{i18n.t("forced.rules")}</p>
                <div class="form-control mt-4">
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                        }
                        {i18n.t("forced.submit")}
                    </button>
                </div>
                <button class="btn btn-ghost btn-sm" type="button" onclick={on_logout}>
                    {i18n.t("header.logout")}
                </button>
            </form>
        </AuthCard>
    }
}
