use crate::{
    api::InventarioClient,
    components::{AuthCard, FormAlert, TextField, bind},
    hooks::{use_notifier, use_submission},
    models::forms::{ForgotPasswordForm, FormModel},
    models::toast::Notifier,
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Requests a reset link. The page stays put so the user can read the result.
#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(ForgotPasswordForm::default);
    let sent = use_state(|| None::<String>);
    let submission = use_submission();
    let notifier = use_notifier();

    let onsubmit = {
        let form = form.clone();
        let sent = sent.clone();
        let submission = submission.clone();
        let fallback = i18n.t("forgot.sent");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            sent.set(None);
            let sent = sent.clone();
            let notifier = notifier.clone();
            let fallback = fallback.clone();
            submission.submit(
                form.validate(),
                |request| async move { InventarioClient::shared().forgot_password(&request).await },
                move |message: Option<String>| {
                    let message = message.unwrap_or(fallback);
                    notifier.success(&message);
                    sent.set(Some(message));
                },
            );
        })
    };

    let is_busy = submission.is_busy();

    html! {
        <AuthCard title={i18n.t("forgot.title")} subtitle={i18n.t("forgot.subtitle")}>
            <form class="flex flex-col gap-2" {onsubmit} novalidate=true>
                <FormAlert
                    error={submission.error().map(str::to_string)}
                    success={(*sent).clone()}
                />
                <TextField
                    id="email"
                    label={i18n.t("fields.email")}
                    input_type="email"
                    autocomplete="email"
                    value={form.email.clone()}
                    on_input={bind(&form, |form, value| form.email = value)}
                />
                <div class="form-control mt-4">
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                        }
                        {i18n.t("forgot.submit")}
                    </button>
                </div>
                <Link<MainRoute> to={MainRoute::Login} classes="link link-hover text-sm text-center">
                    {i18n.t("common.back_to_login")}
                </Link<MainRoute>>
            </form>
        </AuthCard>
    }
}
