use crate::{
    api::InventarioClient,
    components::{AuthCard, FormAlert, TextField, bind},
    hooks::{use_notifier, use_submission},
    models::forms::{FormModel, ResetPasswordForm},
    models::toast::Notifier,
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

#[derive(Properties, PartialEq)]
pub struct ResetPasswordPageProps {
    /// Token from the e-mailed link.
    pub token: AttrValue,
}

#[function_component(ResetPasswordPage)]
pub fn reset_password_page(props: &ResetPasswordPageProps) -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state({
        let token = props.token.to_string();
        move || ResetPasswordForm::with_token(token)
    });
    let submission = use_submission();
    let notifier = use_notifier();
    let navigator = use_navigator();

    {
        let form = form.clone();
        use_effect_with(props.token.clone(), move |token| {
            if form.token != token.as_str() {
                form.set(ResetPasswordForm::with_token(token.as_str()));
            }
        });
    }

    let onsubmit = {
        let form = form.clone();
        let submission = submission.clone();
        let fallback = i18n.t("reset.done");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form_handle = form.clone();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let fallback = fallback.clone();
            submission.submit(
                form.validate(),
                |request| async move { InventarioClient::shared().reset_password(&request).await },
                move |message: Option<String>| {
                    let mut cleared = (*form_handle).clone();
                    cleared.clear_passwords();
                    form_handle.set(cleared);
                    notifier.success(&message.unwrap_or(fallback));
                    if let Some(navigator) = navigator {
                        navigator.push(&MainRoute::Login);
                    }
                },
            );
        })
    };

    let is_busy = submission.is_busy();

    html! {
        <AuthCard title={i18n.t("reset.title")} subtitle={i18n.t("reset.subtitle")}>
            <form class="flex flex-col gap-2" {onsubmit} novalidate=true>
                <FormAlert error={submission.error().map(str::to_string)} />
                <TextField
                    id="email"
                    label={i18n.t("fields.email")}
                    input_type="email"
                    autocomplete="username"
                    value={form.email.clone()}
                    on_input={bind(&form, |form, value| form.email = value)}
                />
                <TextField
                    id="password"
                    label={i18n.t("fields.new_password")}
                    input_type="password"
                    autocomplete="new-password"
                    value={form.password.clone()}
                    on_input={bind(&form, |form, value| form.password = value)}
                />
                <TextField
                    id="confirmation"
                    label={i18n.t("fields.confirmation")}
                    input_type="password"
                    autocomplete="new-password"
                    value={form.confirmation.clone()}
                    on_input={bind(&form, |form, value| form.confirmation = value)}
                />
                <div class="form-control mt-4">
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                        }
                        {i18n.t("reset.submit")}
                    </button>
                </div>
                <Link<MainRoute> to={MainRoute::Login} classes="link link-hover text-sm text-center">
                    {i18n.t("common.back_to_login")}
                </Link<MainRoute>>
            </form>
        </AuthCard>
    }
}
