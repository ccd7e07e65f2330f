use crate::{
    api::InventarioClient,
    components::{AuthCard, FormAlert, TextField, bind},
    hooks::{sign_in, use_notifier, use_submission},
    models::forms::{FormModel, LoginForm},
    models::toast::Notifier,
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use shared::models::LoginResponse;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(LoginForm::default);
    let submission = use_submission();
    let notifier = use_notifier();
    let navigator = use_navigator();

    let onsubmit = {
        let form = form.clone();
        let submission = submission.clone();
        let welcome = i18n.t("login.welcome");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let notifier = notifier.clone();
            let navigator = navigator.clone();
            let welcome = welcome.clone();
            submission.submit(
                form.validate(),
                |request| async move { InventarioClient::shared().login(&request).await },
                move |response: LoginResponse| {
                    let next = if response.user.must_change_password {
                        MainRoute::ForcedPasswordChange
                    } else {
                        MainRoute::Dashboard
                    };
                    sign_in(response.user);
                    notifier.success(&welcome);
                    if let Some(navigator) = navigator {
                        navigator.push(&next);
                    }
                },
            );
        })
    };

    let is_busy = submission.is_busy();

    html! {
        <AuthCard title={i18n.t("login.title")}>
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
                    label={i18n.t("fields.password")}
                    input_type="password"
                    autocomplete="current-password"
                    value={form.password.clone()}
                    on_input={bind(&form, |form, value| form.password = value)}
                />
                <div class="flex justify-end">
                    <Link<MainRoute> to={MainRoute::ForgotPassword} classes="link link-hover text-sm">
                        {i18n.t("login.forgot")}
                    </Link<MainRoute>>
                </div>
                <div class="form-control mt-4">
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                            {i18n.t("login.submitting")}
                        } else {
                            {i18n.t("login.submit")}
                        }
                    </button>
                </div>
            </form>
        </AuthCard>
    }
}
