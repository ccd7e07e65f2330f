use crate::{
    api::InventarioClient,
    components::{FormAlert, TextField, bind},
    hooks::{use_notifier, use_submission},
    models::forms::{FormModel, RegisterForm},
    models::toast::Notifier,
};
use i18nrs::yew::use_translation;
use shared::models::UserRole;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Admin-only account creation. The form is cleared after each success so
/// several accounts can be created in a row.
#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(RegisterForm::default);
    let created = use_state(|| None::<String>);
    let submission = use_submission();
    let notifier = use_notifier();

    let onsubmit = {
        let form = form.clone();
        let created = created.clone();
        let submission = submission.clone();
        let fallback = i18n.t("register.done");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            created.set(None);
            let form_handle = form.clone();
            let created = created.clone();
            let notifier = notifier.clone();
            let fallback = fallback.clone();
            submission.submit(
                form.validate(),
                |request| async move { InventarioClient::shared().register(&request).await },
                move |message: Option<String>| {
                    let message = message.unwrap_or(fallback);
                    form_handle.set(RegisterForm::default());
                    notifier.success(&message);
                    created.set(Some(message));
                },
            );
        })
    };

    let on_role = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*form).clone();
                next.role = select.value().parse().ok();
                form.set(next);
            }
        })
    };

    let is_busy = submission.is_busy();
    let selected_role = form.role;

    html! {
        <div class="max-w-2xl mx-auto">
            <div class="card bg-base-100 shadow">
                <form class="card-body gap-2" {onsubmit} novalidate=true>
                    <h2 class="card-title">{i18n.t("register.title")}</h2>
                    <p class="text-sm text-base-content/70">{i18n.t("register.subtitle")}</p>
                    <FormAlert
                        error={submission.error().map(str::to_string)}
                        success={(*created).clone()}
                    />
                    <div class="grid gap-x-4 md:grid-cols-2">
                        <TextField
                            id="name"
                            label={i18n.t("fields.name")}
                            autocomplete="name"
                            value={form.name.clone()}
                            on_input={bind(&form, |form, value| form.name = value)}
                        />
                        <TextField
                            id="email"
                            label={i18n.t("fields.email")}
                            input_type="email"
                            autocomplete="off"
                            value={form.email.clone()}
                            on_input={bind(&form, |form, value| form.email = value)}
                        />
                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">{i18n.t("fields.role")}</span>
                            </label>
                            <select id="role" class="select select-bordered w-full" onchange={on_role}>
                                <option value="" selected={selected_role.is_none()} disabled=true>
                                    {i18n.t("register.pick_role")}
                                </option>
                                { for UserRole::ALL.iter().map(|role| html! {
                                    <option value={role.as_str()} selected={selected_role == Some(*role)}>
                                        {i18n.t(&format!("roles.{role}"))}
                                    </option>
                                }) }
                            </select>
                        </div>
                        <TextField
                            id="id_number"
                            label={i18n.t("fields.id_number")}
                            value={form.id_number.clone()}
                            on_input={bind(&form, |form, value| form.id_number = value)}
                        />
                        <TextField
                            id="phone"
                            label={i18n.t("fields.phone")}
                            input_type="tel"
                            autocomplete="off"
                            value={form.phone.clone()}
                            on_input={bind(&form, |form, value| form.phone = value)}
                        />
                        <div></div>
                        <TextField
                            id="password"
                            label={i18n.t("fields.password")}
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
                    </div>
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            if is_busy {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {i18n.t("register.submit")}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
