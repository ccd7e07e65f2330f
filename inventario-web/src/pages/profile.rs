use crate::{
    api::{ApiError, AvatarUpload, InventarioClient},
    components::{Avatar, FormAlert, LoadError, Loading, TextField, bind},
    download::{object_url, read_file, revoke_object_url},
    format::format_timestamp,
    hooks::{UseFetchHandle, sign_in, use_fetch, use_notifier, use_session, use_submission},
    models::forms::{FormModel, PasswordChangeForm, ProfileForm},
    models::request_status::RequestStatus,
    models::session::SessionMirror,
    models::toast::Notifier,
    validation::{ValidationError, validate_avatar},
};
use i18nrs::yew::use_translation;
use shared::models::{Profile, SessionUser};
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

/// A picked avatar waiting to be uploaded with the next save.
#[derive(Debug, Clone, PartialEq)]
struct PickedAvatar {
    file: File,
    preview_url: String,
}

async fn avatar_upload(file: &File) -> Result<AvatarUpload, ApiError> {
    let bytes = read_file(file)
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    Ok(AvatarUpload {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes,
    })
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let (i18n, ..) = use_translation();
    let fetch = use_fetch((), |()| async { InventarioClient::shared().get_profile().await });

    let body = match fetch.status() {
        RequestStatus::Idle | RequestStatus::Loading => html! { <Loading /> },
        RequestStatus::Failed(message) => {
            let fetch = fetch.clone();
            html! {
                <LoadError
                    message={message.clone()}
                    on_retry={Callback::from(move |()| fetch.reload())}
                />
            }
        }
        RequestStatus::Succeeded(profile) => html! {
            <div class="grid gap-6 lg:grid-cols-3">
                <ProfileDetails profile={profile.clone()} fetch={fetch.clone()} />
                <div class="lg:col-span-2 flex flex-col gap-6">
                    <ProfileEditor profile={profile.clone()} fetch={fetch.clone()} />
                    <PasswordSection />
                </div>
            </div>
        },
    };

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{i18n.t("profile.title")}</h1>
            {body}
        </div>
    }
}

#[derive(Properties)]
struct ProfileSectionProps {
    profile: Profile,
    fetch: UseFetchHandle<Profile>,
}

impl PartialEq for ProfileSectionProps {
    fn eq(&self, other: &Self) -> bool {
        self.profile == other.profile
    }
}

/// Keep the mirrored identity in step with a freshly saved profile.
fn mirror_profile(profile: &Profile, current: Option<&SessionUser>) {
    let must_change = current.is_some_and(|user| user.must_change_password);
    sign_in(profile.to_session_user(must_change));
}

#[function_component(ProfileDetails)]
fn profile_details(props: &ProfileSectionProps) -> Html {
    let (i18n, ..) = use_translation();
    let remove = use_submission();
    let notifier = use_notifier();
    let profile = &props.profile;

    let on_remove = {
        let remove = remove.clone();
        let fetch = props.fetch.clone();
        let profile = profile.clone();
        let removed = i18n.t("profile.avatar_removed");
        Callback::from(move |_: MouseEvent| {
            let fetch = fetch.clone();
            let notifier = notifier.clone();
            let removed = removed.clone();
            let mut without_avatar = profile.clone();
            without_avatar.avatar = None;
            remove.submit(
                Ok::<_, ValidationError>(()),
                |()| async { InventarioClient::shared().delete_avatar().await },
                move |message: Option<String>| {
                    if let Err(err) = SessionMirror::shared().update(|user| user.avatar = None) {
                        log::warn!("session mirror not persisted: {err}");
                    }
                    fetch.replace(without_avatar);
                    notifier.success(&message.unwrap_or(removed));
                },
            );
        })
    };

    let initials = profile.to_session_user(false).initials();

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body items-center text-center">
                <Avatar
                    name={profile.name.clone()}
                    src={profile.avatar.clone().map(AttrValue::from)}
                    {initials}
                    size="w-24"
                />
                <h2 class="card-title mt-2">{profile.name.clone()}</h2>
                <p class="text-sm text-base-content/70">{profile.email.clone()}</p>
                <div class="badge badge-outline">{i18n.t(&format!("roles.{}", profile.role))}</div>
                <dl class="w-full text-sm text-left mt-4 grid grid-cols-2 gap-y-1">
                    <dt class="text-base-content/60">{i18n.t("fields.phone")}</dt>
                    <dd>{profile.phone.clone().unwrap_or_else(|| "-".to_string())}</dd>
                    <dt class="text-base-content/60">{i18n.t("profile.member_since")}</dt>
                    <dd>{format_timestamp(profile.created_at.as_ref())}</dd>
                    <dt class="text-base-content/60">{i18n.t("profile.last_login")}</dt>
                    <dd>{format_timestamp(profile.last_login_at.as_ref())}</dd>
                </dl>
                if profile.avatar.is_some() {
                    <button class="btn btn-ghost btn-sm text-error mt-2" onclick={on_remove} disabled={remove.is_busy()}>
                        <i class="fa-solid fa-trash"></i>
                        {i18n.t("profile.remove_avatar")}
                    </button>
                }
            </div>
        </div>
    }
}

#[function_component(ProfileEditor)]
fn profile_editor(props: &ProfileSectionProps) -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(|| ProfileForm::from(&props.profile));
    let picked = use_state(|| None::<PickedAvatar>);
    let avatar_error = use_state(|| None::<String>);
    let save = use_submission();
    let notifier = use_notifier();
    let user = use_session();

    {
        let form = form.clone();
        // Avatar changes leave unsaved identity edits alone.
        use_effect_with(ProfileForm::from(&props.profile), move |saved| {
            form.set(saved.clone());
        });
    }
    {
        let preview_url = picked.as_ref().map(|avatar| avatar.preview_url.clone());
        use_effect_with(preview_url, |url| {
            let url = url.clone();
            move || {
                if let Some(url) = url {
                    revoke_object_url(&url);
                }
            }
        });
    }

    let on_pick = {
        let picked = picked.clone();
        let avatar_error = avatar_error.clone();
        let notifier = notifier.clone();
        let i18n = i18n.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            if let Err(err) = validate_avatar(&file.type_(), size) {
                let message = i18n.t(&err.i18n_key());
                notifier.error(&message);
                avatar_error.set(Some(message));
                picked.set(None);
                input.set_value("");
                return;
            }
            avatar_error.set(None);
            match object_url(&file) {
                Ok(preview_url) => picked.set(Some(PickedAvatar { file, preview_url })),
                Err(err) => log::warn!("avatar preview unavailable: {err}"),
            }
        })
    };

    let onsubmit = {
        let form = form.clone();
        let picked = picked.clone();
        let save = save.clone();
        let fetch = props.fetch.clone();
        let saved = i18n.t("profile.saved");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let file = picked.as_ref().map(|avatar| avatar.file.clone());
            let picked = picked.clone();
            let fetch = fetch.clone();
            let notifier = notifier.clone();
            let user = user.clone();
            let saved = saved.clone();
            save.submit(
                form.validate(),
                move |update| async move {
                    let avatar = match file {
                        Some(file) => Some(avatar_upload(&file).await?),
                        None => None,
                    };
                    InventarioClient::shared()
                        .update_profile(&update, avatar)
                        .await
                },
                move |profile: Profile| {
                    mirror_profile(&profile, user.as_deref());
                    picked.set(None);
                    fetch.replace(profile);
                    notifier.success(&saved);
                },
            );
        })
    };

    let is_busy = save.is_busy();
    let preview = picked.as_ref().map(|avatar| AttrValue::from(avatar.preview_url.clone()));

    html! {
        <div class="card bg-base-100 shadow">
            <form class="card-body gap-2" {onsubmit} novalidate=true>
                <h2 class="card-title">{i18n.t("profile.edit")}</h2>
                <FormAlert error={save.error().map(str::to_string)} />
                <div class="flex items-center gap-4">
                    <Avatar
                        name={form.name.clone()}
                        src={preview.or_else(|| props.profile.avatar.clone().map(AttrValue::from))}
                        initials={props.profile.to_session_user(false).initials()}
                        size="w-16"
                    />
                    <div class="form-control">
                        <label class="label" for="avatar">
                            <span class="label-text">{i18n.t("profile.avatar")}</span>
                        </label>
                        <input
                            id="avatar"
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered file-input-sm"
                            onchange={on_pick}
                        />
                        if let Some(message) = &*avatar_error {
                            <span class="text-xs text-error mt-1">{message.clone()}</span>
                        } else {
                            <span class="text-xs text-base-content/60 mt-1">{i18n.t("profile.avatar_hint")}</span>
                        }
                    </div>
                </div>
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
                    autocomplete="email"
                    value={form.email.clone()}
                    on_input={bind(&form, |form, value| form.email = value)}
                />
                <TextField
                    id="phone"
                    label={i18n.t("fields.phone")}
                    input_type="tel"
                    autocomplete="tel"
                    value={form.phone.clone()}
                    on_input={bind(&form, |form, value| form.phone = value)}
                />
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-primary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                        }
                        {i18n.t("profile.save")}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[function_component(PasswordSection)]
fn password_section() -> Html {
    let (i18n, ..) = use_translation();
    let form = use_state(PasswordChangeForm::default);
    let change = use_submission();
    let notifier = use_notifier();

    let onsubmit = {
        let form = form.clone();
        let change = change.clone();
        let changed = i18n.t("profile.password_changed");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form_handle = form.clone();
            let notifier = notifier.clone();
            let changed = changed.clone();
            change.submit(
                form.validate(),
                |request| async move { InventarioClient::shared().change_password(&request).await },
                move |message: Option<String>| {
                    let mut cleared = (*form_handle).clone();
                    cleared.clear_passwords();
                    form_handle.set(cleared);
                    notifier.success(&message.unwrap_or(changed));
                },
            );
        })
    };

    let is_busy = change.is_busy();

    html! {
        <div class="card bg-base-100 shadow">
            <form class="card-body gap-2" {onsubmit} novalidate=true>
                <h2 class="card-title">{i18n.t("profile.security")}</h2>
                <p class="text-sm text-base-content/70">{i18n.t("profile.security_hint")}</p>
                <FormAlert error={change.error().map(str::to_string)} />
                <TextField
                    id="current_password"
                    label={i18n.t("fields.current_password")}
                    input_type="password"
                    autocomplete="current-password"
                    value={form.current_password.clone()}
                    on_input={bind(&form, |form, value| form.current_password = value)}
                />
                <div class="grid gap-x-4 md:grid-cols-2">
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
                </div>
                <div class="card-actions justify-end mt-4">
                    <button class="btn btn-secondary" type="submit" disabled={is_busy}>
                        if is_busy {
                            <span class="loading loading-spinner loading-sm"></span>
                        }
                        {i18n.t("profile.change_password")}
                    </button>
                </div>
            </form>
        </div>
    }
}
