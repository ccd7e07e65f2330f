use crate::{
    components::avatar::Avatar,
    hooks::{log_out, use_session},
    routes::MainRoute,
};
use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

#[function_component(UserDropdown)]
pub fn user_dropdown() -> Html {
    let navigator = use_navigator();
    let (i18n, ..) = use_translation();
    let Some(user) = use_session() else {
        return html! {};
    };

    let profile_button = {
        let navigator = navigator.clone();
        let onclick = Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            if let Some(navigator) = &navigator {
                navigator.push(&MainRoute::Profile);
            }
        });
        html! {
            <li><a {onclick}>{i18n.t("nav.profile")}</a></li>
        }
    };

    let logout_button = {
        let onclick = Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            let navigator = navigator.clone();
            spawn_local(async move {
                log_out().await;
                if let Some(navigator) = navigator {
                    navigator.push(&MainRoute::Login);
                }
            });
        });
        html! {
            <li><a {onclick}>{i18n.t("header.logout")}</a></li>
        }
    };

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle mb-1">
                <Avatar
                    name={user.name.clone()}
                    src={user.avatar.clone().map(AttrValue::from)}
                    initials={user.initials()}
                    size="w-8"
                />
            </div>
            <ul tabIndex={0} class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-56">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold text-base-content">{ &user.name }</div>
                    <div class="text-xs text-base-content/70">{ &user.email }</div>
                    <div class="badge badge-outline badge-sm mt-1">{ i18n.t(&format!("roles.{}", user.role)) }</div>
                </li>
                <div class="divider my-0"></div>
                {profile_button}
                <div class="divider my-0"></div>
                {logout_button}
            </ul>
        </div>
    }
}
