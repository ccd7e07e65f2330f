use crate::api::InventarioClient;
use crate::components::{Loading, ToastHost};
use crate::hooks::{sign_in, sign_out, use_notifier};
use crate::models::app_state::AppState;
use crate::models::session::SessionMirror;
use crate::models::toast::Notifier;
use crate::routes::{MainRoute, switch};
use i18nrs::yew::use_translation;
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

/// Check the stored token against the backend before routing.
///
/// A rejected token ends the session. Any other failure keeps the mirrored
/// identity so the app still opens while the backend is unreachable, and
/// `notifier` warns that the data shown may be stale.
async fn restore_session(notifier: &impl Notifier, unverified: &str) {
    let client = InventarioClient::shared();
    if !client.has_token() {
        sign_out();
        return;
    }
    match client.get_profile().await {
        Ok(profile) => {
            let must_change = SessionMirror::shared()
                .read()
                .is_some_and(|user| user.must_change_password);
            sign_in(profile.to_session_user(must_change));
        }
        Err(err) if err.is_unauthorized() => {
            log::info!("stored session expired");
            sign_out();
        }
        Err(err) => {
            log::warn!("profile check failed, keeping cached session: {err}");
            if SessionMirror::shared().read().is_some() {
                notifier.warning(unverified);
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let (state, dispatch) = use_store::<AppState>();
    let (i18n, ..) = use_translation();
    let notifier = use_notifier();
    let unverified = i18n.t("errors.session_unverified");

    use_effect_with((), move |()| {
        let mirror = SessionMirror::shared();
        let seed = mirror.read();
        dispatch.reduce_mut(|state| state.user = seed);

        let listener = dispatch.clone();
        let subscription =
            mirror.subscribe(move |user| listener.reduce_mut(|state| state.user = user));

        spawn_local(async move {
            restore_session(&notifier, &unverified).await;
            dispatch.reduce_mut(|state| state.ready = true);
        });

        move || drop(subscription)
    });

    if !state.ready {
        return html! { <Loading label="app.starting" /> };
    }

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={switch} />
            <ToastHost />
        </BrowserRouter>
    }
}
