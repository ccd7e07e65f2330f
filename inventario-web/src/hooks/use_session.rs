use crate::api::InventarioClient;
use crate::models::app_state::AppState;
use crate::models::session::SessionMirror;
use shared::models::SessionUser;
use std::rc::Rc;
use yew::hook;
use yewdux::prelude::use_selector;

/// Signed-in user as last mirrored, re-rendering on every change.
#[hook]
pub fn use_session() -> Option<Rc<SessionUser>> {
    let user = use_selector(|state: &AppState| state.user.clone());
    (*user).clone()
}

/// Mirror `user` as the signed-in identity.
pub fn sign_in(user: SessionUser) {
    if let Err(err) = SessionMirror::shared().write(user) {
        log::warn!("session mirror not persisted: {err}");
    }
}

/// Drop the token and the mirrored identity.
pub fn sign_out() {
    InventarioClient::shared().set_token(None);
    SessionMirror::shared().clear();
}

/// Revoke the token server side, then sign out locally whatever the outcome.
pub async fn log_out() {
    if let Err(err) = InventarioClient::shared().logout().await
        && !err.is_unauthorized()
    {
        log::error!("logout failed: {err}");
    }
    sign_out();
}
