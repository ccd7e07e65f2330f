use crate::models::toast::{ToastNotifier, ToastState};
use yew::hook;
use yewdux::prelude::use_dispatch;

/// Notifier bound to the toast store of the current app.
#[hook]
pub fn use_notifier() -> ToastNotifier {
    ToastNotifier::new(use_dispatch::<ToastState>())
}
