use crate::models::toast::ToastState;
use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use std::collections::HashMap;
use yew::prelude::*;
use yewdux::prelude::use_store;

/// How long a toast stays on screen.
const TOAST_TIMEOUT_MS: u32 = 4000;

/// Start a timer for every toast id not seen before and drop the timers of
/// toasts that are gone. Running timers are left untouched.
fn sync_timers<T>(timers: &mut HashMap<u64, T>, ids: &[u64], mut start: impl FnMut(u64) -> T) {
    timers.retain(|id, _| ids.contains(id));
    for &id in ids {
        timers.entry(id).or_insert_with(|| start(id));
    }
}

/// Renders queued toasts and dismisses each one after a few seconds.
#[function_component(ToastHost)]
pub fn toast_host() -> Html {
    let (i18n, ..) = use_translation();
    let (state, dispatch) = use_store::<ToastState>();
    let on_dismiss = dispatch.reduce_mut_callback_with(|state, id: u64| state.dismiss(id));

    let timers = use_mut_ref(HashMap::<u64, Timeout>::new);
    {
        let on_dismiss = on_dismiss.clone();
        let ids: Vec<u64> = state.toasts.iter().map(|toast| toast.id).collect();
        use_effect_with(ids, move |ids| {
            sync_timers(&mut timers.borrow_mut(), ids, |id| {
                let on_dismiss = on_dismiss.clone();
                Timeout::new(TOAST_TIMEOUT_MS, move || on_dismiss.emit(id))
            });
        });
    }

    let dismiss_label = i18n.t("toast.dismiss");
    html! {
        <div class="toast toast-top toast-end z-50" aria-live="polite" aria-atomic="true">
            { for state.toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = {
                    let on_dismiss = on_dismiss.clone();
                    Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                };
                html! {
                    <div key={id} class={classes!("alert", toast.kind.alert_class())} role="status">
                        <span>{toast.message.clone()}</span>
                        <button class="btn btn-ghost btn-xs" aria-label={dismiss_label.clone()} {onclick}>
                            <i class="fa-solid fa-xmark"></i>
                        </button>
                    </div>
                }
            }) }
        </div>
    }
}
