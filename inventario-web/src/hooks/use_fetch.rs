use crate::api::ApiError;
use crate::hooks::failure::FailureReport;
use crate::hooks::use_session::sign_out;
use crate::models::request_status::{FenceTicket, RequestFence, RequestStatus};
use futures::future::abortable;
use i18nrs::yew::use_translation;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use yew::{UseStateHandle, hook, use_effect_with, use_memo, use_state};

/// State of a fetch bound to the calling component.
pub struct UseFetchHandle<T> {
    status: UseStateHandle<RequestStatus<T>>,
    generation: UseStateHandle<u32>,
}

impl<T> Clone for UseFetchHandle<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<T> std::fmt::Debug for UseFetchHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UseFetchHandle")
            .field("generation", &*self.generation)
            .finish_non_exhaustive()
    }
}

impl<T> UseFetchHandle<T> {
    pub fn status(&self) -> &RequestStatus<T> {
        &self.status
    }

    /// Fetch again with the same dependencies.
    pub fn reload(&self) {
        self.generation.set(self.generation.wrapping_add(1));
    }

    /// Replace the loaded data after a local change, without refetching.
    pub fn replace(&self, data: T) {
        self.status.set(RequestStatus::Succeeded(data));
    }
}

/// Status a finished fetch should publish, or `None` when a newer fetch or
/// teardown has superseded it. The flag asks the caller to end the session.
pub(crate) fn settle_fetch<T>(
    ticket: &FenceTicket,
    result: Result<T, ApiError>,
    fallback: &str,
) -> Option<(RequestStatus<T>, bool)> {
    if !ticket.is_current() {
        return None;
    }
    Some(match result {
        Ok(data) => (RequestStatus::Succeeded(data), false),
        Err(err) => {
            log::warn!("load failed: {err}");
            let report = FailureReport::new(&err, fallback);
            (RequestStatus::Failed(report.message), report.ends_session)
        }
    })
}

/// Run `fetch` on mount and whenever `deps` change.
///
/// The running request is aborted when the component unmounts or when a
/// newer fetch starts, and a response that arrives after being superseded is
/// dropped instead of overwriting fresher state. A 401 ends the session.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch: F) -> UseFetchHandle<T>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let (i18n, _) = use_translation();
    let status = use_state(|| RequestStatus::Idle);
    let generation = use_state(|| 0_u32);
    let fence = use_memo((), |()| RequestFence::new());

    {
        let status = status.clone();
        let fence = (*fence).clone();
        let fallback = i18n.t("errors.load_failed");
        use_effect_with((deps, *generation), move |(deps, _)| {
            let ticket = fence.next();
            status.set(RequestStatus::Loading);
            let (task, handle) = abortable(fetch(deps.clone()));
            spawn_local(async move {
                let Ok(result) = task.await else {
                    return;
                };
                let Some((settled, ends_session)) = settle_fetch(&ticket, result, &fallback) else {
                    log::debug!("dropping superseded response");
                    return;
                };
                if ends_session {
                    sign_out();
                }
                status.set(settled);
            });
            move || {
                handle.abort();
                fence.invalidate();
            }
        });
    }

    UseFetchHandle { status, generation }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "No se pudieron cargar los datos";

    #[test]
    fn superseded_response_is_dropped() {
        let fence = RequestFence::new();
        let by_old_date = fence.next();
        let by_new_date = fence.next();

        assert_eq!(settle_fetch(&by_old_date, Ok::<_, ApiError>(1), FALLBACK), None);
        assert_eq!(
            settle_fetch(&by_new_date, Ok::<_, ApiError>(2), FALLBACK),
            Some((RequestStatus::Succeeded(2), false))
        );
    }

    #[test]
    fn response_after_teardown_is_dropped() {
        let fence = RequestFence::new();
        let ticket = fence.next();
        fence.invalidate();
        let late: Result<u8, _> = Err(ApiError::Unauthorized(None));
        assert_eq!(settle_fetch(&ticket, late, FALLBACK), None);
    }

    #[test]
    fn current_failure_reports_message_and_session_end() {
        let fence = RequestFence::new();
        let ticket = fence.next();
        let err: Result<u8, _> = Err(ApiError::Unauthorized(Some("Token expirado".to_string())));
        assert_eq!(
            settle_fetch(&ticket, err, FALLBACK),
            Some((RequestStatus::Failed("Token expirado".to_string()), true))
        );

        let ticket = fence.next();
        let err: Result<u8, _> = Err(ApiError::Transport("offline".to_string()));
        assert_eq!(
            settle_fetch(&ticket, err, FALLBACK),
            Some((RequestStatus::Failed(FALLBACK.to_string()), false))
        );
    }
}
