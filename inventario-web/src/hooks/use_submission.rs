use crate::api::ApiError;
use crate::hooks::failure::FailureReport;
use crate::hooks::use_notifier::use_notifier;
use crate::hooks::use_session::sign_out;
use crate::models::request_status::{SubmissionAction, SubmissionPhase};
use crate::models::toast::{Notifier, ToastNotifier};
use crate::validation::ValidationError;
use i18nrs::yew::use_translation;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::{UseReducerHandle, hook, use_memo, use_reducer_eq};

/// What a submit call does before anything is awaited.
pub(crate) enum SubmitStart<Fut> {
    /// A request is already in flight.
    Ignored,
    /// The form did not validate; no request was made.
    Invalid(ValidationError),
    /// The request was issued.
    Sent(Fut),
}

/// Issue `request` only when nothing is in flight and the form validated.
pub(crate) fn start_submission<R, F, Fut>(
    busy: bool,
    validated: Result<R, ValidationError>,
    request: F,
) -> SubmitStart<Fut>
where
    F: FnOnce(R) -> Fut,
{
    if busy {
        return SubmitStart::Ignored;
    }
    match validated {
        Ok(body) => SubmitStart::Sent(request(body)),
        Err(err) => SubmitStart::Invalid(err),
    }
}

/// Drives one form through [`SubmissionPhase`].
#[derive(Clone)]
pub struct UseSubmissionHandle {
    phase: UseReducerHandle<SubmissionPhase>,
    in_flight: Rc<Cell<bool>>,
    translate: Rc<dyn Fn(&str) -> String>,
    notifier: ToastNotifier,
}

impl std::fmt::Debug for UseSubmissionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UseSubmissionHandle")
            .field("phase", &*self.phase)
            .field("in_flight", &self.in_flight.get())
            .finish_non_exhaustive()
    }
}

impl UseSubmissionHandle {
    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Whether the submit control should be disabled.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get() || self.phase.is_busy()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    /// Clear a previous outcome, for example when the user edits the form.
    pub fn reset(&self) {
        self.phase.dispatch(SubmissionAction::Reset);
    }

    /// Submit a validated form.
    ///
    /// A validation error is shown and notified without any request. While a
    /// request is in flight further calls are ignored. On success
    /// `on_success` runs with the response; on failure the backend message,
    /// or a generic one, is shown and notified.
    pub fn submit<R, T, F, Fut, S>(&self, validated: Result<R, ValidationError>, request: F, on_success: S)
    where
        R: 'static,
        T: 'static,
        F: FnOnce(R) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        S: FnOnce(T) + 'static,
    {
        let pending = match start_submission(self.is_busy(), validated, request) {
            SubmitStart::Ignored => {
                log::debug!("submission already in flight");
                return;
            }
            SubmitStart::Invalid(err) => {
                self.phase.dispatch(SubmissionAction::Begin);
                let message = (self.translate)(&err.i18n_key());
                self.notifier.error(&message);
                self.phase.dispatch(SubmissionAction::Invalid(message));
                return;
            }
            SubmitStart::Sent(pending) => pending,
        };

        self.in_flight.set(true);
        self.phase.dispatch(SubmissionAction::Begin);
        self.phase.dispatch(SubmissionAction::Dispatched);
        let handle = self.clone();
        let fallback = (self.translate)("errors.request_failed");
        spawn_local(async move {
            let outcome = pending.await;
            handle.in_flight.set(false);
            match outcome {
                Ok(response) => {
                    handle.phase.dispatch(SubmissionAction::Succeeded);
                    on_success(response);
                }
                Err(err) => {
                    log::warn!("submission failed: {err}");
                    let report = FailureReport::new(&err, &fallback);
                    handle.notifier.error(&report.message);
                    handle.phase.dispatch(SubmissionAction::Failed(report.message));
                    if report.ends_session {
                        sign_out();
                    }
                }
            }
        });
    }
}

#[hook]
pub fn use_submission() -> UseSubmissionHandle {
    let (i18n, _) = use_translation();
    let notifier = use_notifier();
    let phase = use_reducer_eq(SubmissionPhase::default);
    let in_flight = use_memo((), |()| Cell::new(false));
    UseSubmissionHandle {
        phase,
        in_flight,
        translate: Rc::new(move |key: &str| i18n.t(key)),
        notifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Field;
    use futures::future::{Ready, ready};

    fn counted(calls: &Cell<u32>) -> impl FnOnce(&'static str) -> Ready<&'static str> + '_ {
        move |body| {
            calls.set(calls.get() + 1);
            ready(body)
        }
    }

    #[test]
    fn invalid_form_sends_nothing() {
        let calls = Cell::new(0);
        let start = start_submission(
            false,
            Err(ValidationError::Required(Field::Email)),
            counted(&calls),
        );
        assert!(matches!(start, SubmitStart::Invalid(ValidationError::Required(Field::Email))));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn submit_while_in_flight_is_ignored() {
        let calls = Cell::new(0);
        let start = start_submission(true, Ok("body"), counted(&calls));
        assert!(matches!(start, SubmitStart::Ignored));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn valid_form_sends_exactly_one_request() {
        let calls = Cell::new(0);
        let start = start_submission(false, Ok("body"), counted(&calls));
        assert_eq!(calls.get(), 1);
        let SubmitStart::Sent(pending) = start else {
            panic!("request was not sent");
        };
        assert_eq!(futures::executor::block_on(pending), "body");
    }
}
