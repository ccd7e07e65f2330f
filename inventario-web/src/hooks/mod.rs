//! Hooks shared by every page: fetch-on-mount, submissions, session and toasts.

mod failure;
mod use_fetch;
mod use_notifier;
mod use_session;
mod use_submission;

pub use use_fetch::{UseFetchHandle, use_fetch};
pub use use_notifier::use_notifier;
pub use use_session::{log_out, sign_in, sign_out, use_session};
pub use use_submission::{UseSubmissionHandle, use_submission};
