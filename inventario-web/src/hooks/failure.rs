use crate::api::ApiError;

/// What the user sees when a request fails, and whether the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FailureReport {
    pub message: String,
    pub ends_session: bool,
}

impl FailureReport {
    /// The backend message when it sent one, otherwise `fallback`.
    pub(crate) fn new(err: &ApiError, fallback: &str) -> Self {
        Self {
            message: err.user_message(fallback),
            ends_session: err.is_unauthorized(),
        }
    }
}
