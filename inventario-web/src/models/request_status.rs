//! Lifecycle of fetches and form submissions.

use std::cell::Cell;
use std::rc::Rc;
use yew::Reducible;

/// Progress of a single fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

/// Phase of a form submission.
///
/// `Idle -> Validating -> Submitting -> Success | Failure`. A new submission
/// starts from `Success` or `Failure` exactly as it does from `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failure(String),
}

/// Events that move a [`SubmissionPhase`] forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionAction {
    /// The user asked to submit.
    Begin,
    /// Local validation failed with this message.
    Invalid(String),
    /// Validation passed and the request went out.
    Dispatched,
    /// The backend accepted the request.
    Succeeded,
    /// The request failed with this message.
    Failed(String),
    /// Return to idle, for example after the user edits the form again.
    Reset,
}

impl SubmissionPhase {
    /// Apply an action. Actions that make no sense in the current phase are
    /// ignored, which is what keeps a double submit from starting a second
    /// request.
    #[must_use]
    pub fn apply(&self, action: SubmissionAction) -> Self {
        use SubmissionAction as A;
        match (self, action) {
            (Self::Validating | Self::Submitting, A::Begin) => self.clone(),
            (_, A::Begin) => Self::Validating,
            (Self::Validating, A::Invalid(message)) => Self::Failure(message),
            (Self::Validating, A::Dispatched) => Self::Submitting,
            (Self::Submitting, A::Succeeded) => Self::Success,
            (Self::Submitting, A::Failed(message)) => Self::Failure(message),
            (Self::Submitting, A::Reset) => Self::Submitting,
            (_, A::Reset) => Self::Idle,
            (current, _) => current.clone(),
        }
    }

    /// Whether the submit control should be disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

impl Reducible for SubmissionPhase {
    type Action = SubmissionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self { self } else { Rc::new(next) }
    }
}

/// Generation counter that lets a view ignore responses it no longer wants.
///
/// Each fetch takes a ticket; starting another fetch or tearing the view down
/// invalidates every ticket issued before it.
#[derive(Debug, Clone, Default)]
pub struct RequestFence {
    generation: Rc<Cell<u64>>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier ones.
    pub fn next(&self) -> FenceTicket {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        FenceTicket {
            generation,
            fence: self.generation.clone(),
        }
    }

    /// Invalidate outstanding tickets without issuing a new one.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Proof of which request generation a response belongs to.
#[derive(Debug, Clone)]
pub struct FenceTicket {
    generation: u64,
    fence: Rc<Cell<u64>>,
}

impl FenceTicket {
    pub fn is_current(&self) -> bool {
        self.fence.get() == self.generation
    }
}
