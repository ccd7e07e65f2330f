use yewdux::{Dispatch, Store};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Error => "alert-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Toasts currently on screen.
#[derive(Debug, Default, Clone, PartialEq, Eq, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            message,
            kind,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// Fire-and-forget side channel for user feedback.
pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn warning(&self, message: &str) {
        self.notify(ToastKind::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }
}

/// Notifier that feeds the toast host through the [`ToastState`] store.
#[derive(Clone)]
pub struct ToastNotifier {
    dispatch: Dispatch<ToastState>,
}

impl std::fmt::Debug for ToastNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ToastNotifier")
    }
}

impl ToastNotifier {
    pub fn new(dispatch: Dispatch<ToastState>) -> Self {
        Self { dispatch }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        if message.trim().is_empty() {
            return;
        }
        let message = message.to_string();
        self.dispatch.reduce_mut(|state| {
            state.push(kind, message);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn ids_are_monotonic_and_dismiss_removes_one() {
        let mut state = ToastState::default();
        let first = state.push(ToastKind::Success, "Guardado".into());
        let second = state.push(ToastKind::Error, "Sin conexión".into());
        assert!(second > first);

        state.dismiss(first);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].id, second);

        // Ids are never reused after a dismissal
        let third = state.push(ToastKind::Warning, "Revise el formulario".into());
        assert!(third > second);
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<(ToastKind, String)>>);

    impl Notifier for Recorder {
        fn notify(&self, kind: ToastKind, message: &str) {
            self.0.borrow_mut().push((kind, message.to_string()));
        }
    }

    #[test]
    fn convenience_methods_pick_the_kind() {
        let recorder = Recorder::default();
        recorder.success("ok");
        recorder.warning("cuidado");
        recorder.error("falló");
        let kinds: Vec<ToastKind> = recorder.0.borrow().iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![ToastKind::Success, ToastKind::Warning, ToastKind::Error]
        );
    }

    #[test]
    fn alert_classes() {
        assert_eq!(ToastKind::Error.alert_class(), "alert-error");
        assert_eq!(ToastKind::Success.alert_class(), "alert-success");
    }
}
