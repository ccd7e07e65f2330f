use shared::models::SessionUser;
use std::rc::Rc;
use yewdux::Store;

/// Gating state for the router.
///
/// `user` follows the session mirror; `ready` turns true once the startup
/// profile check has finished.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub ready: bool,
    pub user: Option<Rc<SessionUser>>,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn must_change_password(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.must_change_password)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin())
    }
}
