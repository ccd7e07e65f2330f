//! Browser-side mirror of the signed-in user's identity.
//!
//! The mirror is a cache of what the backend last returned. It is written
//! after login, profile and password changes, cleared on logout, and every
//! change is broadcast to subscribers as an immutable snapshot.

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use shared::models::SessionUser;
use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// `localStorage` key holding the mirrored user as JSON.
pub const SESSION_KEY: &str = "inventario.user";

/// Snapshot handed to subscribers.
pub type SessionSnapshot = Option<Rc<SessionUser>>;

thread_local! {
    static SHARED_MIRROR: OnceCell<SessionMirror> = const { OnceCell::new() };
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The backing store refused the operation
    #[error("session storage failed: {0}")]
    Storage(String),
    /// The stored record could not be decoded
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

/// Where the mirrored user is persisted.
pub trait SessionStorage {
    /// # Errors
    /// [`SessionError::Corrupt`] for unreadable records, [`SessionError::Storage`] otherwise.
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;

    /// # Errors
    /// [`SessionError::Storage`] when the record cannot be saved.
    fn store(&self, user: &SessionUser) -> Result<(), SessionError>;

    fn remove(&self);
}

/// Persists the mirror in `localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSessionStorage;

impl SessionStorage for LocalSessionStorage {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        match LocalStorage::get::<SessionUser>(SESSION_KEY) {
            Ok(user) => Ok(Some(user)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => Err(SessionError::Corrupt(err.to_string())),
            Err(err) => Err(SessionError::Storage(err.to_string())),
        }
    }

    fn store(&self, user: &SessionUser) -> Result<(), SessionError> {
        LocalStorage::set(SESSION_KEY, user).map_err(|err| SessionError::Storage(err.to_string()))
    }

    fn remove(&self) {
        LocalStorage::delete(SESSION_KEY);
    }
}

fn local_storage_available() -> bool {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .is_some()
}

/// In-memory storage for tests and for browsers without `localStorage`.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: RefCell<Option<SessionUser>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        Ok(self.slot.borrow().clone())
    }

    fn store(&self, user: &SessionUser) -> Result<(), SessionError> {
        *self.slot.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn remove(&self) {
        self.slot.borrow_mut().take();
    }
}

type Listener = Rc<dyn Fn(SessionSnapshot)>;

struct MirrorInner {
    storage: Box<dyn SessionStorage>,
    current: RefCell<SessionSnapshot>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Owned store for the mirrored session.
#[derive(Clone)]
pub struct SessionMirror {
    inner: Rc<MirrorInner>,
}

impl fmt::Debug for SessionMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionMirror")
            .field("current", &self.inner.current.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl SessionMirror {
    /// Create a mirror over `storage`, seeded from whatever it holds.
    ///
    /// A corrupt stored record is discarded.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        let current = match storage.load() {
            Ok(user) => user.map(Rc::new),
            Err(err) => {
                log::warn!("discarding stored session: {err}");
                storage.remove();
                None
            }
        };
        Self {
            inner: Rc::new(MirrorInner {
                storage: Box::new(storage),
                current: RefCell::new(current),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Process-wide mirror backed by `localStorage`, or by memory when the
    /// browser does not offer it (private mode, disabled storage).
    pub fn shared() -> Self {
        SHARED_MIRROR.with(|cell| {
            cell.get_or_init(|| {
                if local_storage_available() {
                    Self::new(LocalSessionStorage)
                } else {
                    log::warn!("localStorage unavailable, session kept in memory only");
                    Self::new(MemorySessionStorage::default())
                }
            })
            .clone()
        })
    }

    /// Last written record, if any.
    pub fn read(&self) -> SessionSnapshot {
        self.inner.current.borrow().clone()
    }

    /// Replace the mirrored record and notify subscribers.
    ///
    /// The in-memory snapshot and the notification happen even when
    /// persisting fails.
    ///
    /// # Errors
    /// [`SessionError::Storage`] when the record could not be persisted.
    pub fn write(&self, user: SessionUser) -> Result<(), SessionError> {
        let persisted = self.inner.storage.store(&user);
        *self.inner.current.borrow_mut() = Some(Rc::new(user));
        self.notify();
        persisted
    }

    /// Apply `change` to the current record and write the result.
    ///
    /// Returns `Ok(false)` without notifying when there is no session.
    ///
    /// # Errors
    /// Same as [`SessionMirror::write`].
    pub fn update(&self, change: impl FnOnce(&mut SessionUser)) -> Result<bool, SessionError> {
        let Some(current) = self.read() else {
            return Ok(false);
        };
        let mut user = (*current).clone();
        change(&mut user);
        self.write(user).map(|()| true)
    }

    /// Forget the mirrored record and notify subscribers.
    pub fn clear(&self) {
        self.inner.storage.remove();
        self.inner.current.borrow_mut().take();
        self.notify();
    }

    /// Register `listener` for every subsequent change.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(SessionSnapshot) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            mirror: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self) {
        let snapshot = self.read();
        // Listeners may subscribe or unsubscribe while being called
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(snapshot.clone());
        }
    }
}

/// Handle returned by [`SessionMirror::subscribe`].
pub struct Subscription {
    id: u64,
    mirror: Weak<MirrorInner>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.mirror.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> SessionUser {
        SessionUser {
            id: 7,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: "vendedor".to_string(),
            avatar: None,
            must_change_password: false,
        }
    }

    fn recorder(mirror: &SessionMirror) -> (Rc<RefCell<Vec<SessionSnapshot>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = mirror.subscribe(move |snapshot| sink.borrow_mut().push(snapshot));
        (seen, subscription)
    }

    #[test]
    fn read_returns_none_before_any_write() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        assert!(mirror.read().is_none());
    }

    #[test]
    fn write_stores_and_notifies_with_snapshot() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        let (seen, _subscription) = recorder(&mirror);

        mirror.write(user("Ana")).unwrap();

        assert_eq!(mirror.read().unwrap().name, "Ana");
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].as_deref().map(|u| u.name.as_str()), Some("Ana"));
    }

    #[test]
    fn snapshots_are_not_affected_by_later_writes() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        mirror.write(user("Ana")).unwrap();
        let before = mirror.read().unwrap();
        mirror.write(user("Beto")).unwrap();
        assert_eq!(before.name, "Ana");
        assert_eq!(mirror.read().unwrap().name, "Beto");
    }

    #[test]
    fn update_merges_into_current_record() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        assert_eq!(mirror.update(|u| u.name = "x".into()), Ok(false));

        mirror.write(user("Ana")).unwrap();
        let changed = mirror
            .update(|u| u.avatar = Some("avatars/7.png".into()))
            .unwrap();
        assert!(changed);
        let current = mirror.read().unwrap();
        assert_eq!(current.avatar.as_deref(), Some("avatars/7.png"));
        assert_eq!(current.name, "Ana");
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        let (seen, subscription) = recorder(&mirror);
        mirror.write(user("Ana")).unwrap();
        drop(subscription);
        mirror.write(user("Beto")).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn clear_removes_record_and_notifies_none() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        mirror.write(user("Ana")).unwrap();
        let (seen, _subscription) = recorder(&mirror);
        mirror.clear();
        assert!(mirror.read().is_none());
        assert_eq!(seen.borrow().as_slice(), &[None]);
    }

    #[test]
    fn clones_share_the_same_store() {
        let mirror = SessionMirror::new(MemorySessionStorage::default());
        let other = mirror.clone();
        let (seen, _subscription) = recorder(&other);
        mirror.write(user("Ana")).unwrap();
        assert_eq!(other.read().unwrap().name, "Ana");
        assert_eq!(seen.borrow().len(), 1);
    }

    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn load(&self) -> Result<Option<SessionUser>, SessionError> {
            Err(SessionError::Corrupt("expected value at line 1".into()))
        }

        fn store(&self, _user: &SessionUser) -> Result<(), SessionError> {
            Err(SessionError::Storage("quota exceeded".into()))
        }

        fn remove(&self) {}
    }

    #[test]
    fn broken_storage_still_updates_memory_and_reports() {
        let mirror = SessionMirror::new(BrokenStorage);
        assert!(mirror.read().is_none());
        let (seen, _subscription) = recorder(&mirror);

        let result = mirror.write(user("Ana"));

        assert_eq!(
            result,
            Err(SessionError::Storage("quota exceeded".into()))
        );
        assert_eq!(mirror.read().unwrap().name, "Ana");
        assert_eq!(seen.borrow().len(), 1);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trips_the_mirror() {
        LocalStorage::delete(SESSION_KEY);
        let user = SessionUser {
            id: 1,
            name: "Carla".into(),
            email: "carla@example.com".into(),
            role: "admin".into(),
            avatar: Some("avatars/1.png".into()),
            must_change_password: false,
        };

        SessionMirror::new(LocalSessionStorage).write(user.clone()).unwrap();
        let reloaded = SessionMirror::new(LocalSessionStorage);
        assert_eq!(reloaded.read().as_deref(), Some(&user));

        reloaded.clear();
        assert!(SessionMirror::new(LocalSessionStorage).read().is_none());
    }

    #[wasm_bindgen_test]
    fn corrupt_local_record_is_discarded() {
        LocalStorage::set(SESSION_KEY, "not a user").unwrap();
        let mirror = SessionMirror::new(LocalSessionStorage);
        assert!(mirror.read().is_none());
        assert!(LocalStorage::raw().get_item(SESSION_KEY).unwrap().is_none());
    }
}
