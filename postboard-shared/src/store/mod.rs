//! # Store
//!
//! Application state lives in two slices, each folded by a pure reducer.
//! [`Store`] is the single owner that serializes reducer passes; the web
//! client binds the same [`root_reducer`] into a yewdux store instead.

pub mod action;
pub mod auth;
pub mod posts;
pub mod thunks;

pub use action::{Action, ActionKind};
pub use auth::{AuthState, auth_reducer};
pub use posts::{PostsState, posts_reducer};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::storage::ProfileStorage;

/// Everything the views render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// The feed
    pub posts: Rc<PostsState>,
    /// The signed-in user, if any
    pub auth: Rc<AuthState>,
}

impl AppState {
    /// Fresh state with the auth slice restored from `storage`.
    #[must_use]
    pub fn restored<S: ProfileStorage + ?Sized>(storage: &S) -> Self {
        Self {
            posts: Rc::default(),
            auth: Rc::new(AuthState::restore(storage)),
        }
    }
}

/// Run every slice reducer against `action`.
///
/// Returns `state` itself when no slice changed.
#[must_use]
pub fn root_reducer<S: ProfileStorage + ?Sized>(
    state: &Rc<AppState>,
    action: &Action,
    storage: &S,
) -> Rc<AppState> {
    let posts = posts_reducer(&state.posts, action);
    let auth = auth_reducer(&state.auth, action, storage);

    if Rc::ptr_eq(&posts, &state.posts) && Rc::ptr_eq(&auth, &state.auth) {
        Rc::clone(state)
    } else {
        Rc::new(AppState { posts, auth })
    }
}

/// Capability handed to action creators for delivering their result.
pub trait Dispatcher {
    /// Run `action` through the reducers.
    fn dispatch(&self, action: Action);
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action);
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Rc<AppState>)>;

/// Single-threaded owner of [`AppState`].
///
/// Reducer passes run one at a time; listeners are invoked after the pass
/// completes and only when the state actually changed.
pub struct Store<S: ProfileStorage> {
    state: RefCell<Rc<AppState>>,
    storage: S,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
}

impl<S: ProfileStorage> Store<S> {
    /// Create a store whose auth slice is restored from `storage`.
    pub fn new(storage: S) -> Self {
        let state = AppState::restored(&storage);
        Self {
            state: RefCell::new(Rc::new(state)),
            storage,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> Rc<AppState> {
        Rc::clone(&self.state.borrow())
    }

    /// Backend the auth slice is mirrored into.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Call `listener` with the new state after every dispatch that changes it.
    pub fn subscribe(&self, listener: impl Fn(&Rc<AppState>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}

impl<S: ProfileStorage> Dispatcher for Store<S> {
    fn dispatch(&self, action: Action) {
        tracing::debug!(action = %action.kind(), "dispatch");

        let (previous, next) = {
            let mut slot = self.state.borrow_mut();
            let previous = Rc::clone(&slot);
            let next = root_reducer(&previous, &action, &self.storage);
            *slot = Rc::clone(&next);
            (previous, next)
        };

        if Rc::ptr_eq(&previous, &next) {
            return;
        }

        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }
}

impl<S: ProfileStorage + fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.borrow())
            .field("storage", &self.storage)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
