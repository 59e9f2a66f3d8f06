use shared::store::{Action, AppState, Dispatcher, root_reducer};
use std::rc::Rc;
use yewdux::Context;
use yewdux::prelude::{Dispatch, Reducer, Store};

use crate::storage::LocalProfileStorage;

/// yewdux wrapper around the shared [`AppState`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoardState {
    pub app: Rc<AppState>,
}

impl Store for BoardState {
    fn new(_cx: &Context) -> Self {
        Self {
            app: Rc::new(AppState::restored(&LocalProfileStorage)),
        }
    }

    fn should_notify(&self, old: &Self) -> bool {
        !Rc::ptr_eq(&self.app, &old.app)
    }
}

impl BoardState {
    /// Id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<String> {
        self.app
            .auth
            .auth_data
            .as_ref()
            .and_then(|profile| profile.user_id())
            .map(ToString::to_string)
    }
}

/// An [`Action`] applied through yewdux.
#[derive(Debug)]
pub struct BoardAction(pub Action);

impl Reducer<BoardState> for BoardAction {
    fn apply(self, state: Rc<BoardState>) -> Rc<BoardState> {
        let next = root_reducer(&state.app, &self.0, &LocalProfileStorage);
        if Rc::ptr_eq(&next, &state.app) {
            state
        } else {
            Rc::new(BoardState { app: next })
        }
    }
}

/// Lets the shared action creators dispatch into the yewdux store.
#[derive(Clone)]
pub struct StoreDispatcher(pub Dispatch<BoardState>);

impl Dispatcher for StoreDispatcher {
    fn dispatch(&self, action: Action) {
        tracing::debug!(action = %action.kind(), "dispatch");
        self.0.apply(BoardAction(action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Post, PostId};

    #[test]
    fn post_actions_produce_a_new_state() {
        let state = Rc::new(BoardState::default());
        let next = BoardAction(Action::Create(Post::new("1", "hello"))).apply(Rc::clone(&state));

        assert_eq!(next.app.posts.len(), 1);
        assert!(next.should_notify(&state));
    }

    #[test]
    fn unchanged_state_is_returned_as_is() {
        let state = Rc::new(BoardState::default());
        let next = BoardAction(Action::Delete(PostId::from("missing"))).apply(Rc::clone(&state));

        assert!(Rc::ptr_eq(&state, &next));
        assert!(!next.should_notify(&state));
    }

    #[test]
    fn signed_out_state_has_no_user() {
        assert_eq!(BoardState::default().user_id(), None);
    }
}
