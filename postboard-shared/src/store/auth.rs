//! Auth slice, mirrored into durable storage.

use std::rc::Rc;

use super::Action;
use crate::models::AuthProfile;
use crate::storage::ProfileStorage;

/// Who is signed in. `auth_data` is `None` exactly when nobody is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Payload of the last successful sign in or sign up
    pub auth_data: Option<AuthProfile>,
}

impl AuthState {
    /// Rebuild the slice from whatever `storage` persisted last session.
    ///
    /// A corrupt entry is logged and treated as signed out, as is the empty
    /// profile written by an `Auth` action without payload.
    #[must_use]
    pub fn restore<S: ProfileStorage + ?Sized>(storage: &S) -> Self {
        match storage.load_profile() {
            Ok(auth_data) => Self {
                auth_data: auth_data.filter(|profile| !profile.is_empty()),
            },
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable stored profile");
                Self::default()
            }
        }
    }

    /// True when a profile is held.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.auth_data.is_some()
    }

    /// Bearer token of the signed-in user.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.auth_data.as_ref()?.token.as_deref()
    }
}

/// Fold `action` into the auth slice, mirroring it into `storage`.
///
/// Storage failures are logged; the in-memory state still changes so the
/// session behaves correctly until reload.
#[must_use]
pub fn auth_reducer<S: ProfileStorage + ?Sized>(
    state: &Rc<AuthState>,
    action: &Action,
    storage: &S,
) -> Rc<AuthState> {
    match action {
        Action::Auth(payload) => {
            // `{}` means signed out here too, matching what `restore` reads back.
            let auth_data = payload.clone().filter(|profile| !profile.is_empty());
            let persisted = auth_data.clone().unwrap_or_default();
            if let Err(err) = storage.save_profile(&persisted) {
                tracing::warn!(error = %err, "failed to persist profile");
            }
            Rc::new(AuthState { auth_data })
        }
        Action::Logout => {
            if let Err(err) = storage.clear_profile() {
                tracing::warn!(error = %err, "failed to clear stored profile");
            }
            Rc::new(AuthState { auth_data: None })
        }
        Action::FetchAll(_) | Action::Create(_) | Action::Update(_) | Action::Delete(_) => {
            Rc::clone(state)
        }
    }
}
