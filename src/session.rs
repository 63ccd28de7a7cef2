use serde_derive::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// The admin identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(
        default,
        rename = "firstName",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_name: Option<String>,
    #[serde(
        default,
        rename = "lastName",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Option<String>,
    #[serde(
        default,
        rename = "profilePic",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_pic: Option<String>,
}

/// A signed-in session: the bearer credential plus the user it belongs to.
///
/// Keeping both fields in a single value makes the session invariant
/// structural. A token is never observable without its user, or vice versa.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Session {
    pub token: String,
    pub user: AdminUser,
}

/// The single source of truth for "who is logged in".
///
/// Cloning the store yields another handle to the same underlying state, so a
/// host can hand one copy to the login flow and another to each view. Writes
/// are single-step replacements of the whole session; readers always see
/// either the previous or the next session, never a mix of the two.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// Create an empty store. Nobody is logged in.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        SessionStore { tx: Arc::new(tx) }
    }

    /// Replace the current session unconditionally.
    ///
    /// The token is not validated in any way. Deciding *when* to call this is
    /// the caller's job (normally [`AuthGate`][crate::AuthGate]).
    pub fn set_token(&self, token: impl Into<String>, user: AdminUser) {
        let session = Session {
            token: token.into(),
            user,
        };
        self.tx.send_replace(Some(session));
    }

    /// Drop the current session unconditionally. Calling this while already
    /// logged out is a no-op.
    pub fn clear_token(&self) {
        self.tx.send_replace(None);
    }

    pub(crate) fn install(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    /// A consistent snapshot of the current session, if any.
    pub fn snapshot(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    /// The currently signed-in user, if any.
    pub fn user(&self) -> Option<AdminUser> {
        self.tx.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Subscribe to session changes.
    ///
    /// Every mutation through [`set_token()`][SessionStore::set_token] or
    /// [`clear_token()`][SessionStore::clear_token] wakes the receiver, which
    /// lets a route guard re-evaluate access without being wired into any
    /// particular UI framework's reactivity.
    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}
