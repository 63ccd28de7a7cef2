use crate::{
    endpoints::{self, EndpointError, LoginPayload},
    session::{AdminUser, Session, SessionStore},
};
use reqwest::Client;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// The only role allowed to hold an admin session.
const ADMIN_ROLE: &str = "admin";

/// Decides, per navigation, whether the current session satisfies access
/// requirements, and performs the credential exchange at login.
///
/// The gate owns the rules; the [`SessionStore`] owns the state. Every
/// successful login goes through a generation-stamped [`LoginAttempt`], so
/// when two logins race, only the most recently started one can commit — a
/// slow response from an abandoned attempt is discarded instead of
/// overwriting the session.
#[derive(Debug, Clone)]
pub struct AuthGate {
    store: SessionStore,
    inner: Arc<Mutex<GateInner>>,
}

#[derive(Debug)]
struct GateInner {
    /// Generation of the newest login attempt. Only this generation may
    /// commit a session.
    latest: u64,
    /// Attempts started but not yet completed or abandoned.
    in_flight: usize,
}

/// Where the gate currently sits in the login lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No session, and no credential exchange in flight.
    Unauthenticated,
    /// At least one credential exchange is in flight.
    Authenticating,
    /// An admin session is committed.
    Authenticated,
}

/// What a route guard should do with the current navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session grants access; show the view.
    Render,
    /// Nobody is logged in; send them to the login entry point.
    RedirectToLogin,
}

impl AuthGate {
    pub fn new(store: SessionStore) -> Self {
        AuthGate {
            store,
            inner: Arc::new(Mutex::new(GateInner {
                latest: 0,
                in_flight: 0,
            })),
        }
    }

    /// The store this gate commits sessions to.
    pub fn store(&self) -> &SessionStore { &self.store }

    /// Subscribe to session changes so the guard can be re-run whenever the
    /// session is mutated, not just once at mount.
    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.store.watch()
    }

    /// Log in with the given credentials and, if the account holds the admin
    /// role, commit the resulting session to the store.
    ///
    /// Empty credentials fail immediately without a request being sent. A
    /// successful exchange for any other role leaves the store untouched and
    /// comes back as [`LoginError::AccessDenied`].
    pub async fn login(
        &self,
        client: &Client,
        hostname: &str,
        email_or_mobile: &str,
        password: &str,
    ) -> Result<Session, LoginError> {
        if email_or_mobile.is_empty() {
            return Err(LoginError::MissingEmailOrMobile);
        }
        if password.is_empty() {
            return Err(LoginError::MissingPassword);
        }

        let attempt = self.begin();
        let outcome =
            endpoints::login(client, hostname, email_or_mobile, password)
                .await;

        complete(attempt, outcome)
    }

    /// Start a login attempt by hand.
    ///
    /// [`login()`][AuthGate::login] does this for you; the split exists for
    /// hosts that drive their own transport. Starting a new attempt
    /// supersedes every attempt already in flight.
    pub fn begin(&self) -> LoginAttempt {
        let generation = {
            let mut inner = self.locked();
            inner.latest += 1;
            inner.in_flight += 1;
            inner.latest
        };

        LoginAttempt {
            gate: self.clone(),
            generation,
            finished: false,
        }
    }

    /// Tear down the current session, whoever created it.
    ///
    /// Attempts still in flight are superseded at the same time, so a late
    /// login response cannot resurrect a session after an explicit logout.
    /// Logging out while already unauthenticated is a no-op.
    pub fn logout(&self) {
        let mut inner = self.locked();
        inner.latest += 1;
        self.store.clear_token();
        log::debug!("Session cleared");
    }

    /// The route guard. Evaluate on every protected navigation; pair with
    /// [`watch()`][AuthGate::watch] to re-evaluate when the session changes
    /// underneath an already-mounted view.
    pub fn check(&self) -> RouteDecision {
        if self.store.is_authenticated() {
            RouteDecision::Render
        } else {
            RouteDecision::RedirectToLogin
        }
    }

    pub fn state(&self) -> GateState {
        if self.store.is_authenticated() {
            GateState::Authenticated
        } else if self.locked().in_flight > 0 {
            GateState::Authenticating
        } else {
            GateState::Unauthenticated
        }
    }

    fn locked(&self) -> MutexGuard<'_, GateInner> {
        // the state is a pair of counters, still meaningful after a panic
        // elsewhere
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A ticket for one login attempt.
///
/// Dropping the ticket without completing it abandons the attempt.
#[derive(Debug)]
pub struct LoginAttempt {
    gate: AuthGate,
    generation: u64,
    finished: bool,
}

impl LoginAttempt {
    /// Commit a successful credential exchange, unless this attempt has been
    /// superseded by a newer one (or by a logout) in the meantime. A
    /// superseded attempt leaves the store exactly as it was.
    pub fn commit(
        mut self,
        token: impl Into<String>,
        user: AdminUser,
    ) -> Result<Session, LoginError> {
        self.finished = true;

        let mut inner = self.gate.locked();
        inner.in_flight -= 1;

        if self.generation != inner.latest {
            log::debug!("Discarding a superseded login attempt");
            return Err(LoginError::Superseded);
        }

        let session = Session {
            token: token.into(),
            user,
        };
        self.gate.store.install(session.clone());

        Ok(session)
    }

    /// Give up on this attempt without touching the store.
    pub fn abandon(self) {}
}

impl Drop for LoginAttempt {
    fn drop(&mut self) {
        if !self.finished {
            self.gate.locked().in_flight -= 1;
        }
    }
}

fn complete(
    attempt: LoginAttempt,
    outcome: Result<LoginPayload, EndpointError>,
) -> Result<Session, LoginError> {
    match outcome {
        Ok(payload) => {
            if payload.user.role == ADMIN_ROLE {
                attempt.commit(payload.access_token, payload.user)
            } else {
                log::warn!(
                    "Refusing to start a session for the {:?} role",
                    payload.user.role
                );
                attempt.abandon();
                Err(LoginError::AccessDenied {
                    role: payload.user.role,
                })
            }
        },
        Err(EndpointError::Rejected { message }) => {
            attempt.abandon();
            Err(LoginError::Rejected {
                message: message
                    .unwrap_or_else(|| String::from("Login failed")),
            })
        },
        Err(source) => {
            attempt.abandon();
            Err(LoginError::Network(source))
        },
    }
}

/// Possible errors that may be returned by [`AuthGate::login()`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The email/mobile field was empty. No request was made.
    #[error("Email or mobile number is required")]
    MissingEmailOrMobile,
    /// The password field was empty. No request was made.
    #[error("Password is required")]
    MissingPassword,
    /// The credentials were valid, but the account doesn't hold the admin
    /// role. The session store is left untouched.
    #[error("Access denied. Admin role required.")]
    AccessDenied { role: String },
    /// The server rejected the credentials.
    #[error("{message}")]
    Rejected { message: String },
    /// The server couldn't be reached, or its response made no sense.
    #[error("Network error. Please try again.")]
    Network(#[source] EndpointError),
    /// A newer login attempt (or a logout) happened while this one was in
    /// flight, so its result was discarded.
    #[error("This login attempt was superseded by a newer one")]
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AdminUser {
        AdminUser {
            id: String::from("1"),
            email: String::from("a@b.com"),
            role: String::from(role),
            first_name: None,
            last_name: None,
            profile_pic: None,
        }
    }

    fn payload(token: &str, role: &str) -> LoginPayload {
        LoginPayload {
            access_token: String::from(token),
            user: user(role),
        }
    }

    fn gate() -> AuthGate { AuthGate::new(SessionStore::new()) }

    #[test]
    fn admin_role_commits_a_session() {
        let gate = gate();

        let session =
            complete(gate.begin(), Ok(payload("tok1", "admin"))).unwrap();

        assert_eq!(session.token, "tok1");
        assert_eq!(gate.store().token().as_deref(), Some("tok1"));
        assert_eq!(gate.state(), GateState::Authenticated);
    }

    #[test]
    fn other_roles_are_denied_and_the_store_is_untouched() {
        let gate = gate();

        let err =
            complete(gate.begin(), Ok(payload("tok1", "user"))).unwrap_err();

        assert_eq!(err.to_string(), "Access denied. Admin role required.");
        assert!(!gate.store().is_authenticated());
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[test]
    fn a_denied_login_does_not_clobber_an_existing_session() {
        let gate = gate();
        complete(gate.begin(), Ok(payload("tok1", "admin"))).unwrap();

        let _ =
            complete(gate.begin(), Ok(payload("tok2", "user"))).unwrap_err();

        assert_eq!(gate.store().token().as_deref(), Some("tok1"));
    }

    #[test]
    fn the_newest_attempt_wins() {
        let gate = gate();

        let first = gate.begin();
        let second = gate.begin();

        // the second attempt resolves first...
        let session = complete(second, Ok(payload("tok2", "admin"))).unwrap();
        assert_eq!(session.token, "tok2");

        // ...and the first attempt's late response is discarded
        let err = complete(first, Ok(payload("tok1", "admin"))).unwrap_err();
        assert!(matches!(err, LoginError::Superseded));

        assert_eq!(gate.store().token().as_deref(), Some("tok2"));
    }

    #[test]
    fn the_server_message_is_surfaced_on_rejection() {
        let gate = gate();

        let err = complete(
            gate.begin(),
            Err(EndpointError::Rejected {
                message: Some(String::from("Invalid credentials")),
            }),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn rejection_without_a_message_falls_back_to_a_generic_one() {
        let gate = gate();

        let err = complete(
            gate.begin(),
            Err(EndpointError::Rejected { message: None }),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let gate = gate();

        let err = complete(gate.begin(), Err(EndpointError::MissingPayload))
            .unwrap_err();

        assert!(matches!(err, LoginError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please try again.");
        assert!(!gate.store().is_authenticated());
    }

    #[tokio::test]
    async fn empty_fields_fail_before_any_request_is_made() {
        let gate = gate();
        let client = Client::new();

        let err = gate
            .login(&client, "courier.invalid", "", "hunter2")
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::MissingEmailOrMobile));

        let err = gate
            .login(&client, "courier.invalid", "a@b.com", "")
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::MissingPassword));

        // no attempt was ever started
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[test]
    fn logout_supersedes_attempts_in_flight() {
        let gate = gate();

        let attempt = gate.begin();
        gate.logout();

        let err =
            complete(attempt, Ok(payload("tok1", "admin"))).unwrap_err();
        assert!(matches!(err, LoginError::Superseded));
        assert!(!gate.store().is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let gate = gate();
        complete(gate.begin(), Ok(payload("tok1", "admin"))).unwrap();

        gate.logout();
        let after_one = gate.store().snapshot();
        gate.logout();

        assert_eq!(gate.store().snapshot(), after_one);
        assert_eq!(gate.check(), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn the_guard_follows_the_session() {
        let gate = gate();
        assert_eq!(gate.check(), RouteDecision::RedirectToLogin);

        gate.begin().commit("tok1", user("admin")).unwrap();
        assert_eq!(gate.check(), RouteDecision::Render);

        // an explicit logout revokes access on the next evaluation
        gate.logout();
        assert_eq!(gate.check(), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn guards_can_observe_mutations_through_watch() {
        let gate = gate();
        let mut rx = gate.watch();

        gate.begin().commit("tok1", user("admin")).unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        gate.logout();
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn state_tracks_attempts_in_flight() {
        let gate = gate();
        assert_eq!(gate.state(), GateState::Unauthenticated);

        let attempt = gate.begin();
        assert_eq!(gate.state(), GateState::Authenticating);

        attempt.abandon();
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }
}
