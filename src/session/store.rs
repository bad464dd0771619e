//! Session store: exclusive owner of the in-memory session, mirrored into
//! the vault on every commit. All gateway failures are absorbed here and
//! converted into a boolean plus a notice; nothing propagates further up.

use crate::gateway::{AuthGateway, GatewayError};
use crate::persist::SessionVault;
use crate::session::{Notice, Role, Session, SessionEvent};
use secrecy::SecretString;
use std::sync::mpsc::{channel, Receiver, Sender};
use tracing::{debug, error, warn};

pub struct SessionStore {
    session: Session,
    vault: Box<dyn SessionVault>,
    gateway: Box<dyn AuthGateway>,
    events: Option<Sender<SessionEvent>>,
}

impl SessionStore {
    /// Build the store, hydrating the session from the vault once.
    ///
    /// A record failing the token/role coherence check is discarded and the
    /// vault is cleared, so a tampered record can never resurrect a
    /// half-session. A vault read error is treated as an absent record.
    #[must_use]
    pub fn open(vault: Box<dyn SessionVault>, gateway: Box<dyn AuthGateway>) -> Self {
        let session = match vault.load() {
            Ok(Some(session)) if session.is_coherent() => {
                debug!("session hydrated: {:?}", session);
                session
            }
            Ok(Some(session)) => {
                warn!("discarding incoherent session record: {:?}", session);
                if let Err(e) = vault.clear() {
                    warn!("failed to clear session vault: {e}");
                }
                Session::default()
            }
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("failed to load session record: {e}");
                if let Err(e) = vault.clear() {
                    warn!("failed to clear session vault: {e}");
                }
                Session::default()
            }
        };

        Self {
            session,
            vault,
            gateway,
            events: None,
        }
    }

    /// Event stream for the shell. At most one subscriber; a later call
    /// replaces the earlier channel.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = channel();
        self.events = Some(tx);
        rx
    }

    /// Read-only snapshot for the guard and the shell.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Authenticate against the gateway and commit the session on success.
    ///
    /// The session keeps its prior committed value for the whole call; there
    /// is no optimistic state. Every failure is absorbed: the prior session
    /// stays, a failure notice is emitted, and the call returns `false`.
    pub async fn login(&mut self, username: &str, password: &SecretString, role: Role) -> bool {
        match self.gateway.login(username, password, role).await {
            Ok(response) => {
                let Some(token) = response.usable_token() else {
                    error!("login response carried no usable token");
                    self.emit(SessionEvent::LoginFailed {
                        notice: Notice::error("login failed, please try again"),
                    });
                    return false;
                };

                let mut next = Session {
                    token: token.to_string(),
                    role: Some(role),
                    user_id: self.session.user_id.clone(),
                };
                if let Some(user_id) = response.user_id {
                    next.user_id = user_id;
                }

                self.commit(next);
                self.emit(SessionEvent::LoggedIn {
                    role,
                    notice: Notice::success("login successful"),
                });
                true
            }
            Err(e) => {
                error!("login failed: {e}");
                let notice = match e {
                    GatewayError::Rejected { message, .. } if !message.is_empty() => {
                        Notice::error(message)
                    }
                    _ => Notice::error("login failed, please try again"),
                };
                self.emit(SessionEvent::LoginFailed { notice });
                false
            }
        }
    }

    /// Clear the session everywhere. Safe to call when already logged out:
    /// same end state, same event.
    pub fn logout(&mut self) {
        self.session = Session::default();
        if let Err(e) = self.vault.clear() {
            warn!("failed to clear session vault: {e}");
        }
        debug!("session cleared");
        self.emit(SessionEvent::LoggedOut {
            notice: Notice::success("logged out"),
        });
    }

    fn commit(&mut self, next: Session) {
        self.session = next;
        // The vault is a mirror, not a second owner: a persistence failure
        // leaves the in-memory session committed.
        if let Err(e) = self.vault.store(&self.session) {
            warn!("failed to persist session record: {e}");
        }
        debug!("session committed: {:?}", self.session);
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::{MerchantRegistration, TokenResponse, UserRegistration};
    use crate::persist::{MemoryVault, VaultError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FakeGateway {
        responses: Mutex<VecDeque<Result<TokenResponse, GatewayError>>>,
    }

    impl FakeGateway {
        fn replying(responses: Vec<Result<TokenResponse, GatewayError>>) -> Box<Self> {
            Box::new(Self {
                responses: Mutex::new(responses.into()),
            })
        }

        fn token(token: &str) -> Box<Self> {
            Self::replying(vec![Ok(TokenResponse {
                access_token: Some(token.to_string()),
                ..TokenResponse::default()
            })])
        }

        fn rejecting() -> Box<Self> {
            Self::replying(vec![Err(GatewayError::Rejected {
                status: 401,
                message: "invalid username or password".to_string(),
            })])
        }
    }

    #[async_trait]
    impl AuthGateway for FakeGateway {
        async fn login(
            &self,
            _username: &str,
            _password: &SecretString,
            _role: Role,
        ) -> Result<TokenResponse, GatewayError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(GatewayError::Rejected {
                        status: 401,
                        message: String::new(),
                    })
                })
        }

        async fn register_user(&self, _r: &UserRegistration) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn register_merchant(&self, _r: &MerchantRegistration) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    /// Vault whose writes always fail; loads stay empty.
    struct BrokenVault;

    impl SessionVault for BrokenVault {
        fn load(&self) -> Result<Option<Session>, VaultError> {
            Ok(None)
        }

        fn store(&self, _session: &Session) -> Result<(), VaultError> {
            Err(VaultError::Poisoned)
        }

        fn clear(&self) -> Result<(), VaultError> {
            Err(VaultError::Poisoned)
        }
    }

    fn secret(password: &str) -> SecretString {
        SecretString::from(password.to_string())
    }

    #[tokio::test]
    async fn successful_login_commits_session_and_vault() {
        let vault = MemoryVault::new();
        let mut store = SessionStore::open(Box::new(vault.clone()), FakeGateway::token("t1"));
        let events = store.subscribe();

        assert!(!store.is_logged_in());
        assert!(store.login("alice", &secret("pw"), Role::User).await);

        assert!(store.is_logged_in());
        assert_eq!(store.session().token, "t1");
        assert_eq!(store.session().role, Some(Role::User));

        let persisted = vault.snapshot().unwrap();
        assert_eq!(persisted.token, "t1");
        assert_eq!(persisted.role, Some(Role::User));

        assert!(matches!(
            events.try_recv().unwrap(),
            SessionEvent::LoggedIn {
                role: Role::User,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejected_login_leaves_everything_untouched() {
        let vault = MemoryVault::new();
        let mut store = SessionStore::open(Box::new(vault.clone()), FakeGateway::rejecting());
        let events = store.subscribe();

        assert!(!store.login("bob", &secret("wrong"), Role::Merchant).await);

        assert!(!store.is_logged_in());
        assert_eq!(store.session(), &Session::default());
        assert!(vault.snapshot().is_none());

        match events.try_recv().unwrap() {
            SessionEvent::LoginFailed { notice } => {
                assert_eq!(notice.message, "invalid username or password");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_body_without_token_is_a_failure() {
        let vault = MemoryVault::new();
        let gateway = FakeGateway::replying(vec![Ok(TokenResponse::default())]);
        let mut store = SessionStore::open(Box::new(vault.clone()), gateway);

        assert!(!store.login("alice", &secret("pw"), Role::User).await);
        assert!(!store.is_logged_in());
        assert!(vault.snapshot().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let vault = MemoryVault::new();
        let mut store = SessionStore::open(Box::new(vault.clone()), FakeGateway::token("t1"));
        let events = store.subscribe();

        assert!(store.login("alice", &secret("pw"), Role::User).await);
        let _ = events.try_recv();

        store.logout();
        assert!(!store.is_logged_in());
        assert!(vault.snapshot().is_none());
        assert!(matches!(
            events.try_recv().unwrap(),
            SessionEvent::LoggedOut { .. }
        ));

        // Again, from the logged-out state: same end state, same event.
        store.logout();
        assert!(!store.is_logged_in());
        assert!(matches!(
            events.try_recv().unwrap(),
            SessionEvent::LoggedOut { .. }
        ));
    }

    #[tokio::test]
    async fn incoherent_record_forces_logout_and_clears_the_vault() {
        let vault = MemoryVault::new();
        vault
            .store(&Session {
                token: "t1".to_string(),
                role: None,
                user_id: String::new(),
            })
            .unwrap();

        let store = SessionStore::open(Box::new(vault.clone()), FakeGateway::rejecting());
        assert!(!store.is_logged_in());
        assert!(vault.snapshot().is_none());
    }

    #[tokio::test]
    async fn coherent_record_survives_a_restart() {
        let vault = MemoryVault::new();
        let mut store = SessionStore::open(Box::new(vault.clone()), FakeGateway::token("t1"));
        assert!(store.login("alice", &secret("pw"), Role::User).await);
        drop(store);

        let store = SessionStore::open(Box::new(vault.clone()), FakeGateway::rejecting());
        assert!(store.is_logged_in());
        assert_eq!(store.session().role, Some(Role::User));
    }

    #[tokio::test]
    async fn vault_failures_do_not_block_the_session() {
        let mut store = SessionStore::open(Box::new(BrokenVault), FakeGateway::token("t1"));

        assert!(store.login("alice", &secret("pw"), Role::User).await);
        assert!(store.is_logged_in());

        store.logout();
        assert!(!store.is_logged_in());
    }

    #[tokio::test]
    async fn user_id_from_the_response_wins_but_absence_keeps_the_prior_one() {
        let vault = MemoryVault::new();
        vault
            .store(&Session {
                token: "t0".to_string(),
                role: Some(Role::User),
                user_id: "u1".to_string(),
            })
            .unwrap();

        // Re-login without a user id in the response: the prior id is kept.
        let gateway = FakeGateway::replying(vec![
            Ok(TokenResponse {
                access_token: Some("t1".to_string()),
                ..TokenResponse::default()
            }),
            Ok(TokenResponse {
                access_token: Some("t2".to_string()),
                user_id: Some("u2".to_string()),
                ..TokenResponse::default()
            }),
        ]);
        let mut store = SessionStore::open(Box::new(vault), gateway);

        assert!(store.login("alice", &secret("pw"), Role::User).await);
        assert_eq!(store.session().user_id, "u1");
        assert_eq!(store.session().token, "t1");

        assert!(store.login("alice", &secret("pw"), Role::User).await);
        assert_eq!(store.session().user_id, "u2");
        assert_eq!(store.session().token, "t2");
    }

    #[tokio::test]
    async fn events_are_optional() {
        // No subscriber: transitions still commit, nothing panics.
        let mut store = SessionStore::open(Box::new(MemoryVault::new()), FakeGateway::token("t1"));
        assert!(store.login("alice", &secret("pw"), Role::User).await);
        store.logout();
    }
}
