//! End-to-end session scenarios for the storefront client core.
//!
//! This suite wires the real session store, guard, and navigator together
//! against a stub gateway and an in-memory vault, and walks the flows a
//! client goes through:
//! 1. An anonymous visitor bounced off the guarded subtrees.
//! 2. A buyer logging in, landing on the product list, and trespassing
//!    into the merchant subtree.
//! 3. A restart picking the persisted session back up.
//! 4. Logout returning everything to the anonymous state.

use async_trait::async_trait;
use secrecy::SecretString;
use tornello::gateway::{
    AuthGateway, GatewayError, MerchantRegistration, TokenResponse, UserRegistration,
};
use tornello::nav::Navigator;
use tornello::persist::MemoryVault;
use tornello::routes::storefront_routes;
use tornello::session::{NoticeLevel, Role, SessionEvent, SessionStore};

/// Gateway stub: a configured token means every login succeeds; no token
/// means every login is refused.
struct StubGateway {
    token: Option<&'static str>,
}

#[async_trait]
impl AuthGateway for StubGateway {
    async fn login(
        &self,
        _username: &str,
        _password: &SecretString,
        _role: Role,
    ) -> Result<TokenResponse, GatewayError> {
        match self.token {
            Some(token) => Ok(TokenResponse {
                access_token: Some(token.to_string()),
                token_type: Some("Bearer".to_string()),
                expires_in: Some(1800),
                user_id: None,
            }),
            None => Err(GatewayError::Rejected {
                status: 401,
                message: "invalid username or password".to_string(),
            }),
        }
    }

    async fn register_user(&self, _r: &UserRegistration) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn register_merchant(&self, _r: &MerchantRegistration) -> Result<(), GatewayError> {
        Ok(())
    }
}

fn secret(password: &str) -> SecretString {
    SecretString::from(password.to_string())
}

#[tokio::test]
async fn buyer_walks_the_whole_flow() {
    let vault = MemoryVault::new();
    let mut store = SessionStore::open(
        Box::new(vault.clone()),
        Box::new(StubGateway { token: Some("t-alice") }),
    );
    let events = store.subscribe();
    let mut navigator = Navigator::new(storefront_routes());

    // Anonymous: the guarded subtree bounces to the login page.
    let outcome = navigator.navigate("/user/products", store.session());
    assert!(outcome.committed);
    assert_eq!(outcome.location, "/login");
    assert_eq!(outcome.notices[0].level, NoticeLevel::Warning);

    // Login commits the session and the shell navigates on the event.
    assert!(store.login("alice", &secret("secret1"), Role::User).await);
    match events.try_recv().expect("login should emit an event") {
        SessionEvent::LoggedIn { role, .. } => {
            let outcome = navigator.navigate(role.landing_path(), store.session());
            assert!(outcome.committed);
            assert_eq!(outcome.location, "/user/products");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    // The persisted mirror carries the same record.
    let persisted = vault.snapshot().expect("the vault should hold the record");
    assert_eq!(persisted.token, "t-alice");
    assert_eq!(persisted.role, Some(Role::User));

    // A buyer cannot enter the merchant subtree; the location stays put.
    let outcome = navigator.navigate("/merchant/orders", store.session());
    assert!(!outcome.committed);
    assert_eq!(outcome.location, "/user/products");
    assert_eq!(outcome.notices[0].level, NoticeLevel::Error);

    // Signed in, the login page redirects home.
    let outcome = navigator.navigate("/login", store.session());
    assert!(outcome.committed);
    assert_eq!(outcome.location, "/user/products");

    // Logout clears memory and mirror, and the shell lands on login.
    store.logout();
    assert!(!store.is_logged_in());
    assert!(vault.snapshot().is_none());
    match events.try_recv().expect("logout should emit an event") {
        SessionEvent::LoggedOut { .. } => {
            let outcome = navigator.navigate("/login", store.session());
            assert!(outcome.committed);
            assert_eq!(outcome.location, "/login");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_login_changes_nothing() {
    let vault = MemoryVault::new();
    let mut store = SessionStore::open(
        Box::new(vault.clone()),
        Box::new(StubGateway { token: None }),
    );
    let events = store.subscribe();

    assert!(!store.login("bob", &secret("wrong1"), Role::Merchant).await);
    assert!(!store.is_logged_in());
    assert!(vault.snapshot().is_none());

    match events.try_recv().expect("a failed login should emit an event") {
        SessionEvent::LoginFailed { notice } => {
            assert_eq!(notice.level, NoticeLevel::Error);
            assert_eq!(notice.message, "invalid username or password");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    // The guard still treats the client as anonymous.
    let mut navigator = Navigator::new(storefront_routes());
    let outcome = navigator.navigate("/merchant/dashboard", store.session());
    assert_eq!(outcome.location, "/login");
}

#[tokio::test]
async fn a_restart_resumes_the_persisted_session() {
    let vault = MemoryVault::new();

    {
        let mut store = SessionStore::open(
            Box::new(vault.clone()),
            Box::new(StubGateway { token: Some("t-merchant") }),
        );
        assert!(store.login("acme", &secret("secret1"), Role::Merchant).await);
    }

    // New process: the gateway is never consulted, the vault record wins.
    let store = SessionStore::open(
        Box::new(vault.clone()),
        Box::new(StubGateway { token: None }),
    );
    assert!(store.is_logged_in());
    assert_eq!(store.session().role, Some(Role::Merchant));

    let mut navigator = Navigator::new(storefront_routes());
    let outcome = navigator.navigate("/merchant", store.session());
    assert!(outcome.committed);
    assert_eq!(outcome.location, "/merchant/dashboard");
}
