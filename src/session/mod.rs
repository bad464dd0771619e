//! Session model shared by the store, the guard, and the navigator. The
//! session is the only mutable state in the core; everything else is a pure
//! function of it. Token material must never reach logs or debug output.

pub mod store;

pub use store::SessionStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. The storefront has exactly two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Merchant,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Merchant => "merchant",
        }
    }

    /// Default landing destination after a successful login.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::User => "/user/products",
            Self::Merchant => "/merchant/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "merchant" => Ok(Self::Merchant),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The client-held record of the current authenticated identity.
///
/// An empty token means logged out. `role` must be set whenever `token` is;
/// the store enforces this when hydrating from the vault, and login/logout
/// settle all fields together so the pair cannot drift apart at runtime.
/// `user_id` may stay empty even while logged in; the login response does
/// not always carry it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Option<Role>,
    pub user_id: String,
}

impl Session {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    /// A record is coherent when token and role are set together.
    #[must_use]
    pub fn is_coherent(&self) -> bool {
        self.is_logged_in() == self.role.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Severity of a transient user-visible notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient user-visible message. Rendering is up to the shell; nothing in
/// the core persists these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Emitted by the store on every committed transition or failed login.
/// The shell reacts to these (typically by navigating); the store itself
/// never touches the navigator.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    LoggedIn { role: Role, notice: Notice },
    LoginFailed { notice: Notice },
    LoggedOut { notice: Notice },
}
