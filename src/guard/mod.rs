//! Navigation guard. A pure decision procedure: given the target's metadata
//! and the current session snapshot, produce a verdict. No suspension, no
//! external calls, no state of its own.

use crate::routes::{ResolvedRoute, LOGIN_PATH};
use crate::session::{Notice, Session};

/// Outcome of evaluating one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Navigation proceeds to the target.
    Allow,
    /// Target replaced with another destination.
    Redirect { to: String, notice: Option<Notice> },
    /// Navigation cancelled in place; the current destination stays.
    Deny { notice: Notice },
}

/// Decide one navigation attempt.
///
/// The authentication check strictly precedes the role check: an anonymous
/// request to a role-gated destination is redirected to the login page,
/// never denied. A signed-in visitor heading to the login page is sent to
/// their role's landing destination instead; if the session carries no
/// recognizable role, the login page itself is the fallback.
#[must_use]
pub fn evaluate(target: &ResolvedRoute, session: &Session) -> Verdict {
    if target.meta.requires_auth {
        if !session.is_logged_in() {
            return Verdict::Redirect {
                to: LOGIN_PATH.to_string(),
                notice: Some(Notice::warning("please log in first")),
            };
        }

        if let Some(required) = target.meta.role {
            if session.role != Some(required) {
                return Verdict::Deny {
                    notice: Notice::error("you are not authorized to view this page"),
                };
            }
        }
    }

    if target.path == LOGIN_PATH && session.is_logged_in() {
        if let Some(role) = session.role {
            return Verdict::Redirect {
                to: role.landing_path().to_string(),
                notice: None,
            };
        }
    }

    Verdict::Allow
}
