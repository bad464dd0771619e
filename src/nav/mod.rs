//! Navigator: holds the current location and runs the guard before every
//! commit. Route-level redirects and guard redirects are followed until a
//! verdict settles; a cancelled attempt leaves the location untouched.

use crate::guard::{self, Verdict};
use crate::routes::RouteTable;
use crate::session::{Notice, Session};
use tracing::debug;

/// Redirect hops tolerated before declaring the table cyclic.
const MAX_REDIRECT_HOPS: usize = 8;

/// Result of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Whether the attempt committed to a (possibly redirected) target.
    pub committed: bool,
    /// The location after the attempt; unchanged when cancelled.
    pub location: String,
    /// Notices surfaced along the way, in order.
    pub notices: Vec<Notice>,
}

pub struct Navigator {
    table: RouteTable,
    current: String,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self::with_location(table, "/")
    }

    /// Place the navigator at `location` without running the guard; used to
    /// restore a previously committed position.
    #[must_use]
    pub fn with_location(table: RouteTable, location: impl Into<String>) -> Self {
        Self {
            table,
            current: location.into(),
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Attempt to navigate to `raw`, under the given session snapshot.
    pub fn navigate(&mut self, raw: &str, session: &Session) -> NavigationOutcome {
        let mut notices = Vec::new();
        let mut target = raw.to_string();

        for _ in 0..MAX_REDIRECT_HOPS {
            let Some(resolved) = self.table.resolve(&target) else {
                debug!("unknown destination: {}", target);
                notices.push(Notice::warning(format!("no such page: {target}")));
                return self.cancelled(notices);
            };

            // Route-level redirects apply before the guard sees the target.
            if let Some(to) = &resolved.redirect {
                target = to.clone();
                continue;
            }

            match guard::evaluate(resolved, session) {
                Verdict::Allow => {
                    let location = resolved.path.clone();
                    debug!("navigation committed: {}", location);
                    self.current = location.clone();
                    return NavigationOutcome {
                        committed: true,
                        location,
                        notices,
                    };
                }
                Verdict::Redirect { to, notice } => {
                    if let Some(notice) = notice {
                        notices.push(notice);
                    }
                    target = to;
                }
                Verdict::Deny { notice } => {
                    debug!("navigation cancelled, staying at {}", self.current);
                    notices.push(notice);
                    return self.cancelled(notices);
                }
            }
        }

        notices.push(Notice::error("redirect loop detected"));
        self.cancelled(notices)
    }

    fn cancelled(&self, notices: Vec<Notice>) -> NavigationOutcome {
        NavigationOutcome {
            committed: false,
            location: self.current.clone(),
            notices,
        }
    }
}
