//! # Tornello (Storefront Client Session Core)
//!
//! `tornello` is the client-side session manager and navigation guard for a
//! two-role storefront: buyers (role `user`) and merchants (role `merchant`).
//!
//! ## Session model
//!
//! The client holds exactly one [`session::Session`]: an opaque bearer token,
//! the role it was issued for, and an optional user id. An empty token means
//! logged out; login and logout always settle every field together, so a
//! half-set session cannot be produced at runtime. The session is mirrored
//! into a persisted vault as a single record and read back once at startup.
//!
//! ## Navigation guard
//!
//! Every navigation attempt is evaluated by [`guard::evaluate`] before it
//! commits. Destinations that require authentication redirect anonymous
//! visitors to the login page; destinations gated on a role deny everyone
//! else in place; a signed-in visitor reaching the login page is sent to
//! their role's landing destination instead.
//!
//! ## Decoupling
//!
//! The session store never navigates. It emits [`session::SessionEvent`]s
//! and the shell (here, the CLI under [`cli`]) reacts by driving the
//! [`nav::Navigator`]. This keeps the core testable without any navigation
//! subsystem or HTTP backend.

pub mod cli;
pub mod gateway;
pub mod guard;
pub mod nav;
pub mod persist;
pub mod routes;
pub mod session;
pub mod validate;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
