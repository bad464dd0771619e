//! Command-line argument dispatch.
//!
//! This module maps validated CLI matches to the appropriate action,
//! carrying the shared globals (backend URL, session file) along.

use crate::cli::{
    actions::{login, register, visit, Action},
    commands::{ARG_API_URL, ARG_SESSION_FILE},
    globals::GlobalArgs,
};
use crate::session::Role;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let session_file = match matches.get_one::<String>(ARG_SESSION_FILE) {
        Some(path) => PathBuf::from(path),
        None => default_session_file()?,
    };

    let globals = GlobalArgs::new(api_url, session_file);

    let action = match matches.subcommand() {
        Some(("login", sub)) => {
            let role: Role = required_string(sub, "role")?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            Action::Login(login::Args {
                globals,
                username: required_string(sub, "username")?,
                password: SecretString::from(required_string(sub, "password")?),
                role,
            })
        }
        Some(("logout", _)) => Action::Logout { globals },
        Some(("status", _)) => Action::Status { globals },
        Some(("register", sub)) => match sub.subcommand() {
            Some(("user", sub)) => Action::RegisterUser(register::UserArgs {
                globals,
                username: required_string(sub, "username")?,
                password: SecretString::from(required_string(sub, "password")?),
                email: required_string(sub, "email")?,
                phone: sub.get_one::<String>("phone").cloned(),
            }),
            Some(("merchant", sub)) => Action::RegisterMerchant(register::MerchantArgs {
                globals,
                name: required_string(sub, "name")?,
                password: SecretString::from(required_string(sub, "password")?),
                contact_person: sub.get_one::<String>("contact-person").cloned(),
                phone: sub.get_one::<String>("phone").cloned(),
            }),
            _ => return Err(anyhow!("unknown register subcommand")),
        },
        Some(("visit", sub)) => Action::Visit(visit::Args {
            globals,
            path: required_string(sub, "path")?,
            from: required_string(sub, "from")?,
        }),
        _ => return Err(anyhow!("unknown subcommand")),
    };

    Ok(action)
}

fn required_string(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn default_session_file() -> Result<PathBuf> {
    let home = env::var_os("HOME").context(
        "cannot locate the session file: $HOME is not set and --session-file was not given",
    )?;
    Ok(PathBuf::from(home).join(".tornello").join("session.json"))
}
