use crate::cli::actions::{open_store, print_notice};
use crate::cli::globals::GlobalArgs;
use crate::nav::Navigator;
use crate::routes::storefront_routes;
use crate::session::{Role, SessionEvent};
use crate::validate;
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
    pub role: Role,
}

/// Authenticate, then react to the emitted session event by navigating to
/// the role's landing destination.
///
/// # Errors
/// Returns an error when the input is invalid, the session plumbing cannot
/// be set up, or the login is refused.
pub async fn execute(args: Args) -> Result<()> {
    if !validate::valid_username(&args.username) {
        bail!("username must be 3 to 50 characters");
    }
    if !validate::valid_password(args.password.expose_secret()) {
        bail!("password must be at least 6 characters");
    }

    let mut store = open_store(&args.globals)?;
    let events = store.subscribe();

    let logged_in = store.login(&args.username, &args.password, args.role).await;

    let mut navigator = Navigator::new(storefront_routes());
    for event in events.try_iter() {
        match event {
            SessionEvent::LoggedIn { role, notice } => {
                print_notice(&notice);
                let outcome = navigator.navigate(role.landing_path(), store.session());
                for notice in &outcome.notices {
                    print_notice(notice);
                }
                println!("now at {}", outcome.location);
            }
            SessionEvent::LoginFailed { notice } | SessionEvent::LoggedOut { notice } => {
                print_notice(&notice);
            }
        }
    }

    if !logged_in {
        bail!("login failed");
    }
    Ok(())
}
