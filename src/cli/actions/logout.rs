use crate::cli::actions::{open_store, print_notice};
use crate::cli::globals::GlobalArgs;
use crate::nav::Navigator;
use crate::routes::{storefront_routes, LOGIN_PATH};
use crate::session::SessionEvent;
use anyhow::Result;

/// Clear the session and land back on the login page.
///
/// # Errors
/// Returns an error when the session plumbing cannot be set up.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let mut store = open_store(globals)?;
    let events = store.subscribe();

    store.logout();

    let mut navigator = Navigator::new(storefront_routes());
    for event in events.try_iter() {
        if let SessionEvent::LoggedOut { notice } = event {
            print_notice(&notice);
            let outcome = navigator.navigate(LOGIN_PATH, store.session());
            println!("now at {}", outcome.location);
        }
    }

    Ok(())
}
