use crate::cli::actions::{open_store, print_notice};
use crate::cli::globals::GlobalArgs;
use crate::nav::Navigator;
use crate::routes::storefront_routes;
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
    pub from: String,
}

/// Evaluate one navigation attempt under the current session and report
/// the outcome.
///
/// # Errors
/// Returns an error when the session plumbing cannot be set up.
pub fn execute(args: &Args) -> Result<()> {
    let store = open_store(&args.globals)?;
    let mut navigator = Navigator::with_location(storefront_routes(), args.from.clone());

    let outcome = navigator.navigate(&args.path, store.session());
    for notice in &outcome.notices {
        print_notice(notice);
    }

    if outcome.committed {
        println!("navigation committed: {}", outcome.location);
    } else {
        println!("navigation cancelled, still at {}", outcome.location);
    }

    Ok(())
}
