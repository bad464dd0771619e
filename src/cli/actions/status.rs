use crate::cli::actions::open_store;
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Show the current session.
///
/// # Errors
/// Returns an error when the session plumbing cannot be set up.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let store = open_store(globals)?;
    let session = store.session();

    if store.is_logged_in() {
        match session.role {
            Some(role) => println!("logged in as {role}"),
            None => println!("logged in"),
        }
        if !session.user_id.is_empty() {
            println!("user id: {}", session.user_id);
        }
    } else {
        println!("not logged in");
    }

    Ok(())
}
