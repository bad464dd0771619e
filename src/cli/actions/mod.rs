pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod visit;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more
// actions are added.
mod run;

use crate::cli::globals::GlobalArgs;
use crate::gateway::HttpGateway;
use crate::persist::FileVault;
use crate::session::{Notice, NoticeLevel, SessionStore};
use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Logout { globals: GlobalArgs },
    Status { globals: GlobalArgs },
    RegisterUser(register::UserArgs),
    RegisterMerchant(register::MerchantArgs),
    Visit(visit::Args),
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute().await`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Wire the session store to its collaborators: the file vault behind the
/// session record and the HTTP gateway to the backend.
fn open_store(globals: &GlobalArgs) -> Result<SessionStore> {
    let vault = FileVault::new(globals.session_file.clone());
    let gateway = HttpGateway::new(&globals.api_url)?;
    Ok(SessionStore::open(Box::new(vault), Box::new(gateway)))
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{}", notice.message),
        NoticeLevel::Warning => println!("warning: {}", notice.message),
        NoticeLevel::Error => eprintln!("error: {}", notice.message),
    }
}
