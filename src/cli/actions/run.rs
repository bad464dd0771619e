use super::{login, logout, register, status, visit, Action};
use anyhow::Result;

pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Logout { globals } => logout::execute(&globals),
        Action::Status { globals } => status::execute(&globals),
        Action::RegisterUser(args) => register::execute_user(args).await,
        Action::RegisterMerchant(args) => register::execute_merchant(args).await,
        Action::Visit(args) => visit::execute(&args),
    }
}
