use crate::cli::globals::GlobalArgs;
use crate::gateway::{AuthGateway, HttpGateway, MerchantRegistration, UserRegistration};
use crate::validate;
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct UserArgs {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct MerchantArgs {
    pub globals: GlobalArgs,
    pub name: String,
    pub password: SecretString,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

/// Register a buyer account.
///
/// # Errors
/// Returns an error when the input is invalid or the backend refuses the
/// registration.
pub async fn execute_user(args: UserArgs) -> Result<()> {
    if !validate::valid_username(&args.username) {
        bail!("username must be 3 to 50 characters");
    }
    if !validate::valid_password(args.password.expose_secret()) {
        bail!("password must be at least 6 characters");
    }
    if !validate::valid_email(&args.email) {
        bail!("invalid email address");
    }
    if let Some(phone) = &args.phone {
        if !validate::valid_phone(phone) {
            bail!("invalid phone number");
        }
    }

    let gateway = HttpGateway::new(&args.globals.api_url)?;
    gateway
        .register_user(&UserRegistration {
            username: args.username,
            password: args.password,
            email: args.email,
            phone: args.phone,
        })
        .await?;

    println!("registration successful, please log in");
    Ok(())
}

/// Register a merchant account.
///
/// # Errors
/// Returns an error when the input is invalid or the backend refuses the
/// registration.
pub async fn execute_merchant(args: MerchantArgs) -> Result<()> {
    if !validate::valid_merchant_name(&args.name) {
        bail!("shop name must be 1 to 100 characters");
    }
    if !validate::valid_password(args.password.expose_secret()) {
        bail!("password must be at least 6 characters");
    }
    if let Some(phone) = &args.phone {
        if !validate::valid_phone(phone) {
            bail!("invalid phone number");
        }
    }

    let gateway = HttpGateway::new(&args.globals.api_url)?;
    gateway
        .register_merchant(&MerchantRegistration {
            name: args.name,
            password: args.password,
            contact_person: args.contact_person,
            phone: args.phone,
        })
        .await?;

    println!("registration successful, please log in");
    Ok(())
}
