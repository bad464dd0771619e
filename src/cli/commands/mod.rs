pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";

fn username_arg() -> Arg {
    Arg::new("username")
        .short('u')
        .long("username")
        .help("Account name")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help("Account password")
        .required(true)
}

fn login_command() -> Command {
    Command::new("login")
        .about("Authenticate and start a session")
        .arg(username_arg())
        .arg(password_arg())
        .arg(
            Arg::new("role")
                .short('r')
                .long("role")
                .help("Role to log in as")
                .value_parser(["user", "merchant"])
                .required(true),
        )
}

fn register_command() -> Command {
    Command::new("register")
        .about("Create a new account")
        .subcommand_required(true)
        .subcommand(
            Command::new("user")
                .about("Register a buyer account")
                .arg(username_arg())
                .arg(password_arg())
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Contact email")
                        .required(true),
                )
                .arg(Arg::new("phone").long("phone").help("Phone number")),
        )
        .subcommand(
            Command::new("merchant")
                .about("Register a merchant account")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Shop name")
                        .required(true),
                )
                .arg(password_arg())
                .arg(
                    Arg::new("contact-person")
                        .long("contact-person")
                        .help("Contact person"),
                )
                .arg(Arg::new("phone").long("phone").help("Phone number")),
        )
}

fn visit_command() -> Command {
    Command::new("visit")
        .about("Evaluate a navigation attempt against the current session")
        .arg(
            Arg::new("path")
                .help("Destination path, e.g. /user/products")
                .required(true),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Location the attempt starts from")
                .default_value("/"),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("tornello")
        .about("Storefront client session and navigation guard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the storefront backend")
                .env("TORNELLO_API_URL")
                .default_value("http://localhost:8000")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Path of the persisted session record")
                .env("TORNELLO_SESSION_FILE")
                .global(true),
        )
        .subcommand(login_command())
        .subcommand(Command::new("logout").about("Clear the current session"))
        .subcommand(Command::new("status").about("Show the current session"))
        .subcommand(register_command())
        .subcommand(visit_command());

    logging::with_args(command)
}
