//! CLI for webchat.
//!
//! A thin harness over [`ChatClient`]: one account from the environment,
//! one command per invocation.
//!
//! ```ignore
//! use webchat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, ArgsError, AskArgs, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::client::ChatClient;
use crate::config::ClientConfig;

/// Run `command` against the backend configured in the environment.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::List { offset, limit } => {
            let client = client_from_env()?;
            commands::list(&client, offset, limit, &mut std::io::stdout()).await
        }
        CliCommand::Ask(args) => {
            let client = client_from_env()?;
            commands::ask(&client, args, &mut std::io::stdout()).await
        }
    }
}

/// A client with the single account given by `WEBCHAT_ACCESS_TOKEN`.
pub fn client_from_env() -> Result<ChatClient> {
    let token = std::env::var("WEBCHAT_ACCESS_TOKEN")
        .wrap_err("WEBCHAT_ACCESS_TOKEN is not set")?;
    let paid = std::env::var("WEBCHAT_PAID")
        .map(|value| is_truthy(&value))
        .unwrap_or(false);

    let config = ClientConfig::from_env();
    debug!(base_url = %config.base_url, paid, "Configured from environment");

    let mut client = ChatClient::new(config)?;
    client.add_account(token.trim(), None, paid);
    Ok(client)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
