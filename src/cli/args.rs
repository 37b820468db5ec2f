//! Command-line argument parsing for the webchat CLI.

use thiserror::Error;

/// Page size used by `--list` when `--limit` is absent.
pub const DEFAULT_LIST_LIMIT: u32 = 20;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// List conversations of the configured account
    List { offset: u32, limit: u32 },
    /// Send a prompt
    Ask(AskArgs),
}

/// Arguments of a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskArgs {
    pub prompt: String,
    pub conversation_id: Option<String>,
    pub parent_id: Option<String>,
    /// Print the answer as it arrives.
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("{flag} expects a number, got {value:?}")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("no prompt given")]
    MissingPrompt,
}

/// Usage text printed by `--help` and after argument errors.
pub const USAGE: &str = "\
usage: webchat [--stream] [--conversation <id> [--parent <id>]] <prompt>...
       webchat --list [--offset <n>] [--limit <n>]
       webchat --version

environment:
  WEBCHAT_ACCESS_TOKEN  access token (required)
  WEBCHAT_PAID          set to 1 for a paid-tier account
  WEBCHAT_BASE_URL      backend root
  WEBCHAT_TIMEOUT_SECS  request timeout in seconds
  WEBCHAT_REFERER       Referer header sent with prompts
  RUST_LOG              log filter (default: warn)";

/// Parse command-line arguments into the command to execute.
///
/// The first item is the program name and is skipped. Words that are not
/// options are joined with spaces into the prompt.
///
/// # Examples
///
/// ```
/// use webchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["webchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut ask = AskArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut list = false;
    let mut offset = 0;
    let mut limit = DEFAULT_LIST_LIMIT;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--stream" | "-s" => ask.stream = true,
            "--list" | "-l" => list = true,
            "--conversation" | "-c" => ask.conversation_id = Some(value(&arg, args.next())?),
            "--parent" | "-p" => ask.parent_id = Some(value(&arg, args.next())?),
            "--offset" => offset = number(&arg, args.next())?,
            "--limit" => limit = number(&arg, args.next())?,
            "--" => words.extend(args.by_ref()),
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            _ => words.push(arg),
        }
    }

    if list {
        return Ok(CliCommand::List { offset, limit });
    }

    ask.prompt = words.join(" ");
    if ask.prompt.trim().is_empty() {
        return Err(ArgsError::MissingPrompt);
    }
    Ok(CliCommand::Ask(ask))
}

fn value(flag: &str, next: Option<String>) -> Result<String, ArgsError> {
    next.ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn number(flag: &str, next: Option<String>) -> Result<u32, ArgsError> {
    let raw = value(flag, next)?;
    raw.parse().map_err(|_| ArgsError::InvalidNumber {
        flag: flag.to_string(),
        value: raw,
    })
}
