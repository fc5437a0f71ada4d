//! Command-line argument parsing for the shopbot CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Fetch the greeting and optionally ask a question
    Chat {
        /// Fetch `/welcome` before asking
        welcome: bool,
        /// Question to ask; `None` only fetches the greeting
        question: Option<String>,
    },
}

pub const USAGE: &str = "\
Usage: shopbot [--welcome] <question>...

Asks the shop assistant a question and prints the streamed answer.

Options:
  -w, --welcome   Fetch the greeting first
  -h, --help      Show this help
  -V, --version   Show version

Environment:
  SHOPBOT_BASE_URL      Backend root (default http://localhost:5000)
  SHOPBOT_CSRF_TOKEN    CSRF token to send with questions
  SHOPBOT_TIMEOUT_SECS  Request timeout in seconds (default 120)
  RUST_LOG              Log filter (default shopbot=info)";

/// Parse command-line arguments and return the appropriate command.
///
/// Words that are not flags are joined into the question. `--` ends flag
/// parsing so questions may start with a dash.
///
/// # Examples
///
/// ```
/// use shopbot::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["shopbot".to_string(), "fly".to_string(), "masks".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Chat { welcome: false, question: Some("fly masks".to_string()) }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut welcome = false;
    let mut words = Vec::new();
    let mut flags_done = false;

    // Skip the program name
    for arg in args.skip(1) {
        if flags_done {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--welcome" | "-w" => welcome = true,
            "--" => flags_done = true,
            _ => words.push(arg),
        }
    }

    let question = words.join(" ");
    let question = (!question.trim().is_empty()).then_some(question);

    if question.is_none() && !welcome {
        return CliCommand::Help;
    }
    CliCommand::Chat { welcome, question }
}
