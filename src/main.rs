use shopbot::cli::{format_error, format_segment, parse_args, CliCommand, USAGE, VERSION};
use shopbot::models::{RenderedSegment, Sender};
use shopbot::session::Completion;
use shopbot::{ChatClient, ChatConfig};

use color_eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr so stdout carries only transcript lines.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopbot=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (welcome, question) = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("shopbot {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Chat { welcome, question } => (welcome, question),
    };

    init_logging();

    let config = ChatConfig::from_env()?;
    let client = ChatClient::from_config(config)?;

    let mut print = |segment: RenderedSegment, sender: Sender| {
        println!("{}", format_segment(&segment, sender));
    };

    if welcome {
        if let Err(e) = client.welcome(&mut print).await {
            warn!(
                code = e.error_code(),
                category = %e.category(),
                retryable = e.is_retryable(),
                "Greeting failed: {}",
                e
            );
            eprintln!("{}", format_error(&e));
        }
    }

    let Some(question) = question else {
        return Ok(());
    };

    // Ctrl-C abandons the session instead of killing the process mid-line
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let summary = match client.ask(&question, &mut print, &cancel).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!(code = e.error_code(), category = %e.category(), "Question refused: {}", e);
            eprintln!("{}", format_error(&e));
            std::process::exit(2);
        }
    };
    info!(
        session_id = %summary.id,
        completion = %summary.completion,
        messages = summary.messages,
        "Done"
    );

    match summary.completion {
        Completion::TransportFailed => std::process::exit(1),
        Completion::Abandoned => std::process::exit(130),
        Completion::Sentinel | Completion::TransportClosed => Ok(()),
    }
}
