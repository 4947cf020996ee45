//! CLI command implementations
//!
//! One-shot commands load the knowledge base first, exactly as the page
//! does on open, then perform a single operation and print the affected
//! region. `check` never touches the network.

use std::io::{self, Write};
use std::sync::Arc;

use crate::client::HttpBackend;
use crate::config::ClientConfig;
use crate::kb::{KbController, Outcome};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::render::PanelContent;
use crate::symbols::normalize;
use crate::validator::validate;

use super::args::{Cli, Command, OutputFormat};
use super::errors::{CliError, CliResult};
use super::io::{render_message, render_statements, write_text};
use super::repl::run_repl;

/// Main entry point: parse arguments, load configuration, dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let command = cli.command();

    let config =
        ClientConfig::load_or_default(cli.config.as_deref())?.apply_overrides(cli.overrides())?;
    let fallback = match command {
        Command::Repl => Severity::Warn,
        _ => Severity::Info,
    };
    Logger::set_min_severity(config.severity(fallback)?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("method", config.default_method.as_str()),
            ("server_url", &config.server_url),
        ],
    );

    if let Command::Check { statement } = &command {
        return check(statement, &mut io::stdout());
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(async {
        let kb = connect(&config)?;
        let mut stdout = io::stdout();
        run_command(command, &kb, &mut stdout).await
    })
}

/// Build the controller for `config`
pub fn connect(config: &ClientConfig) -> CliResult<KbController> {
    let backend = HttpBackend::new(&config.server_url, config.timeout())
        .map_err(|e| CliError::boot_failed(format!("Failed to create HTTP client: {}", e)))?;
    let kb = KbController::with_message_delay(Arc::new(backend), config.message_clear_after());
    kb.set_method(config.default_method);
    log_event_with_fields(Event::ClientStart, &[("server_url", &config.server_url)]);
    Ok(kb)
}

/// Run one command against `kb`
pub async fn run_command<W: Write>(command: Command, kb: &KbController, out: &mut W) -> CliResult<()> {
    match command {
        Command::Repl => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_repl(kb, stdin, out).await
        }
        Command::List => list(kb, out).await,
        Command::Add { statement } => add(kb, &statement, out).await,
        Command::Delete { id } => delete(kb, &id, out).await,
        Command::Infer { query, format } => infer(kb, &query, format, out).await,
        Command::TruthTable { format } => truth_table(kb, format, out).await,
        Command::Check { statement } => check(&statement, out),
    }
}

async fn load(kb: &KbController) -> CliResult<()> {
    match kb.load().await {
        Outcome::Failed => Err(CliError::request_failed(kb.message().text)),
        _ => Ok(()),
    }
}

/// Print the statement list
pub async fn list<W: Write>(kb: &KbController, out: &mut W) -> CliResult<()> {
    load(kb).await?;
    write_text(out, &render_statements(&kb.snapshot()))
}

/// Normalize, validate and add `statement`, then print the refreshed list
pub async fn add<W: Write>(kb: &KbController, statement: &str, out: &mut W) -> CliResult<()> {
    kb.on_input(statement);
    let outcome = kb.add().await;
    let snapshot = kb.snapshot();
    match outcome {
        Outcome::Rejected => Err(CliError::invalid_statement(snapshot.message.text)),
        Outcome::Failed => Err(CliError::request_failed(snapshot.message.text)),
        Outcome::Completed | Outcome::Discarded => {
            let mut text = render_message(&snapshot.message);
            text.push_str(&render_statements(&snapshot));
            write_text(out, &text)
        }
    }
}

/// Delete the statement with `id`
pub async fn delete<W: Write>(kb: &KbController, id: &str, out: &mut W) -> CliResult<()> {
    load(kb).await?;
    match kb.delete(id).await {
        Outcome::Failed => Err(CliError::request_failed(kb.message().text)),
        _ => {
            let snapshot = kb.snapshot();
            let mut text = render_message(&snapshot.message);
            text.push_str(&render_statements(&snapshot));
            write_text(out, &text)
        }
    }
}

fn panel_result<W: Write>(
    outcome: Outcome,
    content: &PanelContent,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    match (outcome, content) {
        (Outcome::Failed, PanelContent::Failed(message)) => {
            Err(CliError::request_failed(message.clone()))
        }
        _ => match format {
            OutputFormat::Text => write_text(out, &content.to_text()),
            OutputFormat::Html => write_text(out, &format!("{}\n", content.to_html())),
        },
    }
}

/// Run inference for `query` with the configured method
pub async fn infer<W: Write>(
    kb: &KbController,
    query: &str,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    load(kb).await?;
    kb.set_query(query);
    let outcome = kb.run_inference().await;
    panel_result(outcome, &kb.snapshot().inference, format, out)
}

/// Print the truth table of the knowledge base
pub async fn truth_table<W: Write>(
    kb: &KbController,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    load(kb).await?;
    let outcome = kb.generate_truth_table().await;
    panel_result(outcome, &kb.snapshot().truth_table, format, out)
}

/// Offline normalize and validate
pub fn check<W: Write>(statement: &str, out: &mut W) -> CliResult<()> {
    let normalized = normalize(statement);
    let result = validate(&normalized);
    if !result.ok {
        return Err(CliError::invalid_statement(result.message));
    }
    write_text(out, &format!("{}\n{}\n", normalized.trim(), result.message))
}
