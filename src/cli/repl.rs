//! Interactive session
//!
//! A bare line replaces the draft statement (an input-change event: the
//! text is normalized and the message line is blanked). Lines starting
//! with `:` are commands.

use std::io::Write;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::InferenceMethod;
use crate::kb::KbController;

use super::errors::CliResult;
use super::io::{render_message, render_page, render_statements, write_text};

const HELP: &str = "\
Commands:
  <text>            set the draft statement
  :add [statement]  add the statement (or the draft)
  :op <token>       insert an operator at the draft's caret (¬ ∧ ∨ → ↔ ( ))
  :del <n|id>       delete by list position or id
  :list             reload the list from the server
  :infer <query>    run inference with the current method
  :method <name>    truth-table, modus-ponens or resolution
  :table            generate the truth table
  :help             show this help
  :quit             leave
";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Draft(String),
    Add(Option<String>),
    Operator(String),
    Delete(String),
    List,
    Infer(String),
    Method(String),
    Table,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Draft(line.to_string());
    };
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match (name, arg) {
        ("add", arg) => ReplCommand::Add(arg),
        ("op", Some(token)) => ReplCommand::Operator(token),
        ("del" | "delete", Some(target)) => ReplCommand::Delete(target),
        ("list", None) => ReplCommand::List,
        ("infer", Some(query)) => ReplCommand::Infer(query),
        ("method", Some(method)) => ReplCommand::Method(method),
        ("table", None) => ReplCommand::Table,
        ("help", None) => ReplCommand::Help,
        ("quit" | "q" | "exit", None) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Resolve `:del` targets: a 1-based list position, else a raw id
fn resolve_target(kb: &KbController, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| kb.statement_at(n - 1))
        .map(|statement| statement.id)
        .unwrap_or_else(|| target.to_string())
}

fn draft_line(kb: &KbController) -> String {
    format!("draft: {}\n", kb.snapshot().input.value())
}

fn list_section(kb: &KbController) -> String {
    let snapshot = kb.snapshot();
    let mut out = render_statements(&snapshot);
    out.push_str(&render_message(&snapshot.message));
    out
}

/// What one input line turns into
enum Step<'a> {
    Quit,
    /// Printed right away
    Now(String),
    /// Printed once the request completes
    Later(LocalBoxFuture<'a, String>),
}

/// Apply the synchronous part of `command` and hand back the rest.
///
/// Everything read from the current state (draft, target id, query) is
/// captured here, before the next line can change it.
fn dispatch(kb: &KbController, command: ReplCommand) -> Step<'_> {
    match command {
        ReplCommand::Quit => Step::Quit,
        ReplCommand::Help => Step::Now(HELP.to_string()),
        ReplCommand::Draft(raw) => {
            kb.on_input(&raw);
            Step::Now(draft_line(kb))
        }
        ReplCommand::Operator(token) => {
            kb.press_operator(&token);
            Step::Now(draft_line(kb))
        }
        ReplCommand::Method(name) => Step::Now(match name.parse::<InferenceMethod>() {
            Ok(method) => {
                kb.set_method(method);
                format!("method: {}\n", method.label())
            }
            Err(reason) => format!("{}\n", reason),
        }),
        ReplCommand::Unknown(line) => {
            Step::Now(format!("Unknown command '{}'. Type :help.\n", line))
        }
        ReplCommand::Add(statement) => {
            if let Some(statement) = statement {
                kb.on_input(&statement);
            }
            Step::Later(
                async move {
                    kb.add().await;
                    list_section(kb)
                }
                .boxed_local(),
            )
        }
        ReplCommand::Delete(target) => {
            let id = resolve_target(kb, &target);
            Step::Later(
                async move {
                    kb.delete(&id).await;
                    list_section(kb)
                }
                .boxed_local(),
            )
        }
        ReplCommand::List => Step::Later(
            async move {
                kb.refresh().await;
                list_section(kb)
            }
            .boxed_local(),
        ),
        ReplCommand::Infer(query) => {
            kb.set_query(&query);
            Step::Later(
                async move {
                    kb.run_inference().await;
                    kb.snapshot().inference.to_text()
                }
                .boxed_local(),
            )
        }
        ReplCommand::Table => Step::Later(
            async move {
                kb.generate_truth_table().await;
                kb.snapshot().truth_table.to_text()
            }
            .boxed_local(),
        ),
    }
}

/// Run the session until `:quit` or end of input.
///
/// Requests still in flight at that point are awaited and printed.
pub async fn run_repl<R: AsyncBufRead + Unpin, W: Write>(
    kb: &KbController,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    kb.load().await;
    write_text(out, &render_page(&kb.snapshot()))?;
    write_text(out, "Type :help for commands.\n> ")?;

    let mut lines = input.lines();
    let mut pending: FuturesUnordered<LocalBoxFuture<'_, String>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            // Completed requests first; this also gives a freshly queued
            // request its first poll before the next line is read.
            biased;

            Some(text) = pending.next(), if !pending.is_empty() => {
                write_text(out, &text)?;
                write_text(out, "> ")?;
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match dispatch(kb, parse_line(&line)) {
                    Step::Quit => break,
                    Step::Now(text) => {
                        write_text(out, &text)?;
                        write_text(out, "> ")?;
                    }
                    Step::Later(request) => pending.push(request),
                }
            }
        }
    }

    while let Some(text) = pending.next().await {
        write_text(out, &text)?;
    }
    Ok(())
}
