use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use policydesk_agent::llm::HttpLlmClient;
use policydesk_agent::runtime::{Answer, Orchestrator};
use policydesk_core::config::{AppConfig, LoadOptions};
use policydesk_core::document::{Document, PlainTextExtractor};

const EXIT_TOKENS: [&str; 3] = ["exit", "quit", "bye"];
const FAREWELL: &str = "Thank you for using the policy assistant. Goodbye!";

pub fn run(config_path: Option<PathBuf>) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to initialize async runtime: {error}");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(run_chat(config_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(config: &AppConfig) {
    use policydesk_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

async fn run_chat(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(LoadOptions { config_path, ..LoadOptions::default() })
        .context("configuration failed to load")?;
    init_logging(&config);

    // Missing document degrades to placeholder content; chat keeps working.
    let document = Document::load_degraded(&PlainTextExtractor, &config.document.path);
    let client = HttpLlmClient::from_config(&config.llm).context("backend client setup failed")?;
    let mut orchestrator = Orchestrator::from_document(&document, Box::new(client));

    println!("Smart Term Plan Plus - policy assistant");
    println!("Ask about benefits, features, offers, or pricing.");
    println!("Type 'exit' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // A single ctrl_c future for the whole session, so an interrupt raised
    // during a backend call is not lost to a handler nobody is awaiting.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                println!("\n{FAREWELL}");
                return Ok(());
            }
            line = lines.next_line() => {
                let Some(input) = line.context("failed to read from stdin")? else {
                    println!("{FAREWELL}");
                    return Ok(());
                };
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if is_exit_token(input) {
                    println!("{FAREWELL}");
                    return Ok(());
                }

                let interrupt = async {
                    let _ = (&mut ctrl_c).await;
                };
                match answer_or_interrupt(orchestrator.handle_query(input), interrupt).await {
                    None => {
                        println!("\n{FAREWELL}");
                        return Ok(());
                    }
                    Some(Ok(answer)) => {
                        println!("[{}] {}\n", answer.topic.display_name(), answer.text);
                    }
                    Some(Err(query_error)) => {
                        error!(
                            event_name = "chat.query.failed",
                            error = %format!("{query_error:#}"),
                            "query failed, loop continues"
                        );
                        println!(
                            "Sorry, that question could not be answered ({query_error:#}). \
                             Please try again with a different question.\n"
                        );
                    }
                }
            }
        }
    }
}

/// Races an in-flight query against an interrupt. `None` means the
/// interrupt won and the session should end.
async fn answer_or_interrupt<A, I>(answer: A, interrupt: I) -> Option<Result<Answer>>
where
    A: Future<Output = Result<Answer>>,
    I: Future<Output = ()>,
{
    tokio::select! {
        _ = interrupt => None,
        outcome = answer => Some(outcome),
    }
}

fn is_exit_token(input: &str) -> bool {
    EXIT_TOKENS.iter().any(|token| input.eq_ignore_ascii_case(token))
}
