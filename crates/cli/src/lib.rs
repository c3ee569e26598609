pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use policydesk_core::keywords::Topic;

#[derive(Debug, Parser)]
#[command(
    name = "policydesk",
    about = "Policy document Q&A assistant",
    long_about = "Route insurance policy questions to specialized benefit/offer responders \
                  backed by keyword-filtered excerpts of the policy document.",
    after_help = "Examples:\n  policydesk chat\n  policydesk classify \"What is the death benefit coverage?\"\n  policydesk excerpt offer\n  policydesk doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TopicArg {
    Benefit,
    Offer,
}

impl From<TopicArg> for Topic {
    fn from(value: TopicArg) -> Self {
        match value {
            TopicArg::Benefit => Topic::Benefit,
            TopicArg::Offer => Topic::Offer,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start the interactive question loop against the configured backend")]
    Chat {
        #[arg(long, help = "Path to a policydesk.toml config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "Classify a query by keyword scores without calling the backend")]
    Classify {
        #[arg(help = "The query to classify")]
        query: String,
    },
    #[command(about = "Print the excerpt a topic responder would receive from the document")]
    Excerpt {
        #[arg(value_enum, help = "Topic whose excerpt to print")]
        topic: TopicArg,
        #[arg(long, help = "Path to a policydesk.toml config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
    #[command(about = "Validate config, source document presence, and backend readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Chat { config } => return commands::chat::run(config),
        Command::Classify { query } => commands::classify::run(&query),
        Command::Excerpt { topic, config } => commands::excerpt::run(topic.into(), config),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
