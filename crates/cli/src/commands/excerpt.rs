use std::path::PathBuf;

use serde_json::json;

use policydesk_core::config::{AppConfig, LoadOptions};
use policydesk_core::document::{Document, PlainTextExtractor};
use policydesk_core::indexer::{extract_excerpt, EXCERPT_CHAR_BUDGET};
use policydesk_core::keywords::{Topic, TopicKeywords};

use crate::commands::CommandResult;

pub fn run(topic: Topic, config_path: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        config_path,
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("excerpt", "config_validation", error.to_string(), 2)
        }
    };

    // Strict load: for excerpt inspection a silent placeholder would mislead.
    let document = match Document::load(&PlainTextExtractor, &config.document.path) {
        Ok(document) => document,
        Err(error) => {
            return CommandResult::failure("excerpt", "document_unavailable", error.to_string(), 3)
        }
    };

    let keywords = TopicKeywords::builtin(topic);
    let excerpt = extract_excerpt(&document, &keywords.extraction);
    let text = excerpt.truncated(EXCERPT_CHAR_BUDGET);

    CommandResult::success(
        "excerpt",
        format!("{} extraction over {} document lines", keywords.extraction.name(), document.len()),
        Some(json!({
            "topic": topic,
            "excerpt_lines": excerpt.len(),
            "chars": text.chars().count(),
            "text": text,
        })),
    )
}
