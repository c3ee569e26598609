//! Tertiary routing for queries the keyword scorer cannot split.
//!
//! The backend is asked for a structured JSON decision instead of free text.
//! Raw-text name scanning survives only as a fallback for backends that
//! ignore the format instruction, with Benefit as the final default.

use serde::Deserialize;
use tracing::warn;

use policydesk_core::keywords::Topic;

use crate::llm::{LlmClient, LlmError};

const ROUTER_SYSTEM_PROMPT: &str = "\
You are a router for a term life insurance assistant. Decide whether the \
user's question is about OFFERS/DISCOUNTS/PRICING or about \
BENEFITS/FEATURES/COVERAGE.\n\
Reply with a single JSON object and nothing else:\n\
{\"decision\": \"offer\" | \"benefit\", \"rationale\": \"<one sentence>\"}";

/// Structured routing outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDecision {
    pub decision: Topic,
    pub rationale: String,
}

#[derive(Debug, Deserialize)]
struct RouteReply {
    decision: String,
    #[serde(default)]
    rationale: String,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TertiaryRouter;

impl TertiaryRouter {
    pub fn new() -> Self {
        Self
    }

    pub async fn route(&self, client: &dyn LlmClient, query: &str) -> Result<RouteDecision, LlmError> {
        let reply = client.complete(ROUTER_SYSTEM_PROMPT, query).await?;
        Ok(parse_route_reply(&reply))
    }
}

fn parse_route_reply(reply: &str) -> RouteDecision {
    if let Some(decision) = parse_structured(reply) {
        return decision;
    }

    warn!(
        event_name = "router.reply.unstructured",
        "router reply was not valid JSON, falling back to name scan"
    );
    RouteDecision { decision: scan_for_topic(reply), rationale: reply.trim().to_string() }
}

fn parse_structured(reply: &str) -> Option<RouteDecision> {
    // Tolerate prose or code fences around the JSON object.
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    let parsed: RouteReply = serde_json::from_str(reply.get(start..=end)?).ok()?;

    let decision = match parsed.decision.trim().to_ascii_lowercase().as_str() {
        "offer" => Topic::Offer,
        "benefit" => Topic::Benefit,
        _ => return None,
    };
    Some(RouteDecision { decision, rationale: parsed.rationale })
}

fn scan_for_topic(reply: &str) -> Topic {
    let lowered = reply.to_ascii_lowercase();
    if lowered.contains("offer") && !lowered.contains("benefit") {
        Topic::Offer
    } else {
        Topic::Benefit
    }
}
