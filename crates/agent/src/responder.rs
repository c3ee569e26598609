use policydesk_core::indexer::{Excerpt, EXCERPT_CHAR_BUDGET};
use policydesk_core::keywords::Topic;

use crate::llm::{LlmClient, LlmError};

/// Explicit, immutable configuration for a topic responder: built once at
/// startup from the extracted excerpt, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponderConfig {
    pub topic: Topic,
    pub excerpt_text: String,
    pub delegation_hint: String,
}

impl ResponderConfig {
    pub fn from_excerpt(topic: Topic, excerpt: &Excerpt) -> Self {
        let delegation_hint = match topic {
            Topic::Benefit => format!(
                "If asked about pricing, discounts, or offers, redirect the user to the {}.",
                Topic::Offer.display_name()
            ),
            Topic::Offer => format!(
                "If asked about benefits or coverage details, redirect the user to the {}.",
                Topic::Benefit.display_name()
            ),
        };

        Self {
            topic,
            excerpt_text: excerpt.truncated(EXCERPT_CHAR_BUDGET),
            delegation_hint,
        }
    }
}

/// A role bound to a filtered policy excerpt, answering queries within one
/// specialty. Delegation outside the specialty is honored by instruction
/// only; nothing enforces it.
#[derive(Clone, Debug)]
pub struct TopicResponder {
    config: ResponderConfig,
    system_prompt: String,
}

impl TopicResponder {
    pub fn new(config: ResponderConfig) -> Self {
        let system_prompt = render_system_prompt(&config);
        Self { config, system_prompt }
    }

    pub fn topic(&self) -> Topic {
        self.config.topic
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub async fn respond(&self, client: &dyn LlmClient, query: &str) -> Result<String, LlmError> {
        client.complete(&self.system_prompt, query).await
    }
}

fn render_system_prompt(config: &ResponderConfig) -> String {
    let (role_summary, key_areas) = match config.topic {
        Topic::Benefit => (
            "You answer questions about benefits, features, coverage, and plan details \
             of the Smart Term Plan Plus policy.",
            [
                "Death Benefits and plan variants",
                "Survival and Maturity Benefits",
                "Terminal Illness coverage",
                "Riders and additional features",
                "Cover Continuance Benefit",
                "Insta Payment features",
            ]
            .join("\n- "),
        ),
        Topic::Offer => (
            "You answer questions about pricing, discounts, offers, and premium rates \
             of the Smart Term Plan Plus policy.",
            [
                "Premium rates and pricing",
                "Discounts (Employee, First Year, Female Life, Non-Smoker)",
                "SA Booster options",
                "Special Exit Value benefits",
                "Premium payment terms and modes",
            ]
            .join("\n- "),
        ),
    };

    format!(
        "You are the {name} for the Smart Term Plan Plus insurance product.\n\
         {role_summary}\n\n\
         Use only this information from the policy document:\n\
         {excerpt}\n\n\
         Key areas you handle:\n- {key_areas}\n\n\
         Always answer accurately based on the policy document.\n\
         {delegation_hint}",
        name = config.topic.display_name(),
        role_summary = role_summary,
        excerpt = config.excerpt_text,
        key_areas = key_areas,
        delegation_hint = config.delegation_hint,
    )
}
