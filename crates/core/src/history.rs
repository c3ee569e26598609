use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::keywords::Topic;

/// How the handling responder was chosen for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOrigin {
    /// Keyword scoring picked the responder directly.
    KeywordScore,
    /// Scores tied; the tertiary router made the call.
    TertiaryRouter,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConversationTurn {
    pub query: String,
    pub response: String,
    pub topic: Topic,
    pub route: RouteOrigin,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit trail of completed turns. Never truncated, never read
/// back into classification or prompts.
#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, query: &str, response: &str, topic: Topic, route: RouteOrigin) {
        self.turns.push(ConversationTurn {
            query: query.to_owned(),
            response: response.to_owned(),
            topic,
            route,
            recorded_at: Utc::now(),
        });
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
