use anyhow::{bail, Context, Result};
use tracing::info;
use uuid::Uuid;

use policydesk_core::classifier::QueryClassifier;
use policydesk_core::document::Document;
use policydesk_core::history::{ConversationLog, RouteOrigin};
use policydesk_core::indexer::extract_excerpt;
use policydesk_core::keywords::{Topic, TopicKeywords};

use crate::llm::LlmClient;
use crate::responder::{ResponderConfig, TopicResponder};
use crate::router::TertiaryRouter;

/// A completed turn's result, including how the responder was chosen.
#[derive(Clone, Debug)]
pub struct Answer {
    pub topic: Topic,
    pub route: RouteOrigin,
    pub text: String,
}

/// Single-threaded, request-at-a-time dispatcher. Owns the conversation
/// history exclusively; excerpts are extracted once at construction and
/// never recomputed per query.
pub struct Orchestrator {
    classifier: QueryClassifier,
    benefit_responder: TopicResponder,
    offer_responder: TopicResponder,
    router: TertiaryRouter,
    client: Box<dyn LlmClient>,
    history: ConversationLog,
}

impl Orchestrator {
    pub fn from_document(document: &Document, client: Box<dyn LlmClient>) -> Self {
        let benefit_keywords = TopicKeywords::builtin(Topic::Benefit);
        let offer_keywords = TopicKeywords::builtin(Topic::Offer);

        let benefit_excerpt = extract_excerpt(document, &benefit_keywords.extraction);
        let offer_excerpt = extract_excerpt(document, &offer_keywords.extraction);
        info!(
            event_name = "orchestrator.excerpts.extracted",
            benefit_lines = benefit_excerpt.len(),
            offer_lines = offer_excerpt.len(),
            "topic excerpts extracted from source document"
        );

        Self {
            classifier: QueryClassifier::new(offer_keywords.scoring, benefit_keywords.scoring),
            benefit_responder: TopicResponder::new(ResponderConfig::from_excerpt(
                Topic::Benefit,
                &benefit_excerpt,
            )),
            offer_responder: TopicResponder::new(ResponderConfig::from_excerpt(
                Topic::Offer,
                &offer_excerpt,
            )),
            router: TertiaryRouter::new(),
            client,
            history: ConversationLog::new(),
        }
    }

    pub fn history(&self) -> &ConversationLog {
        &self.history
    }

    /// Processes one non-empty query to completion: classify, route, invoke
    /// the selected responder, append the turn to history. Errors leave the
    /// history of prior turns untouched.
    pub async fn handle_query(&mut self, query: &str) -> Result<Answer> {
        let query = query.trim();
        if query.is_empty() {
            bail!("query must not be empty");
        }

        let correlation_id = Uuid::new_v4().to_string();
        let scores = self.classifier.scores(query);
        let classification = self.classifier.classify(query);
        info!(
            event_name = "orchestrator.query.classified",
            correlation_id = %correlation_id,
            offer_score = scores.offer,
            benefit_score = scores.benefit,
            classification = ?classification,
            "query classified"
        );

        let (topic, route) = match classification.topic() {
            Some(topic) => (topic, RouteOrigin::KeywordScore),
            None => {
                let decision = self
                    .router
                    .route(self.client.as_ref(), query)
                    .await
                    .context("tertiary routing failed")?;
                info!(
                    event_name = "orchestrator.query.tertiary_routed",
                    correlation_id = %correlation_id,
                    decision = %decision.decision,
                    rationale = %decision.rationale,
                    "ambiguous query routed by tertiary router"
                );
                (decision.decision, RouteOrigin::TertiaryRouter)
            }
        };

        let responder = match topic {
            Topic::Benefit => &self.benefit_responder,
            Topic::Offer => &self.offer_responder,
        };
        let text = responder
            .respond(self.client.as_ref(), query)
            .await
            .with_context(|| format!("{} failed to respond", topic.display_name()))?;

        self.history.record(query, &text, topic, route);
        info!(
            event_name = "orchestrator.query.answered",
            correlation_id = %correlation_id,
            topic = %topic,
            turns = self.history.len(),
            "query answered and recorded"
        );

        Ok(Answer { topic, route, text })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use policydesk_core::document::Document;
    use policydesk_core::history::RouteOrigin;
    use policydesk_core::keywords::Topic;

    use super::Orchestrator;
    use crate::llm::{LlmClient, LlmError};

    /// Records every prompt it sees and replies from a fixed script.
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies), prompts: Mutex::new(Vec::new()) }
        }

        fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().expect("prompts lock").clone()
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(
            &self,
            system_prompt: &str,
            _user_message: &str,
        ) -> Result<String, LlmError> {
            self.prompts.lock().expect("prompts lock").push(system_prompt.to_string());
            let mut replies = self.replies.lock().expect("replies lock");
            if replies.is_empty() {
                return Err(LlmError::MalformedResponse("script exhausted".to_string()));
            }
            replies.remove(0)
        }
    }

    fn policy_document() -> Document {
        Document::from_text(
            "Smart Term Plan Plus\n\
             The death benefit is payable to the nominee.\n\
             Survival benefit applies after the premium payment term.\n\
             A first year discount of 5% applies to annual mode.\n\
             Non-smoker rates are lower across all variants.",
        )
    }

    fn orchestrator(replies: Vec<Result<String, LlmError>>) -> (Orchestrator, std::sync::Arc<ScriptedClient>) {
        let client = std::sync::Arc::new(ScriptedClient::new(replies));
        let document = policy_document();
        (Orchestrator::from_document(&document, Box::new(SharedClient(client.clone()))), client)
    }

    /// Arc wrapper so the test can inspect the client after handing it over.
    struct SharedClient(std::sync::Arc<ScriptedClient>);

    #[async_trait]
    impl LlmClient for SharedClient {
        async fn complete(
            &self,
            system_prompt: &str,
            user_message: &str,
        ) -> Result<String, LlmError> {
            self.0.complete(system_prompt, user_message).await
        }
    }

    #[tokio::test]
    async fn benefit_query_goes_straight_to_benefit_responder() {
        let (mut orchestrator, client) =
            orchestrator(vec![Ok("the death benefit is paid out".to_string())]);

        let answer = orchestrator
            .handle_query("What is the death benefit coverage?")
            .await
            .expect("answer");

        assert_eq!(answer.topic, Topic::Benefit);
        assert_eq!(answer.route, RouteOrigin::KeywordScore);
        let prompts = client.seen_prompts();
        assert_eq!(prompts.len(), 1, "no tertiary routing call expected");
        assert!(prompts[0].contains("Benefit Agent"));
    }

    #[tokio::test]
    async fn offer_query_goes_straight_to_offer_responder() {
        let (mut orchestrator, _client) =
            orchestrator(vec![Ok("several discounts apply".to_string())]);

        let answer = orchestrator
            .handle_query("Tell me all the offers and discounts available")
            .await
            .expect("answer");

        assert_eq!(answer.topic, Topic::Offer);
        assert_eq!(answer.route, RouteOrigin::KeywordScore);
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[tokio::test]
    async fn ambiguous_query_escalates_to_tertiary_router() {
        let (mut orchestrator, client) = orchestrator(vec![
            Ok(r#"{"decision": "offer", "rationale": "sounds price related"}"#.to_string()),
            Ok("here are the offers".to_string()),
        ]);

        let answer = orchestrator.handle_query("Hello").await.expect("answer");

        assert_eq!(answer.topic, Topic::Offer);
        assert_eq!(answer.route, RouteOrigin::TertiaryRouter);
        let prompts = client.seen_prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("router"), "first call should be the router prompt");
        assert!(prompts[1].contains("Offer Agent"));
    }

    #[tokio::test]
    async fn backend_failure_leaves_history_untouched() {
        let (mut orchestrator, _client) = orchestrator(vec![
            Ok("first answer".to_string()),
            Err(LlmError::Timeout(5)),
        ]);

        orchestrator.handle_query("any discounts?").await.expect("first answer");
        assert_eq!(orchestrator.history().len(), 1);

        let failure = orchestrator.handle_query("death benefit terms?").await;
        assert!(failure.is_err());
        assert_eq!(orchestrator.history().len(), 1, "failed turn must not be recorded");
        assert_eq!(orchestrator.history().turns()[0].response, "first answer");
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_backend_calls() {
        let (mut orchestrator, client) = orchestrator(vec![]);
        assert!(orchestrator.handle_query("   ").await.is_err());
        assert!(client.seen_prompts().is_empty());
        assert!(orchestrator.history().is_empty());
    }

    #[tokio::test]
    async fn history_records_route_and_topic_in_order() {
        let (mut orchestrator, _client) = orchestrator(vec![
            Ok("discount answer".to_string()),
            Ok(r#"{"decision": "benefit", "rationale": "generic"}"#.to_string()),
            Ok("benefit answer".to_string()),
        ]);

        orchestrator.handle_query("what discounts exist?").await.expect("offer turn");
        orchestrator.handle_query("Hello there").await.expect("routed turn");

        let turns = orchestrator.history().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].topic, Topic::Offer);
        assert_eq!(turns[0].route, RouteOrigin::KeywordScore);
        assert_eq!(turns[1].topic, Topic::Benefit);
        assert_eq!(turns[1].route, RouteOrigin::TertiaryRouter);
    }
}
