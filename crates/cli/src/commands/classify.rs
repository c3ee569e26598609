use policydesk_core::classifier::QueryClassifier;
use serde_json::json;

use crate::commands::CommandResult;

pub fn run(query: &str) -> CommandResult {
    let query = query.trim();
    if query.is_empty() {
        return CommandResult::failure("classify", "empty_query", "query must not be empty", 2);
    }

    let classifier = QueryClassifier::with_builtin_keywords();
    let scores = classifier.scores(query);
    let decision = classifier.classify(query);

    CommandResult::success(
        "classify",
        "query classified by keyword scores",
        Some(json!({
            "query": query,
            "offer_score": scores.offer,
            "benefit_score": scores.benefit,
            "decision": decision,
        })),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::run;

    fn payload(output: &str) -> Value {
        serde_json::from_str(output).expect("command output should be JSON")
    }

    #[test]
    fn offer_query_is_classified_as_offer() {
        let result = run("Tell me all the offers and discounts available");
        assert_eq!(result.exit_code, 0);

        let payload = payload(&result.output);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["decision"], "offer");
        assert!(payload["data"]["offer_score"].as_u64().expect("score") >= 2);
        assert_eq!(payload["data"]["benefit_score"], 0);
    }

    #[test]
    fn benefit_query_is_classified_as_benefit() {
        let result = run("What is the death benefit coverage?");
        let payload = payload(&result.output);
        assert_eq!(payload["data"]["decision"], "benefit");
        assert_eq!(payload["data"]["offer_score"], 0);
    }

    #[test]
    fn greeting_is_ambiguous() {
        let result = run("Hello");
        let payload = payload(&result.output);
        assert_eq!(payload["data"]["decision"], "ambiguous");
        assert_eq!(payload["data"]["offer_score"], 0);
        assert_eq!(payload["data"]["benefit_score"], 0);
    }

    #[test]
    fn empty_query_is_rejected() {
        let result = run("   ");
        assert_eq!(result.exit_code, 2);
        let payload = payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "empty_query");
    }
}
