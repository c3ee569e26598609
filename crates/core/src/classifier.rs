//! Keyword-scored query classification.
//!
//! A pure function of the query and the two scoring keyword sets: no state,
//! no randomness. Ties (including the common zero/zero case for generic
//! queries) are never resolved here; they escalate to the tertiary router.

use serde::{Deserialize, Serialize};

use crate::keywords::{KeywordSet, Topic, TopicKeywords};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationResult {
    Offer,
    Benefit,
    Ambiguous,
}

impl ClassificationResult {
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Self::Offer => Some(Topic::Offer),
            Self::Benefit => Some(Topic::Benefit),
            Self::Ambiguous => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QueryScores {
    pub offer: usize,
    pub benefit: usize,
}

#[derive(Clone, Debug)]
pub struct QueryClassifier {
    offer_scoring: KeywordSet,
    benefit_scoring: KeywordSet,
}

impl QueryClassifier {
    pub fn new(offer_scoring: KeywordSet, benefit_scoring: KeywordSet) -> Self {
        Self { offer_scoring, benefit_scoring }
    }

    pub fn with_builtin_keywords() -> Self {
        Self::new(
            TopicKeywords::builtin(Topic::Offer).scoring,
            TopicKeywords::builtin(Topic::Benefit).scoring,
        )
    }

    pub fn scores(&self, query: &str) -> QueryScores {
        QueryScores {
            offer: self.offer_scoring.score(query),
            benefit: self.benefit_scoring.score(query),
        }
    }

    pub fn classify(&self, query: &str) -> ClassificationResult {
        let scores = self.scores(query);
        if scores.offer > scores.benefit {
            ClassificationResult::Offer
        } else if scores.benefit > scores.offer {
            ClassificationResult::Benefit
        } else {
            ClassificationResult::Ambiguous
        }
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::with_builtin_keywords()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassificationResult, QueryClassifier};
    use crate::keywords::KeywordSet;

    #[test]
    fn offers_query_routes_to_offer() {
        let classifier = QueryClassifier::with_builtin_keywords();
        let query = "Tell me all the offers and discounts available";

        let scores = classifier.scores(query);
        assert!(scores.offer >= 2, "expected at least discount+offer, got {}", scores.offer);
        assert_eq!(scores.benefit, 0);
        assert_eq!(classifier.classify(query), ClassificationResult::Offer);
    }

    #[test]
    fn coverage_query_routes_to_benefit() {
        let classifier = QueryClassifier::with_builtin_keywords();
        let query = "What is the death benefit coverage?";

        let scores = classifier.scores(query);
        assert!(scores.benefit >= 2, "expected death+benefit+coverage, got {}", scores.benefit);
        assert_eq!(scores.offer, 0);
        assert_eq!(classifier.classify(query), ClassificationResult::Benefit);
    }

    #[test]
    fn generic_greeting_is_ambiguous() {
        let classifier = QueryClassifier::with_builtin_keywords();
        let scores = classifier.scores("Hello");
        assert_eq!((scores.offer, scores.benefit), (0, 0));
        assert_eq!(classifier.classify("Hello"), ClassificationResult::Ambiguous);
    }

    #[test]
    fn nonzero_tie_is_still_ambiguous() {
        let classifier = QueryClassifier::with_builtin_keywords();
        // "premium" scores for offer, "coverage" for benefit: 1-1 tie.
        let query = "Does the premium affect coverage?";
        let scores = classifier.scores(query);
        assert_eq!(scores.offer, scores.benefit);
        assert_eq!(classifier.classify(query), ClassificationResult::Ambiguous);
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = QueryClassifier::with_builtin_keywords();
        let query = "Are there any discounts for female customers?";
        let first = classifier.classify(query);
        let second = classifier.classify(query);
        assert_eq!(first, second);
        assert_eq!(first, ClassificationResult::Offer);
    }

    #[test]
    fn classification_ignores_query_case() {
        let classifier = QueryClassifier::with_builtin_keywords();
        assert_eq!(
            classifier.classify("WHAT IS THE DEATH BENEFIT?"),
            classifier.classify("what is the death benefit?"),
        );
    }

    #[test]
    fn custom_keyword_sets_drive_the_decision() {
        let classifier = QueryClassifier::new(
            KeywordSet::new("offer", ["rebate"]),
            KeywordSet::new("benefit", ["payout"]),
        );
        assert_eq!(classifier.classify("any rebate?"), ClassificationResult::Offer);
        assert_eq!(classifier.classify("payout terms"), ClassificationResult::Benefit);
        assert_eq!(classifier.classify("rebate and payout"), ClassificationResult::Ambiguous);
    }
}
