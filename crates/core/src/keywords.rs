use serde::{Deserialize, Serialize};

/// The two specialties a query can be routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Benefit,
    Offer,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Benefit => "benefit",
            Self::Offer => "offer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Benefit => "Benefit Agent",
            Self::Offer => "Offer Agent",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named, fixed set of lowercase phrases matched case-insensitively as
/// substrings, used both for content extraction and query scoring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordSet {
    name: String,
    phrases: Vec<String>,
}

impl KeywordSet {
    pub fn new(name: impl Into<String>, phrases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            phrases: phrases.into_iter().map(|phrase| phrase.into().to_lowercase()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// True when the line contains any phrase, ignoring case.
    pub fn matches_line(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();
        self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }

    /// Number of distinct phrases appearing as substrings of the query.
    pub fn score(&self, query: &str) -> usize {
        let lowered = query.to_lowercase();
        self.phrases.iter().filter(|phrase| lowered.contains(phrase.as_str())).count()
    }
}

/// The per-topic keyword configuration. Extraction and scoring sets are kept
/// separate on purpose: extraction phrases are document-specific product
/// terms ("cover continuance", "sa booster"), scoring phrases are the short
/// generic words users actually type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicKeywords {
    pub extraction: KeywordSet,
    pub scoring: KeywordSet,
}

impl TopicKeywords {
    pub fn builtin(topic: Topic) -> Self {
        match topic {
            Topic::Benefit => Self {
                extraction: KeywordSet::new(
                    "benefit_extraction",
                    [
                        "death benefit",
                        "survival benefit",
                        "maturity benefit",
                        "terminal illness",
                        "cover continuance",
                        "insta payment",
                        "lifeline plus",
                        "riders",
                        "plan variants",
                        "features",
                    ],
                ),
                scoring: KeywordSet::new(
                    "benefit_scoring",
                    [
                        "benefit",
                        "coverage",
                        "death",
                        "survival",
                        "maturity",
                        "terminal",
                        "rider",
                        "feature",
                        "protection",
                        "claim",
                        "payout",
                    ],
                ),
            },
            Topic::Offer => Self {
                extraction: KeywordSet::new(
                    "offer_extraction",
                    [
                        "discount",
                        "premium",
                        "offer",
                        "rates",
                        "pricing",
                        "first year discount",
                        "female life discount",
                        "sa booster",
                        "non-smoker",
                        "employee discount",
                        "special exit value",
                    ],
                ),
                scoring: KeywordSet::new(
                    "offer_scoring",
                    [
                        "discount",
                        "price",
                        "premium",
                        "cost",
                        "offer",
                        "rate",
                        "cheap",
                        "expensive",
                        "payment",
                        "save",
                        "money",
                        "fee",
                    ],
                ),
            },
        }
    }
}
