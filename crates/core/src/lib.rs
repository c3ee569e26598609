pub mod classifier;
pub mod config;
pub mod document;
pub mod history;
pub mod indexer;
pub mod keywords;

pub use classifier::{ClassificationResult, QueryClassifier, QueryScores};
pub use document::{Document, DocumentError, PlainTextExtractor, TextExtractor, PLACEHOLDER_TEXT};
pub use history::{ConversationLog, ConversationTurn, RouteOrigin};
pub use indexer::{extract_excerpt, Excerpt, EXCERPT_CHAR_BUDGET};
pub use keywords::{KeywordSet, Topic, TopicKeywords};
