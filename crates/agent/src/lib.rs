//! Agent runtime - responder roles and query dispatch
//!
//! This crate wraps the conversational-agent backend and wires the core
//! classification/excerption logic into it:
//! - **LLM boundary** (`llm`) - pluggable `LlmClient` trait plus an HTTP
//!   client for OpenAI-compatible chat-completions endpoints
//! - **Responders** (`responder`) - a role bound to a fixed document
//!   excerpt, built once at startup from an explicit config record
//! - **Tertiary router** (`router`) - structured fallback decision for
//!   queries the keyword classifier cannot split
//! - **Orchestrator** (`runtime`) - per-query dispatch: classify, route,
//!   respond, append to history
//!
//! # Safety Principle
//!
//! The LLM never decides routing when keyword scores are decisive. It is
//! consulted only for answers within a responder's specialty and for the
//! tie-break decision, and its tie-break reply must satisfy a structured
//! contract before it is trusted.

pub mod llm;
pub mod responder;
pub mod router;
pub mod runtime;
