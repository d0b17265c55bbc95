//! The extraction pipeline: free text in, persisted skill matches out.
//!
//! Tokenizer and matcher are the lexical layer; the engine runs them over
//! a dictionary snapshot; the workflow wraps one submission in a single
//! transactional unit of work.

mod engine;
mod matcher;
mod tokenizer;
mod workflow;

pub use engine::SkillExtractor;
pub use matcher::TokenMatcher;
pub use tokenizer::{TokenSets, Tokenizer};
pub use workflow::{extract_and_save, ExtractionOutcome, ExtractionRequest};
