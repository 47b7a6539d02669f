pub mod client;
pub mod generator;

// Public API exports
pub use client::{CompletionBackend, ModelConfig, OpenRouterClient, DEFAULT_MODEL};
pub use generator::{
    generate_quiz, parse_quiz, parse_study_material, summarize_document, validate_question_count,
    MAX_QUESTIONS, MIN_QUESTIONS,
};
