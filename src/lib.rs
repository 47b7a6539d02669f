pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod document;
pub mod error;
pub mod logger;
pub mod models;
pub mod parser;
pub mod quiz;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{
    generate_quiz, summarize_document, validate_question_count, CompletionBackend, ModelConfig,
    OpenRouterClient, DEFAULT_MODEL,
};
pub use app::StudyApp;
pub use document::load_document;
pub use error::{AiError, DocumentError, QuizError};
pub use models::{AppState, FlashcardPair, Phase, QuestionReview, QuizQuestion, StudyMaterial};
pub use parser::{parse_flashcards, summary_points};
pub use quiz::{Advance, QuizSession};
pub use ui::draw;
