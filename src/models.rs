use serde::{Deserialize, Serialize};
use std::fmt;

/// One multiple-choice question as produced by the quiz generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswerIndex")]
    pub correct_option_index: usize,
}

impl QuizQuestion {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_option_index: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_option_index,
        }
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(self.correct_option_index)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardPair {
    pub question: String,
    pub answer: String,
}

/// Summarizer output: bullet summary plus loosely formatted `Q: ... A: ...` flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMaterial {
    pub summary: String,
    #[serde(default)]
    pub flashcards: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    Submitted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Answering => write!(f, "answering"),
            Phase::Submitted => write!(f, "submitted"),
        }
    }
}

/// Per-question outcome of a submitted attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub selected_option_index: Option<usize>,
    pub is_correct: bool,
}

#[derive(Debug)]
pub enum AiRequest {
    Summarize {
        document: String,
    },
    GenerateQuiz {
        content: String,
        num_questions: usize,
    },
}

impl AiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            AiRequest::Summarize { .. } => RequestKind::Summarize,
            AiRequest::GenerateQuiz { .. } => RequestKind::GenerateQuiz,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Summarize,
    GenerateQuiz,
}

#[derive(Debug)]
pub enum AiResponse {
    Summary(StudyMaterial),
    Quiz(Vec<QuizQuestion>),
    Error { request: RequestKind, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Loading { message: String },
    Study,
    QuizSetup,
    Quiz,
    Results,
}
