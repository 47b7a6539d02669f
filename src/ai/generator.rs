use crate::ai::client::{CompletionBackend, ModelConfig};
use crate::error::AiError;
use crate::models::{QuizQuestion, StudyMaterial};
use serde::Deserialize;

pub const MIN_QUESTIONS: usize = 1;
pub const MAX_QUESTIONS: usize = 20;

const SUMMARY_SYSTEM: &str =
    "You are an educational assistant that condenses study material. Be concise and accurate.";
const QUIZ_SYSTEM: &str = "You are an expert quiz generator writing multiple-choice questions.";

pub(crate) fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    quiz: Vec<QuizQuestion>,
}

/// Reject question counts outside 1..=20 before anything is sent.
pub fn validate_question_count(num_questions: usize) -> Result<usize, AiError> {
    if (MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
        Ok(num_questions)
    } else {
        Err(AiError::InvalidQuestionCount(num_questions))
    }
}

pub fn parse_study_material(response: &str) -> Result<StudyMaterial, AiError> {
    let cleaned = clean_json_response(response);
    serde_json::from_str(&cleaned).map_err(|source| AiError::Decode {
        source,
        raw: response.to_string(),
    })
}

pub fn parse_quiz(response: &str) -> Result<Vec<QuizQuestion>, AiError> {
    let cleaned = clean_json_response(response);
    let payload: QuizPayload = serde_json::from_str(&cleaned).map_err(|source| AiError::Decode {
        source,
        raw: response.to_string(),
    })?;
    Ok(payload.quiz)
}

fn summary_prompt(document: &str) -> String {
    format!(
        r#"Summarize the following document for a student and write flashcards for review.

Document:
{}

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "summary": "concise bullet points, one per line, each starting with '- '",
    "flashcards": "Q: question one A: answer one\nQ: question two A: answer two"
}}
- Every flashcard starts on its own line with "Q:" and its answer follows "A:".
"#,
        document
    )
}

fn quiz_prompt(content: &str, num_questions: usize) -> String {
    format!(
        r#"Generate a multiple-choice quiz from the provided content. The quiz should have exactly {} questions.

Content:
{}

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "quiz": [
        {{
            "question": "question text",
            "options": ["option 1", "option 2", "option 3", "option 4"],
            "correctAnswerIndex": 0
        }}
    ]
}}
- Ensure that correctAnswerIndex is a valid index within the options array for each question.
- Every question needs at least two options.
"#,
        num_questions, content
    )
}

/// Ask the backend for a summary and flashcards of `document`.
pub async fn summarize_document(
    backend: &dyn CompletionBackend,
    document: &str,
    config: &ModelConfig,
) -> Result<StudyMaterial, AiError> {
    log::info!("Requesting summary for {} characters", document.chars().count());
    let response = backend
        .complete(SUMMARY_SYSTEM, &summary_prompt(document), config)
        .await?;

    log::debug!("Raw summary response: {}", response);
    parse_study_material(&response)
}

/// Ask the backend for `num_questions` multiple-choice questions about `content`.
pub async fn generate_quiz(
    backend: &dyn CompletionBackend,
    content: &str,
    num_questions: usize,
    config: &ModelConfig,
) -> Result<Vec<QuizQuestion>, AiError> {
    let num_questions = validate_question_count(num_questions)?;

    log::info!("Requesting quiz with {} questions", num_questions);
    let response = backend
        .complete(QUIZ_SYSTEM, &quiz_prompt(content, num_questions), config)
        .await?;

    log::debug!("Raw quiz response: {}", response);
    let quiz = parse_quiz(&response)?;
    if quiz.len() != num_questions {
        log::warn!(
            "Asked for {} questions, received {}",
            num_questions,
            quiz.len()
        );
    }
    Ok(quiz)
}

/// Backend returning canned responses in order, for tests.
#[cfg(test)]
pub struct MockBackend {
    responses: std::sync::Mutex<Vec<Result<String, AiError>>>,
    pub prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockBackend {
    pub fn new(responses: Vec<Result<String, AiError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        _system: &str,
        prompt: &str,
        _config: &ModelConfig,
    ) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(AiError::EmptyResponse)
        } else {
            responses.remove(0)
        }
    }
}
