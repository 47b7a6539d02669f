use crate::models::Phase;
use thiserror::Error;

/// Failures raised by [`crate::quiz::QuizSession`] operations.
///
/// A failing operation never leaves the session partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("invalid question set: {0}")]
    Validation(String),
    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
    #[error("{what} index {index} is out of range (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("failed to create AI client: {0}")]
    Client(String),
    #[error("AI request failed: {0}")]
    Request(String),
    #[error("no response choices received")]
    EmptyResponse,
    #[error("failed to decode AI response: {source}\nRaw: {raw}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
    #[error("number of questions must be between 1 and 20, got {0}")]
    InvalidQuestionCount(usize),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported document format '{0}': provide extracted plain text")]
    UnsupportedFormat(String),
    #[error("document is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message_names_phase() {
        let err = QuizError::InvalidState {
            operation: "record an answer",
            phase: Phase::Submitted,
        };
        assert_eq!(
            err.to_string(),
            "cannot record an answer while the quiz is submitted"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = QuizError::OutOfRange {
            what: "question",
            index: 7,
            len: 3,
        };
        assert_eq!(err.to_string(), "question index 7 is out of range (len 3)");
    }
}
