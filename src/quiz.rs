use crate::error::QuizError;
use crate::models::{Phase, QuestionReview, QuizQuestion};
use std::collections::BTreeMap;

/// Result of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Current question has no answer yet; nothing changed.
    Blocked,
    Moved { index: usize },
    Submitted { score: usize },
}

/// One attempt at a fixed, ordered set of multiple-choice questions.
///
/// Forward navigation is answer-gated and the session moves from
/// [`Phase::Answering`] to [`Phase::Submitted`] exactly once. A new attempt
/// is a new instance, see [`QuizSession::retake`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: BTreeMap<usize, usize>,
    current_index: usize,
    phase: Phase,
    score: Option<usize>,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Validation(
                "a quiz needs at least one question".to_string(),
            ));
        }

        for (i, question) in questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(QuizError::Validation(format!(
                    "question {} has {} option(s), at least 2 required",
                    i + 1,
                    question.options.len()
                )));
            }
            if question.correct_option_index >= question.options.len() {
                return Err(QuizError::Validation(format!(
                    "question {} marks option {} as correct but has only {} options",
                    i + 1,
                    question.correct_option_index,
                    question.options.len()
                )));
            }
        }

        log::debug!("Starting quiz session with {} questions", questions.len());
        Ok(Self::fresh(questions))
    }

    fn fresh(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: BTreeMap::new(),
            current_index: 0,
            phase: Phase::Answering,
            score: None,
        }
    }

    pub fn record_answer(
        &mut self,
        question_index: usize,
        selected_option_index: usize,
    ) -> Result<(), QuizError> {
        self.ensure_answering("record an answer")?;

        let question = self
            .questions
            .get(question_index)
            .ok_or(QuizError::OutOfRange {
                what: "question",
                index: question_index,
                len: self.questions.len(),
            })?;

        if selected_option_index >= question.options.len() {
            return Err(QuizError::OutOfRange {
                what: "option",
                index: selected_option_index,
                len: question.options.len(),
            });
        }

        self.answers.insert(question_index, selected_option_index);
        Ok(())
    }

    /// Move to the next question, or submit when on the last one.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.ensure_answering("advance")?;

        if !self.is_answered(self.current_index) {
            return Ok(Advance::Blocked);
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Ok(Advance::Moved {
                index: self.current_index,
            })
        } else {
            Ok(Advance::Submitted {
                score: self.submit(),
            })
        }
    }

    /// Score the attempt. Calling again after submission returns the stored score.
    pub fn submit(&mut self) -> usize {
        if let Some(score) = self.score {
            return score;
        }

        let score = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.correct_option_index))
            .count();

        self.score = Some(score);
        self.phase = Phase::Submitted;
        log::info!(
            "Quiz submitted: {} / {} correct ({} answered)",
            score,
            self.questions.len(),
            self.answers.len()
        );
        score
    }

    /// Start a new attempt over the same questions. `self` is left untouched.
    pub fn retake(&self) -> QuizSession {
        log::debug!("Retaking quiz with {} questions", self.questions.len());
        Self::fresh(self.questions.clone())
    }

    pub fn progress_fraction(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64
    }

    pub fn is_answered(&self, question_index: usize) -> bool {
        self.answers.contains_key(&question_index)
    }

    pub fn selected_option(&self, question_index: usize) -> Option<usize> {
        self.answers.get(&question_index).copied()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    /// Only `Some` once submitted.
    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn review(&self) -> Result<Vec<QuestionReview>, QuizError> {
        if self.phase != Phase::Submitted {
            return Err(QuizError::InvalidState {
                operation: "review results",
                phase: self.phase,
            });
        }

        Ok(self
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let selected = self.selected_option(index);
                QuestionReview {
                    index,
                    question: q.text.clone(),
                    options: q.options.clone(),
                    correct_option_index: q.correct_option_index,
                    selected_option_index: selected,
                    is_correct: selected == Some(q.correct_option_index),
                }
            })
            .collect())
    }

    fn ensure_answering(&self, operation: &'static str) -> Result<(), QuizError> {
        match self.phase {
            Phase::Answering => Ok(()),
            Phase::Submitted => Err(QuizError::InvalidState {
                operation,
                phase: self.phase,
            }),
        }
    }
}
