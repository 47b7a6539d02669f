use crate::error::QuizError;
use crate::models::{AiRequest, AiResponse, AppState, FlashcardPair, RequestKind, StudyMaterial};
use crate::parser::{parse_flashcards, summary_points};
use crate::quiz::{Advance, QuizSession};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::SliceRandom;
use std::sync::mpsc::Sender;

pub const QUESTION_COUNT_CHOICES: [usize; 5] = [3, 5, 10, 15, 20];

#[derive(Debug)]
pub struct StudyApp {
    pub state: AppState,
    pub material: Option<StudyMaterial>,
    pub summary_points: Vec<String>,
    pub flashcards: Vec<FlashcardPair>,
    pub card_index: usize,
    pub card_flipped: bool,
    pub question_counts: Vec<usize>,
    pub count_index: usize,
    pub quiz: Option<QuizSession>,
    pub option_cursor: usize,
    pub results_scroll: u16,
    pub status: Option<String>,
    shuffle_cards: bool,
    ai_tx: Option<Sender<AiRequest>>,
}

impl StudyApp {
    pub fn new(default_questions: usize, shuffle_cards: bool, ai_tx: Option<Sender<AiRequest>>) -> Self {
        let mut question_counts = QUESTION_COUNT_CHOICES.to_vec();
        if !question_counts.contains(&default_questions) {
            question_counts.push(default_questions);
            question_counts.sort_unstable();
        }
        let count_index = question_counts
            .iter()
            .position(|n| *n == default_questions)
            .unwrap_or(0);

        Self {
            state: AppState::Study,
            material: None,
            summary_points: Vec::new(),
            flashcards: Vec::new(),
            card_index: 0,
            card_flipped: false,
            question_counts,
            count_index,
            quiz: None,
            option_cursor: 0,
            results_scroll: 0,
            status: None,
            shuffle_cards,
            ai_tx,
        }
    }

    pub fn selected_question_count(&self) -> usize {
        self.question_counts[self.count_index]
    }

    /// True while a request has been sent and its response has not arrived.
    pub fn is_waiting_on_ai(&self) -> bool {
        matches!(self.state, AppState::Loading { .. })
    }

    fn send(&mut self, request: AiRequest, message: &str) {
        log::debug!("Sending {:?} request", request.kind());
        self.status = None;
        self.state = AppState::Loading {
            message: message.to_string(),
        };
        if let Some(ref ai_tx) = self.ai_tx
            && ai_tx.send(request).is_err()
        {
            log::error!("AI worker is gone");
            self.status = Some("AI worker stopped unexpectedly".to_string());
            self.state = AppState::Study;
        }
    }

    pub fn request_summary(&mut self, document: String) {
        self.send(
            AiRequest::Summarize { document },
            "Summarizing document...",
        );
    }

    pub fn request_quiz(&mut self) {
        let Some(material) = self.material.as_ref() else {
            self.status = Some("Summarize a document before generating a quiz".to_string());
            return;
        };

        let request = AiRequest::GenerateQuiz {
            content: material.summary.clone(),
            num_questions: self.selected_question_count(),
        };
        self.send(request, "Generating quiz...");
    }

    pub fn set_material(&mut self, material: StudyMaterial) {
        let mut cards = parse_flashcards(&material.flashcards);
        if self.shuffle_cards {
            cards.shuffle(&mut rand::thread_rng());
        }
        log::info!("Loaded summary with {} flashcards", cards.len());

        self.summary_points = summary_points(&material.summary);
        self.flashcards = cards;
        self.material = Some(material);
        self.card_index = 0;
        self.card_flipped = false;
        // A new summary invalidates any quiz built from the previous one.
        self.quiz = None;
        self.state = AppState::Study;
    }

    pub fn start_quiz(&mut self, session: QuizSession) {
        self.option_cursor = session
            .selected_option(session.current_index())
            .unwrap_or(0);
        self.quiz = Some(session);
        self.results_scroll = 0;
        self.status = None;
        self.state = AppState::Quiz;
    }

    pub fn process_ai_response(&mut self, response: AiResponse) {
        match response {
            AiResponse::Summary(material) => {
                self.status = None;
                self.set_material(material);
            }
            AiResponse::Quiz(questions) => match QuizSession::new(questions) {
                Ok(session) => self.start_quiz(session),
                Err(e) => {
                    log::warn!("Generated quiz rejected: {}", e);
                    self.status = Some(format!("Quiz generation failed: {}", e));
                    self.state = AppState::QuizSetup;
                }
            },
            AiResponse::Error { request, error } => {
                log::error!("{:?} failed: {}", request, error);
                self.status = Some(error);
                self.state = match request {
                    RequestKind::Summarize => AppState::Study,
                    RequestKind::GenerateQuiz => AppState::QuizSetup,
                };
            }
        }
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Loading { .. } => matches!(key.code, KeyCode::Char('q') | KeyCode::Esc),
            AppState::Study => self.handle_study_key(key.code),
            AppState::QuizSetup => self.handle_setup_key(key.code),
            AppState::Quiz => self.handle_quiz_key(key.code),
            AppState::Results => self.handle_results_key(key.code),
        }
    }

    fn handle_study_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Right | KeyCode::Char('l') => {
                if self.card_index < self.flashcards.len().saturating_sub(1) {
                    self.card_index += 1;
                    self.card_flipped = false;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.card_index > 0 {
                    self.card_index -= 1;
                    self.card_flipped = false;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if !self.flashcards.is_empty() {
                    self.card_flipped = !self.card_flipped;
                }
            }
            KeyCode::Char('g') => {
                if self.material.is_some() {
                    self.status = None;
                    self.state = AppState::QuizSetup;
                } else {
                    self.status = Some("Summarize a document before generating a quiz".to_string());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_setup_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.count_index = self.count_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.count_index + 1 < self.question_counts.len() {
                    self.count_index += 1;
                }
            }
            KeyCode::Enter => self.request_quiz(),
            KeyCode::Esc => {
                self.status = None;
                self.state = AppState::Study;
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn handle_quiz_key(&mut self, code: KeyCode) -> bool {
        let Some(session) = self.quiz.as_mut() else {
            self.state = AppState::Study;
            return false;
        };
        let option_count = session.current_question().options.len();

        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.option_cursor + 1 < option_count {
                    self.option_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                let result = session.record_answer(session.current_index(), self.option_cursor);
                self.report(result);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                if option < option_count {
                    self.option_cursor = option;
                    let result = session.record_answer(session.current_index(), option);
                    self.report(result);
                }
            }
            KeyCode::Enter => self.advance_quiz(),
            KeyCode::Esc => {
                log::info!("Quiz abandoned");
                self.quiz = None;
                self.state = AppState::Study;
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    fn advance_quiz(&mut self) {
        let Some(session) = self.quiz.as_mut() else {
            return;
        };

        match session.advance() {
            Ok(Advance::Blocked) => {
                self.status = Some("Select an answer first".to_string());
            }
            Ok(Advance::Moved { index }) => {
                self.option_cursor = session.selected_option(index).unwrap_or(0);
                self.status = None;
            }
            Ok(Advance::Submitted { score }) => {
                log::info!("Showing results, score {}", score);
                self.results_scroll = 0;
                self.status = None;
                self.state = AppState::Results;
            }
            Err(e) => self.report(Err(e)),
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.results_scroll = self.results_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            KeyCode::Char('r') => {
                if let Some(session) = self.quiz.as_ref() {
                    let attempt = session.retake();
                    self.start_quiz(attempt);
                }
            }
            KeyCode::Char('g') => {
                self.status = None;
                self.state = AppState::QuizSetup;
            }
            KeyCode::Char('s') => {
                self.state = AppState::Study;
            }
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    /// Quiz misuse is a caller bug: log it and keep the UI running.
    fn report(&mut self, result: Result<(), QuizError>) {
        if let Err(e) = result {
            log::warn!("Ignoring quiz operation: {}", e);
        } else {
            self.status = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phase, QuizQuestion};
    use std::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn material() -> StudyMaterial {
        StudyMaterial {
            summary: "- Ownership\n- Borrowing".to_string(),
            flashcards: "Q: Owner count? A: One\nQ: Borrow kinds? A: Shared and mutable".to_string(),
        }
    }

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::new("2+2?", vec!["3".into(), "4".into()], 1),
            QuizQuestion::new("Capital of France?", vec!["Paris".into(), "Rome".into(), "Oslo".into()], 0),
        ]
    }

    fn app_in_quiz() -> StudyApp {
        let mut app = StudyApp::new(5, false, None);
        app.set_material(material());
        app.process_ai_response(AiResponse::Quiz(questions()));
        app
    }

    #[test]
    fn test_default_count_added_to_choices() {
        let app = StudyApp::new(7, false, None);
        assert_eq!(app.question_counts, vec![3, 5, 7, 10, 15, 20]);
        assert_eq!(app.selected_question_count(), 7);
    }

    #[test]
    fn test_request_summary_sends_and_waits() {
        let (tx, rx) = mpsc::channel();
        let mut app = StudyApp::new(5, false, Some(tx));
        app.request_summary("document".to_string());

        assert!(app.is_waiting_on_ai());
        match rx.try_recv().unwrap() {
            AiRequest::Summarize { document } => assert_eq!(document, "document"),
            other => panic!("unexpected request: {:?}", other),
        }

        // Only quit is honoured while waiting.
        assert!(!app.handle_key(key(KeyCode::Char('g'))));
        assert!(matches!(app.state, AppState::Loading { .. }));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_waiting_on_ai_clears_when_response_arrives() {
        let mut app = StudyApp::new(5, false, None);
        assert!(!app.is_waiting_on_ai());

        app.request_summary("document".to_string());
        assert!(app.is_waiting_on_ai());

        app.process_ai_response(AiResponse::Summary(material()));
        assert!(!app.is_waiting_on_ai());
    }

    #[test]
    fn test_summary_response_parses_flashcards() {
        let mut app = StudyApp::new(5, false, None);
        app.process_ai_response(AiResponse::Summary(material()));

        assert_eq!(app.state, AppState::Study);
        assert_eq!(app.summary_points, vec!["Ownership", "Borrowing"]);
        assert_eq!(app.flashcards.len(), 2);
        assert_eq!(app.flashcards[1].answer, "Shared and mutable");
    }

    #[test]
    fn test_flashcard_navigation_and_flip() {
        let mut app = StudyApp::new(5, false, None);
        app.set_material(material());

        app.handle_key(key(KeyCode::Enter));
        assert!(app.card_flipped);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.card_index, 1);
        assert!(!app.card_flipped);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.card_index, 1);
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.card_index, 0);
    }

    #[test]
    fn test_generate_requires_material() {
        let mut app = StudyApp::new(5, false, None);
        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.state, AppState::Study);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_setup_sends_selected_count() {
        let (tx, rx) = mpsc::channel();
        let mut app = StudyApp::new(5, false, Some(tx));
        app.set_material(material());

        app.handle_key(key(KeyCode::Char('g')));
        assert_eq!(app.state, AppState::QuizSetup);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        match rx.try_recv().unwrap() {
            AiRequest::GenerateQuiz {
                content,
                num_questions,
            } => {
                assert_eq!(content, "- Ownership\n- Borrowing");
                assert_eq!(num_questions, 10);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_quiz_returns_to_setup() {
        let mut app = StudyApp::new(5, false, None);
        app.set_material(material());
        app.process_ai_response(AiResponse::Quiz(vec![QuizQuestion::new(
            "Broken",
            vec!["only".into()],
            0,
        )]));

        assert_eq!(app.state, AppState::QuizSetup);
        assert!(app.quiz.is_none());
        assert!(app.status.unwrap().contains("Quiz generation failed"));
    }

    #[test]
    fn test_enter_blocked_until_answer_selected() {
        let mut app = app_in_quiz();
        assert_eq!(app.state, AppState::Quiz);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.quiz.as_ref().unwrap().current_index(), 0);
        assert_eq!(app.status.as_deref(), Some("Select an answer first"));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.quiz.as_ref().unwrap().current_index(), 1);
        assert_eq!(app.option_cursor, 0);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_enter_on_last_question_shows_results() {
        let mut app = app_in_quiz();
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('3')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Results);
        let session = app.quiz.as_ref().unwrap();
        assert_eq!(session.phase(), Phase::Submitted);
        assert_eq!(session.score(), Some(1));
    }

    #[test]
    fn test_digit_beyond_options_ignored() {
        let mut app = app_in_quiz();
        app.handle_key(key(KeyCode::Char('5')));
        assert!(!app.quiz.as_ref().unwrap().is_answered(0));
    }

    #[test]
    fn test_retake_from_results() {
        let mut app = app_in_quiz();
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Results);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Quiz);
        let session = app.quiz.as_ref().unwrap();
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.questions(), questions().as_slice());
    }

    #[test]
    fn test_esc_abandons_quiz() {
        let mut app = app_in_quiz();
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert_eq!(app.state, AppState::Study);
        assert!(app.quiz.is_none());
    }

    #[test]
    fn test_new_summary_discards_quiz() {
        let mut app = app_in_quiz();
        app.process_ai_response(AiResponse::Summary(material()));
        assert!(app.quiz.is_none());
        assert_eq!(app.state, AppState::Study);
    }

    #[test]
    fn test_ai_error_routes_back() {
        let mut app = StudyApp::new(5, false, None);
        app.set_material(material());
        app.request_quiz();
        app.process_ai_response(AiResponse::Error {
            request: RequestKind::GenerateQuiz,
            error: "rate limited".to_string(),
        });

        assert_eq!(app.state, AppState::QuizSetup);
        assert_eq!(app.status.as_deref(), Some("rate limited"));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = app_in_quiz();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key(ctrl_c));
    }
}
