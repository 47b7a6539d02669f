pub mod layout;
mod quiz;
mod results;
mod setup;
mod study;

use crate::app::StudyApp;
use crate::models::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks, calculate_study_chunks};
pub use quiz::draw_quiz;
pub use results::draw_results;
pub use setup::{draw_loading, draw_setup};
pub use study::draw_study;

pub fn draw(f: &mut Frame, app: &StudyApp) {
    match &app.state {
        AppState::Loading { message } => draw_loading(f, message),
        AppState::Study => draw_study(f, app),
        AppState::QuizSetup => draw_setup(f, app),
        AppState::Quiz => {
            if let Some(session) = &app.quiz {
                draw_quiz(f, session, app.option_cursor, app.status.as_deref());
            }
        }
        AppState::Results => {
            if let Some(session) = &app.quiz {
                draw_results(f, session, app.results_scroll);
            }
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Footer with an optional status message above the key hints.
fn draw_footer(f: &mut Frame, area: Rect, status: Option<&str>, hints: &[(&str, &str)]) {
    let mut lines = Vec::new();
    if let Some(status) = status {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", action)));
    }
    lines.push(Line::from(spans));

    let footer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
