use crate::app::StudyApp;
use crate::ui::layout::calculate_study_chunks;
use crate::ui::{draw_footer, draw_header};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_study(f: &mut Frame, app: &StudyApp) {
    let layout = calculate_study_chunks(f.area());

    draw_header(f, layout.header_area, "Study Aid - Summary & Flashcards");

    let mut summary_text = Text::default();
    if app.summary_points.is_empty() {
        summary_text.push_line(Line::from(Span::styled(
            "No summary points available.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for point in &app.summary_points {
            summary_text.push_line(Line::from(format!("• {}", point)));
        }
    }
    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Key Summary Points"));
    f.render_widget(summary, layout.summary_area);

    let (card_title, card_text) = flashcard_view(app);
    let card = Paragraph::new(card_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(card_title));
    f.render_widget(card, layout.card_area);

    draw_footer(
        f,
        layout.footer_area,
        app.status.as_deref(),
        &[
            ("←/→", "Card"),
            ("Enter", "Flip"),
            ("g", "Generate Quiz"),
            ("q", "Quit"),
        ],
    );
}

fn flashcard_view(app: &StudyApp) -> (String, Text<'static>) {
    let mut text = Text::default();

    if let Some(card) = app.flashcards.get(app.card_index) {
        let (label, body, color) = if app.card_flipped {
            ("Answer", card.answer.as_str(), Color::Green)
        } else {
            ("Question", card.question.as_str(), Color::Yellow)
        };
        text.push_line(Line::from(Span::styled(
            format!("{}:", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(""));
        for line in body.lines() {
            text.push_line(Line::from(line.to_string()));
        }
        let title = format!(
            "Flashcard {} / {} - {}",
            app.card_index + 1,
            app.flashcards.len(),
            label
        );
        return (title, text);
    }

    match app.material.as_ref() {
        Some(material) if !material.flashcards.trim().is_empty() => {
            text.push_line(Line::from(Span::styled(
                "Could not parse flashcards. Raw content:",
                Style::default().fg(Color::DarkGray),
            )));
            text.push_line(Line::from(""));
            for line in material.flashcards.lines() {
                text.push_line(Line::from(line.to_string()));
            }
        }
        _ => {
            text.push_line(Line::from(Span::styled(
                "No flashcards generated or available.",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    ("Flashcards".to_string(), text)
}
