use crate::models::QuestionReview;
use crate::quiz::QuizSession;
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_footer, draw_header};
use crate::utils::{option_label, truncate_string};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const OPTION_WIDTH: usize = 70;

pub fn draw_results(f: &mut Frame, session: &QuizSession, scroll: u16) {
    let layout = calculate_screen_chunks(f.area());

    let score = session.score().unwrap_or(0);
    let title = format!(
        "Quiz Results - You scored {} out of {}",
        score,
        session.questions().len()
    );
    draw_header(f, layout.header_area, &title);

    let text = match session.review() {
        Ok(review) => review_text(&review),
        Err(e) => Text::from(e.to_string()),
    };
    let results = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(results, layout.content_area);

    draw_footer(
        f,
        layout.footer_area,
        None,
        &[
            ("↑/↓", "Scroll"),
            ("r", "Retake Quiz"),
            ("g", "New Quiz"),
            ("s", "Study"),
            ("q", "Quit"),
        ],
    );
}

fn review_text(review: &[QuestionReview]) -> Text<'static> {
    let mut text = Text::default();

    for row in review {
        let verdict = if row.is_correct {
            Span::styled("✓", Style::default().fg(Color::Green))
        } else {
            Span::styled("✗", Style::default().fg(Color::Red))
        };
        text.push_line(Line::from(vec![
            verdict,
            Span::styled(
                format!(" {}. {}", row.index + 1, row.question),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));

        for (i, option) in row.options.iter().enumerate() {
            let is_correct = i == row.correct_option_index;
            let is_selected = row.selected_option_index == Some(i);
            let style = if is_correct {
                Style::default().fg(Color::Green)
            } else if is_selected {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let suffix = if is_selected { " (Your answer)" } else { "" };
            text.push_line(Line::from(Span::styled(
                format!(
                    "   {}. {}{}",
                    option_label(i),
                    truncate_string(option, OPTION_WIDTH),
                    suffix
                ),
                style,
            )));
        }

        if row.selected_option_index.is_none() {
            text.push_line(Line::from(Span::styled(
                "   Not answered",
                Style::default().fg(Color::DarkGray),
            )));
        } else if !row.is_correct
            && let Some(correct) = row.options.get(row.correct_option_index)
        {
            text.push_line(Line::from(Span::styled(
                format!("   Correct answer: {}", correct),
                Style::default().fg(Color::Green),
            )));
        }
        text.push_line(Line::from(""));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_text_marks_answers() {
        let review = vec![QuestionReview {
            index: 0,
            question: "Capital of France?".to_string(),
            options: vec!["Rome".to_string(), "Paris".to_string()],
            correct_option_index: 1,
            selected_option_index: Some(0),
            is_correct: false,
        }];

        let text = review_text(&review);
        let rendered: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(rendered[0], "✗ 1. Capital of France?");
        assert_eq!(rendered[1], "   A. Rome (Your answer)");
        assert_eq!(rendered[2], "   B. Paris");
        assert_eq!(rendered[3], "   Correct answer: Paris");
    }
}
