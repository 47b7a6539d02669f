use crate::quiz::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::ui::{draw_footer, draw_header};
use crate::utils::option_label;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, option_cursor: usize, status: Option<&str>) {
    let layout = calculate_quiz_chunks(f.area());

    let progress = format!(
        "Question {} of {}",
        session.current_index() + 1,
        session.questions().len()
    );
    draw_header(f, layout.header_area, &progress);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.progress_fraction().clamp(0.0, 1.0));
    f.render_widget(gauge, layout.progress_area);

    let question = session.current_question();
    let question_text = Text::from(format!(
        "{}. {}",
        session.current_index() + 1,
        question.text
    ));
    let question_widget = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let selected = session.selected_option(session.current_index());
    let options = Paragraph::new(option_lines(&question.options, selected, option_cursor))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let next_label = if session.is_last_question() {
        "Submit Answers"
    } else {
        "Next Question"
    };
    draw_footer(
        f,
        layout.help_area,
        status,
        &[
            ("↑/↓", "Move"),
            ("Space/1-9", "Select"),
            ("Enter", next_label),
            ("Esc", "Abandon"),
        ],
    );
}

fn option_lines(options: &[String], selected: Option<usize>, cursor: usize) -> Text<'static> {
    let mut text = Text::default();
    for (i, option) in options.iter().enumerate() {
        let marker = if selected == Some(i) { "(•)" } else { "( )" };
        let pointer = if i == cursor { ">" } else { " " };
        let style = if i == cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        text.push_line(Line::from(Span::styled(
            format!("{} {} {}. {}", pointer, marker, option_label(i), option),
            style,
        )));
    }
    text
}
