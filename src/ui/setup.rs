use crate::app::StudyApp;
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_footer, draw_header};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_setup(f: &mut Frame, app: &StudyApp) {
    let layout = calculate_screen_chunks(f.area());

    draw_header(f, layout.header_area, "Generate Quiz");

    let items: Vec<ListItem> = app
        .question_counts
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let style = if i == app.count_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} Questions", n)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Number of Questions"),
    );
    f.render_widget(list, layout.content_area);

    draw_footer(
        f,
        layout.footer_area,
        app.status.as_deref(),
        &[
            ("↑/↓", "Choose"),
            ("Enter", "Generate"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
    );
}

pub fn draw_loading(f: &mut Frame, message: &str) {
    let layout = calculate_screen_chunks(f.area());

    draw_header(f, layout.header_area, "Study Aid");

    let body = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    draw_footer(f, layout.footer_area, None, &[("q", "Quit")]);
}
