pub mod widgets;

use crate::view::ViewState;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use widgets::{GenerateButton, TweetSection};

pub fn draw(frame: &mut Frame, state: &ViewState, title: &str, scroll: usize) {
    let [header, button, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, header);

    frame.render_widget(
        GenerateButton::new(state.button_label(), state.button_enabled()),
        button,
    );

    // Leave a blank row between the button and the section.
    let [_, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
    frame.render_widget(TweetSection::new(state, scroll), body);

    frame.render_widget(footer_line(state, scroll), footer);
}

/// Highest useful scroll offset: the last card stays on screen.
pub fn max_scroll(state: &ViewState) -> usize {
    state.tweets.len().saturating_sub(1)
}

fn footer_line(state: &ViewState, scroll: usize) -> Paragraph<'static> {
    let key = Style::default().fg(Color::Yellow);
    let hint = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Enter", key),
        Span::styled(" generate  ", hint),
        Span::styled("↑/↓", key),
        Span::styled(" scroll  ", hint),
        Span::styled("q", key),
        Span::styled(" quit", hint),
    ];
    if !state.tweets.is_empty() {
        spans.push(Span::styled(
            format!("   tweet {}/{}", scroll + 1, state.tweets.len()),
            hint,
        ));
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
