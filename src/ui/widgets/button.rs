use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The generate button, centered in its area. Disabled while a request is out.
pub struct GenerateButton<'a> {
    label: &'a str,
    enabled: bool,
}

impl<'a> GenerateButton<'a> {
    pub fn new(label: &'a str, enabled: bool) -> Self {
        Self { label, enabled }
    }

    fn style(&self) -> Style {
        if self.enabled {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }
}

impl Widget for GenerateButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.label.chars().count() as u16 + 6).min(area.width);
        let [_, slot, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(area);

        let style = self.style();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style);

        Paragraph::new(self.label)
            .style(style)
            .alignment(Alignment::Center)
            .block(block)
            .render(slot, buf);
    }
}
