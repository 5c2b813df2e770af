use crate::view::ViewState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Widget, Wrap},
};

pub const SECTION_HEADING: &str = "Generated Tweets:";
pub const CARD_BG: Color = Color::Rgb(0xf4, 0xf4, 0xf4);

const CARD_MARGIN_X: u16 = 1;
const CARD_PAD_X: u16 = 2;
const CARD_PAD_Y: u16 = 1;

/// Heading, optional market context and one card per tweet, starting at `scroll`.
pub struct TweetSection<'a> {
    state: &'a ViewState,
    scroll: usize,
}

impl<'a> TweetSection<'a> {
    pub fn new(state: &'a ViewState, scroll: usize) -> Self {
        Self { state, scroll }
    }

    fn context_line(&self) -> Option<Line<'static>> {
        let mut spans = Vec::new();
        if let Some(market) = &self.state.market {
            spans.push(Span::styled(
                market.token.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!(
                "  price {}  vol {}",
                market.price, market.volume
            )));
        }
        if let Some(social) = &self.state.social {
            if !spans.is_empty() {
                spans.push(Span::raw("  |  "));
            }
            spans.push(Span::styled(
                social.influencer.clone(),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw(format!(
                " mentioned {} {}x",
                social.token, social.mentions
            )));
        }

        if spans.is_empty() {
            None
        } else {
            Some(Line::from(spans).style(Style::default().fg(Color::DarkGray)))
        }
    }
}

/// Card body without its padding block. Sizing and drawing share it so the
/// card is exactly as tall as the wrapped text.
fn card_body(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).wrap(Wrap { trim: false })
}

/// Rows a card needs for `text` when it is `width` columns wide.
pub fn card_height(text: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(CARD_PAD_X * 2).max(1);
    let lines = card_body(text).line_count(inner).max(1);
    u16::try_from(lines).unwrap_or(u16::MAX - CARD_PAD_Y * 2) + CARD_PAD_Y * 2
}

fn card_style() -> Style {
    Style::default().bg(CARD_BG).fg(Color::Black)
}

impl Widget for TweetSection<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.tweets.is_empty() || area.height == 0 {
            return;
        }

        let mut y = area.y;
        let bottom = area.y + area.height;
        let card_width = area.width.saturating_sub(CARD_MARGIN_X * 2);

        let heading = Line::from(Span::styled(
            SECTION_HEADING,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
        buf.set_line(area.x + CARD_MARGIN_X, y, &heading, card_width);
        y += 1;

        if let Some(context) = self.context_line() {
            if y < bottom {
                buf.set_line(area.x + CARD_MARGIN_X, y, &context, card_width);
                y += 1;
            }
        }
        y += 1;

        for tweet in self.state.tweets.iter().skip(self.scroll) {
            if y >= bottom {
                break;
            }
            let height = card_height(tweet, card_width).min(bottom - y);
            let card = Rect::new(area.x + CARD_MARGIN_X, y, card_width, height);

            card_body(tweet)
                .block(
                    Block::default()
                        .style(card_style())
                        .padding(Padding::new(CARD_PAD_X, CARD_PAD_X, CARD_PAD_Y, CARD_PAD_Y)),
                )
                .render(card, buf);

            y = y.saturating_add(height + 1);
        }
    }
}
