use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Neighbours shown on each side of the selected card.
const MAX_NEIGHBOURS: usize = 2;
const VISIBLE_CARDS: u16 = 2 * MAX_NEIGHBOURS as u16 + 1;

#[derive(Debug, Clone)]
pub enum CarouselContent {
    /// Nothing to look up yet; empty boxes keep the layout stable.
    Placeholder,
    Empty(&'static str),
    Cards { cards: Vec<Vec<String>>, selected: usize },
}

/// Horizontally scrolling row of cards centred on the selection.
pub struct Carousel<'a> {
    pub title: &'a str,
    pub content: CarouselContent,
    pub focused: bool,
}

/// Offsets from the selected card that are worth drawing for `count` cards,
/// so no card appears twice.
pub fn visible_offsets(count: usize) -> Vec<isize> {
    if count == 0 {
        return Vec::new();
    }
    let left = MAX_NEIGHBOURS.min((count - 1) / 2);
    let right = MAX_NEIGHBOURS.min(count - 1 - left);
    (-(left as isize)..=right as isize).collect()
}

fn wrap_index(selected: usize, offset: isize, count: usize) -> usize {
    (selected as isize + offset).rem_euclid(count as isize) as usize
}

fn card_style(distance: usize) -> Style {
    match distance {
        0 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        1 => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::DarkGray),
    }
}

fn card_rect(area: Rect, card_width: u16, offset: isize) -> Option<Rect> {
    let center_x = area.x as isize + (area.width / 2) as isize - (card_width / 2) as isize;
    let x = center_x + offset * card_width as isize;
    if x < area.x as isize || x + card_width as isize > (area.x + area.width) as isize {
        return None;
    }
    Some(Rect::new(x as u16, area.y, card_width, area.height))
}

fn render_card(lines: &[String], style: Style, rect: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    Paragraph::new(text)
        .block(block)
        .style(style)
        .alignment(Alignment::Center)
        .render(rect, buf);
}

impl Widget for Carousel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 3 {
            return;
        }
        let title_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        buf.set_string(area.x, area.y, self.title, title_style);
        let area = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        let card_width = (area.width / VISIBLE_CARDS).max(10);

        match self.content {
            CarouselContent::Placeholder => {
                for offset in -(MAX_NEIGHBOURS as isize)..=MAX_NEIGHBOURS as isize {
                    if let Some(rect) = card_rect(area, card_width, offset) {
                        render_card(&[], card_style(offset.unsigned_abs()), rect, buf);
                    }
                }
            }
            CarouselContent::Empty(message) => {
                Paragraph::new(message)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .render(Rect::new(area.x, area.y + area.height / 2, area.width, 1), buf);
            }
            CarouselContent::Cards { cards, selected } => {
                let count = cards.len();
                for offset in visible_offsets(count) {
                    let Some(rect) = card_rect(area, card_width, offset) else {
                        continue;
                    };
                    let index = wrap_index(selected, offset, count);
                    render_card(&cards[index], card_style(offset.unsigned_abs()), rect, buf);
                }
            }
        }
    }
}
