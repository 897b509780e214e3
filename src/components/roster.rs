use crate::format::{card_name, initials};
use crate::state::app_state::PickedPlayer;
use cricxi_api::AggregateStatsMap;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Widget};

const SLOT_WIDTH: u16 = 8;

/// Squad grid for one side, with a stats badge under each name.
pub struct RosterGrid<'a> {
    pub players: &'a [String],
    /// Roster positions already in a slot.
    pub picked: &'a [usize],
    pub cursor: usize,
    pub columns: usize,
    pub focused: bool,
    pub stats: &'a AggregateStatsMap,
}

/// First grid row to draw so the cursor row stays visible.
pub fn scroll_row(cursor_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    cursor_row.saturating_sub(visible_rows - 1)
}

fn badge(stats: &AggregateStatsMap, player: &str) -> String {
    let s = stats.get(player);
    format!("R {}  W {}", s.runs.display(), s.wickets.display())
}

impl Widget for RosterGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.columns.max(1);
        if area.width < columns as u16 * 4 || area.height < 2 {
            return;
        }
        let cell_width = area.width / columns as u16;
        let cell_height = 2u16;
        let visible_rows = (area.height / cell_height) as usize;
        let first_row = scroll_row(self.cursor / columns, visible_rows);

        for (index, player) in self.players.iter().enumerate() {
            let row = index / columns;
            if row < first_row || row >= first_row + visible_rows {
                continue;
            }
            let x = area.x + (index % columns) as u16 * cell_width;
            let y = area.y + (row - first_row) as u16 * cell_height;

            let is_cursor = self.focused && index == self.cursor;
            let is_picked = self.picked.contains(&index);
            let name_style = match (is_cursor, is_picked) {
                (true, _) => Style::default().fg(Color::Black).bg(Color::Yellow),
                (false, true) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::White),
            };
            let marker = if is_picked { "✓ " } else { "  " };
            let width = cell_width.saturating_sub(1) as usize;
            let label: String = format!("{marker}{}", card_name(player)).chars().take(width).collect();
            buf.set_string(x, y, label, name_style);

            let badge: String = format!("  {}", badge(self.stats, player)).chars().take(width).collect();
            buf.set_string(x, y + 1, badge, Style::default().fg(Color::DarkGray));
        }
    }
}

/// The eleven selection slots.
pub struct SelectionSlots<'a> {
    pub slots: &'a [Option<PickedPlayer>],
    pub cursor: usize,
    pub focused: bool,
}

impl Widget for SelectionSlots<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || self.slots.is_empty() {
            return;
        }
        let per_row = (area.width / SLOT_WIDTH).max(1) as usize;
        for (index, slot) in self.slots.iter().enumerate() {
            let row = (index / per_row) as u16;
            let rect = Rect::new(
                area.x + (index % per_row) as u16 * SLOT_WIDTH,
                area.y + row * 3,
                SLOT_WIDTH,
                3,
            );
            if rect.bottom() > area.bottom() || rect.right() > area.right() {
                continue;
            }
            let is_cursor = self.focused && index == self.cursor;
            let border = if is_cursor {
                Color::Yellow
            } else if slot.is_some() {
                Color::Green
            } else {
                Color::DarkGray
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border));
            let inner = block.inner(rect);
            block.render(rect, buf);

            let (text, style) = match slot {
                Some(player) => (initials(&player.name), Style::default().fg(Color::White)),
                None => ("PLAYER".to_string(), Style::default().fg(Color::DarkGray)),
            };
            let text: String = text.chars().take(inner.width as usize).collect();
            let x = inner.x + inner.width.saturating_sub(text.chars().count() as u16) / 2;
            buf.set_string(x, inner.y, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui::Terminal;
    use tui::backend::TestBackend;

    #[test]
    fn scroll_keeps_cursor_row_visible() {
        assert_eq!(scroll_row(0, 4), 0);
        assert_eq!(scroll_row(3, 4), 0);
        assert_eq!(scroll_row(6, 4), 3);
        assert_eq!(scroll_row(2, 0), 0);
    }

    #[test]
    fn slots_show_initials_or_placeholder() {
        let mut slots: Vec<Option<PickedPlayer>> = vec![None; 11];
        slots[0] = Some(PickedPlayer {
            roster_index: 0,
            name: "Paul Stirling".into(),
            image: "default.png".into(),
        });
        let mut terminal = Terminal::new(TestBackend::new(96, 6)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    SelectionSlots { slots: &slots, cursor: 0, focused: true },
                    frame.area(),
                )
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("PS"));
        assert!(text.contains("PLAYER"));
    }

    #[test]
    fn grid_renders_names_and_badges() {
        let players: Vec<String> = vec!["Paul Stirling".into(), "Andrew Balbirnie".into()];
        let stats = AggregateStatsMap::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    RosterGrid {
                        players: &players,
                        picked: &[1],
                        cursor: 0,
                        columns: 2,
                        focused: true,
                        stats: &stats,
                    },
                    frame.area(),
                )
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("P. Stirling"));
        assert!(text.contains("A. Balbirnie"));
        assert!(text.contains("R -  W -"));
    }
}
