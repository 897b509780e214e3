use crate::format::pitch_label;
use crate::state::scoring::Leaders;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Widget};

/// Players per pitch row, front to back.
const ROW_SIZES: [usize; 2] = [5, 4];

/// The XI laid out as rows of 5, 4 and the rest.
pub struct Pitch<'a> {
    pub lineup: &'a [String],
    pub leaders: &'a Leaders,
    pub selected: Option<usize>,
    /// Incoming player shown in place of the selected slot during a swap preview.
    pub incoming: Option<&'a str>,
}

pub fn pitch_rows(count: usize) -> Vec<std::ops::Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    for size in ROW_SIZES {
        if start >= count {
            break;
        }
        let end = (start + size).min(count);
        rows.push(start..end);
        start = end;
    }
    if start < count {
        rows.push(start..count);
    }
    rows
}

fn cell_label(index: usize, name: &str, leaders: &Leaders) -> String {
    let badge = leaders.badge(name).map(|b| format!(" ({b})")).unwrap_or_default();
    format!("{}. {}{badge}", index + 1, pitch_label(name))
}

impl Widget for Pitch<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" Pitch ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 10 || inner.height == 0 || self.lineup.is_empty() {
            return;
        }

        let rows = pitch_rows(self.lineup.len());
        let row_gap = (inner.height / rows.len() as u16).max(1);
        for (row_idx, range) in rows.into_iter().enumerate() {
            let y = inner.y + row_idx as u16 * row_gap + row_gap / 2;
            if y >= inner.y + inner.height {
                break;
            }
            let cell_width = inner.width / range.len() as u16;
            for (col, index) in range.enumerate() {
                let is_selected = self.selected == Some(index);
                let (name, style) = match (is_selected, self.incoming) {
                    (true, Some(incoming)) => (
                        incoming,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    (true, None) => (
                        self.lineup[index].as_str(),
                        Style::default().fg(Color::Black).bg(Color::Yellow),
                    ),
                    _ => (self.lineup[index].as_str(), Style::default().fg(Color::White)),
                };
                let label: String = cell_label(index, name, self.leaders)
                    .chars()
                    .take(cell_width.saturating_sub(1) as usize)
                    .collect();
                let x = inner.x
                    + col as u16 * cell_width
                    + cell_width.saturating_sub(label.chars().count() as u16) / 2;
                buf.set_string(x, y, label, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui::Terminal;
    use tui::backend::TestBackend;

    #[test]
    fn eleven_players_form_five_four_two() {
        assert_eq!(pitch_rows(11), vec![0..5, 5..9, 9..11]);
        assert_eq!(pitch_rows(3), vec![0..3]);
        assert!(pitch_rows(0).is_empty());
    }

    #[test]
    fn labels_carry_leader_badges() {
        let leaders = Leaders { captain: Some("A Khan".into()), vice_captain: Some("B Lee".into()) };
        assert_eq!(cell_label(0, "A Khan", &leaders), "1. A Khan (C)");
        assert_eq!(cell_label(4, "B Lee", &leaders), "5. B Lee (VC)");
        assert_eq!(cell_label(2, "C Roy", &leaders), "3. C Roy");
    }

    #[test]
    fn renders_full_lineup() {
        let lineup: Vec<String> = (0..11).map(|i| format!("P{i}")).collect();
        let leaders = Leaders::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 14)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    Pitch { lineup: &lineup, leaders: &leaders, selected: Some(3), incoming: None },
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
        assert!(text.contains("1. P0"));
        assert!(text.contains("11. P10"));
    }
}
