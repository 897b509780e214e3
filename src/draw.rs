use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, ROSTER_COLUMNS, Screen, WIZARD_STEPS};
use crate::components::carousel::{Carousel, CarouselContent};
use crate::components::pitch::Pitch;
use crate::components::player_card::{SwapComparison, aggregate_lines, points_lines};
use crate::components::roster::{RosterGrid, SelectionSlots};
use crate::format::{
    bench_label, card_name, chunk_team_name, report_name, shorten_league, shorten_location,
    weekday_name, with_placeholder,
};
use crate::state::app_state::{PickerFocus, SLOT_COUNT};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::scoring::mean_points;
use crate::ui::layout::LayoutAreas;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.screen {
            Screen::Instructions => draw_instructions(f, layout.main, app),
            Screen::SelectMatch => draw_select_match(f, layout.main, app),
            Screen::PlayerSelection => draw_player_selection(f, layout.main, app),
            Screen::Playing11 | Screen::FinalPlaying11 => draw_lineup(f, layout.main, app),
            Screen::SwapPlayer => draw_swap(f, layout.main, app),
            Screen::TeamReport => draw_team_report(f, layout.main, app),
            Screen::PlayerInfo => draw_player_info(f, layout.main, app),
            Screen::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_status(f, layout.status, app);
        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn accent() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Wizard step to underline; side screens keep the step they were opened from.
fn current_step(app: &App) -> usize {
    app.state
        .screen
        .step()
        .or_else(|| app.state.history.iter().rev().find_map(Screen::step))
        .unwrap_or(0)
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let titles: Vec<Line> = WIZARD_STEPS.iter().map(|s| Line::from(s.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .title(" cricxi "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED).fg(Color::Yellow))
        .select(current_step(app))
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

fn draw_instructions(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" How To Play ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [body, prompt] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = app
        .state
        .instructions
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| {
            Line::from(vec![Span::styled("• ", accent()), Span::raw(l.as_str())])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((app.state.instructions_scroll, 0)),
        body,
    );
    f.render_widget(
        Paragraph::new("Press Enter to pick a match")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt,
    );
}

// ---------------------------------------------------------------------------
// Match selection
// ---------------------------------------------------------------------------

fn draw_select_match(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Select Match ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [date_area, error_area, league_area, match_area, next_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(1),
    ])
    .areas(inner);

    let selection = &app.state.match_selection;
    let masked = selection.masked();
    let placeholder = with_placeholder(&masked);
    let typed = masked.chars().count();
    let mut date_spans = vec![
        Span::styled(masked.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(placeholder.chars().skip(typed).collect::<String>(), dim()),
    ];
    if let Some(date) = selection.date() {
        date_spans.push(Span::styled(format!("   {}", weekday_name(date)), Style::default().fg(Color::Gray)));
    }
    f.render_widget(
        Paragraph::new(Line::from(date_spans))
            .block(default_border(Color::DarkGray).title(" Match Date "))
            .alignment(Alignment::Center),
        date_area,
    );

    if let Some(err) = selection.error.as_deref() {
        f.render_widget(
            Paragraph::new(err)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            error_area,
        );
    }

    let league_content = match (selection.date(), selection.listing.as_ref()) {
        (Some(_), Some(listing)) if listing.is_empty() => CarouselContent::Empty("NO LEAGUES FOUND"),
        (Some(_), Some(listing)) => CarouselContent::Cards {
            cards: listing.leagues.iter().map(|l| vec![shorten_league(&l.name)]).collect(),
            selected: selection.league_index,
        },
        (Some(_), None) if selection.error.is_some() => CarouselContent::Empty("NO LEAGUES FOUND"),
        _ => CarouselContent::Placeholder,
    };
    f.render_widget(
        Carousel { title: "LEAGUE  ↑/↓", content: league_content, focused: false },
        league_area,
    );

    let match_content = match (selection.listing.as_ref(), selection.selected_league()) {
        (Some(_), Some(league)) if !league.matches.is_empty() => CarouselContent::Cards {
            cards: league
                .matches
                .iter()
                .map(|fixture| {
                    let (team_a, team_b, location) = fixture.teams_label();
                    let mut card = vec![
                        chunk_team_name(&team_a),
                        "vs".to_string(),
                        chunk_team_name(&team_b),
                        shorten_location(&location),
                    ];
                    if let Some(date) = selection.date() {
                        card.push(weekday_name(date).to_string());
                    }
                    card
                })
                .collect(),
            selected: selection.match_index,
        },
        (Some(_), _) => CarouselContent::Empty("NO MATCHES FOUND"),
        (None, _) if selection.error.is_some() => CarouselContent::Empty("NO MATCHES FOUND"),
        _ => CarouselContent::Placeholder,
    };
    f.render_widget(
        Carousel { title: "MATCH  ←/→", content: match_content, focused: true },
        match_area,
    );

    let (label, style) = if app.state.aggregate_pending {
        ("Loading player stats...".to_string(), Style::default().fg(Color::Yellow))
    } else if let Some(details) = selection.selected_match() {
        (
            format!("[ NEXT ]  {} match  Enter", details.format),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ NEXT ]".to_string(), dim())
    };
    f.render_widget(Paragraph::new(label).style(style).alignment(Alignment::Center), next_area);
}

// ---------------------------------------------------------------------------
// Player selection
// ---------------------------------------------------------------------------

fn draw_player_selection(f: &mut Frame, area: Rect, app: &App) {
    let picker = &app.state.picker;
    let Some(selected) = app.state.selected.as_ref() else {
        draw_placeholder(f, area, "Pick a match first");
        return;
    };
    let side = selected.details().side(picker.side_index);
    let side_name = side.map(|s| s.name.as_str()).unwrap_or("Unknown side");

    let block = default_border(Color::White).title(format!(
        " Select Players: {side_name} ({}/2) ",
        picker.side_index + 1
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [body, slots_area, footer] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(1),
    ])
    .areas(inner);
    let [grid_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(body);

    let roster = app.state.picker_roster();
    let picked: Vec<usize> = picker.slots.iter().flatten().map(|p| p.roster_index).collect();
    let roster_focused = picker.focus == PickerFocus::Roster;
    let grid_block = default_border(if roster_focused { Color::Yellow } else { Color::DarkGray })
        .title(format!(" {} · {} ", shorten_league(&selected.league), selected.details().format));
    let grid_inner = grid_block.inner(grid_area);
    f.render_widget(grid_block, grid_area);
    if roster.is_empty() {
        f.render_widget(Paragraph::new("No players listed for this side").style(dim()), grid_inner);
    } else {
        f.render_widget(
            RosterGrid {
                players: &roster,
                picked: &picked,
                cursor: picker.cursor,
                columns: ROSTER_COLUMNS,
                focused: roster_focused,
                stats: &app.state.aggregate,
            },
            grid_inner,
        );
    }

    let detail_block = default_border(Color::DarkGray).title(" Player ");
    let detail_inner = detail_block.inner(detail_area);
    f.render_widget(detail_block, detail_area);
    let highlighted = match picker.focus {
        PickerFocus::Roster => roster.get(picker.cursor).cloned(),
        PickerFocus::Slots => picker.slots[picker.slot_cursor].as_ref().map(|p| p.name.clone()),
    };
    if let Some(name) = highlighted {
        let mut lines = aggregate_lines(&name, Some(side_name), &app.state.aggregate.get(&name));
        lines.push(Line::default());
        lines.push(Line::styled(format!("Image: {}", app.state.image_for(&name)), dim()));
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), detail_inner);
    }

    let slots_block = default_border(if roster_focused { Color::DarkGray } else { Color::Yellow })
        .title(format!(" Selected {}/{SLOT_COUNT} ", picker.filled()));
    let slots_inner = slots_block.inner(slots_area);
    f.render_widget(slots_block, slots_area);
    f.render_widget(
        SelectionSlots { slots: &picker.slots, cursor: picker.slot_cursor, focused: !roster_focused },
        slots_inner,
    );

    let total = picker.team_a.len() + picker.filled();
    let (next_label, next_style) = if picker.side_index == 0 {
        ("n=NEXT".to_string(), Style::default().fg(Color::Green))
    } else if picker.can_commit() {
        (format!("n=PREDICT 11 ({total} picked)"), Style::default().fg(Color::Green))
    } else {
        (format!("PREDICT 11 needs 11 picked ({total})"), dim())
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Enter=pick  Tab=slots  a=auto-select  ", dim()),
            Span::styled(next_label, next_style),
        ])),
        footer,
    );
}

// ---------------------------------------------------------------------------
// Predicted XI
// ---------------------------------------------------------------------------

fn prediction_placeholder(f: &mut Frame, area: Rect, app: &App) -> bool {
    let prediction = &app.state.prediction;
    if prediction.is_loaded() {
        return false;
    }
    let message = if prediction.pending {
        "Predicting the best XI...".to_string()
    } else {
        match prediction.error.as_deref() {
            Some(err) => format!("Prediction failed:\n{err}"),
            None => "No prediction yet".to_string(),
        }
    };
    draw_placeholder(f, area, &message);
    true
}

fn draw_lineup(f: &mut Frame, area: Rect, app: &App) {
    if prediction_placeholder(f, area, app) {
        return;
    }
    let prediction = &app.state.prediction;
    let is_final = app.state.screen == Screen::FinalPlaying11;
    let title = if is_final { " Final Playing 11 " } else { " Playing 11 " };

    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [body, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    let [list_area, side_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    let mut lines = Vec::new();
    for (index, player) in prediction.predicted.iter().enumerate() {
        let selected = index == prediction.selected_slot;
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let badge = prediction
            .leaders
            .badge(player)
            .map(|b| format!(" ({b})"))
            .unwrap_or_default();
        let team = app
            .state
            .selected
            .as_ref()
            .and_then(|m| m.details().side_of(player))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. {:<16}", index + 1, card_name(player)), style),
            Span::styled(format!("{:>7.2}", mean_points(&prediction.stats, player)), Style::default().fg(Color::Cyan)),
            Span::styled(badge, accent()),
            Span::styled(format!("  {team}"), dim()),
        ]));
    }
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::DarkGray).title(" Lineup ")),
        list_area,
    );

    let [score_area, detail_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(side_area);
    let mut score_lines = vec![Line::from(vec![
        Span::styled("Predicted Total Score: ", accent()),
        Span::styled(
            format!("{:.2}", prediction.total_score),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])];
    match prediction.scores {
        Some(scores) => score_lines.extend([
            Line::from(format!("Team Consistency Score: {:.2}", scores.consistency)),
            Line::from(format!("Team Diversity Score: {:.2}", scores.diversity)),
            Line::from(format!("Team Form Score: {:.2}", scores.form)),
        ]),
        None => score_lines.push(Line::styled("Revaluating team...", dim())),
    }
    f.render_widget(
        Paragraph::new(score_lines).block(default_border(Color::DarkGray).title(" Team ")),
        score_area,
    );

    if let Some(player) = prediction.selected_player() {
        let mut lines = points_lines(prediction.points(player));
        lines.push(Line::default());
        lines.push(Line::styled(format!("Image: {}", app.state.image_for(player)), dim()));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(default_border(Color::DarkGray).title(format!(" {} ", card_name(player)))),
            detail_area,
        );
    }

    let hint = if is_final {
        "Enter=player info  r=team report  w=save  Esc=back"
    } else {
        "Enter=player info  r=team report  s=swap  f=finalise  Esc=back"
    };
    f.render_widget(Paragraph::new(hint).style(dim()), footer);
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

fn draw_swap(f: &mut Frame, area: Rect, app: &App) {
    if prediction_placeholder(f, area, app) {
        return;
    }
    let prediction = &app.state.prediction;
    let block = default_border(Color::White).title(" Swap Player ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [body, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    let [left, panel_area] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(body);
    let [pitch_area, bench_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(left);

    let preview = prediction.preview.as_ref();
    f.render_widget(
        Pitch {
            lineup: &prediction.predicted,
            leaders: &prediction.leaders,
            selected: Some(prediction.selected_slot),
            incoming: preview.map(|p| p.candidate.as_str()),
        },
        pitch_area,
    );

    let bench = app.state.bench();
    let mut spans = Vec::new();
    for (index, player) in bench.iter().enumerate() {
        let style = if prediction.bench_cursor == Some(index) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", bench_label(player)), style));
        spans.push(Span::raw(" "));
    }
    let bench_line = if spans.is_empty() {
        Line::styled("No players left on the bench", dim())
    } else {
        Line::from(spans)
    };
    f.render_widget(
        Paragraph::new(bench_line).block(default_border(Color::DarkGray).title(" Bench ←/→ ")),
        bench_area,
    );

    if let Some(player) = prediction.selected_player() {
        let current = app.state.aggregate.get(player);
        let candidate_name = preview.map(|p| p.candidate.as_str());
        let candidate = candidate_name.map(|c| app.state.aggregate.get(c));
        let panel = SwapComparison {
            player,
            current: &current,
            candidate: candidate.as_ref(),
            current_points: mean_points(&prediction.stats, player),
            candidate_points: candidate_name
                .map(|c| mean_points(&prediction.stats, c))
                .unwrap_or_default(),
            base_scores: prediction.scores,
            preview_scores: preview.and_then(|p| p.scores),
        };
        let mut lines = panel.lines();
        lines.push(Line::default());
        lines.push(Line::styled(format!("Image: {}", app.state.image_for(player)), dim()));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(default_border(Color::DarkGray).title(" Compare ")),
            panel_area,
        );
    }

    f.render_widget(
        Paragraph::new(format!(
            "↑/↓=slot  ←/→=preview  Enter=swap  f=finalise  total {:.2}",
            prediction.total_score
        ))
        .style(dim()),
        footer,
    );
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn draw_team_report(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Team Report ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let names: Vec<String> = app.state.prediction.predicted.iter().map(|p| report_name(p)).collect();
    let name_rows = names.len().div_ceil(4).max(1) as u16;
    let [names_area, text_area] =
        Layout::vertical([Constraint::Length(name_rows + 2), Constraint::Fill(1)]).areas(inner);

    let rows: Vec<Line> = names
        .chunks(4)
        .map(|chunk| {
            Line::from(
                chunk
                    .iter()
                    .map(|n| Span::styled(format!("{n:<20}"), Style::default().fg(Color::White)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(
        Paragraph::new(rows).block(default_border(Color::DarkGray).title(" XI ")),
        names_area,
    );

    let narrative = &app.state.narrative;
    let text = match (&narrative.text, &narrative.error) {
        (Some(text), _) => Paragraph::new(text.as_str()),
        (None, Some(err)) => {
            Paragraph::new(format!("Team analysis failed: {err}")).style(Style::default().fg(Color::Red))
        }
        (None, None) if narrative.is_pending() => {
            Paragraph::new("Generating team analysis...").style(dim())
        }
        (None, None) => Paragraph::new("No team analysis yet").style(dim()),
    };
    f.render_widget(
        text.wrap(Wrap { trim: true })
            .scroll((app.state.report_scroll, 0))
            .block(default_border(Color::DarkGray).title(" Analysis ")),
        text_area,
    );
}

fn draw_player_info(f: &mut Frame, area: Rect, app: &App) {
    let report = &app.state.player_report;
    let Some(player) = report.player.as_deref() else {
        draw_placeholder(f, area, "No player selected");
        return;
    };
    let block = default_border(Color::White).title(" Player Information ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [card_area, text_area] =
        Layout::horizontal([Constraint::Length(44), Constraint::Fill(1)]).areas(inner);

    let team = app
        .state
        .selected
        .as_ref()
        .and_then(|m| m.details().side_of(player));
    let mut lines = aggregate_lines(player, team, &app.state.aggregate.get(player));
    lines.push(Line::default());
    lines.extend(points_lines(app.state.prediction.points(player)));
    lines.push(Line::default());
    lines.push(Line::styled(format!("Image: {}", app.state.image_for(player)), dim()));
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(default_border(Color::DarkGray)),
        card_area,
    );

    let text = match (&report.analysis, &report.error) {
        (Some(text), _) => Paragraph::new(text.as_str()),
        (None, Some(err)) => {
            Paragraph::new(format!("Player analysis failed: {err}")).style(Style::default().fg(Color::Red))
        }
        (None, None) => Paragraph::new("Generating player analysis...").style(dim()),
    };
    f.render_widget(
        text.wrap(Wrap { trim: true })
            .scroll((report.scroll_offset, 0))
            .block(default_border(Color::DarkGray).title(" Analysis ")),
        text_area,
    );
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

static HELP_ROWS: &[(&str, &str)] = &[
    ("Global", "q quit  Esc back  ? help  \" logs  F full screen"),
    ("Instructions", "Enter start  j/k scroll"),
    ("Select Match", "0-9 date  Backspace erase  ↑/↓ league  ←/→ match  Enter next"),
    ("Player Selection", "arrows move  Enter pick/clear  Tab slots  a auto-select  n next"),
    ("Playing 11", "↑/↓ player  Enter info  r report  s swap  f finalise"),
    ("Swap Player", "↑/↓ slot  ←/→ preview bench player  Enter swap  f finalise"),
    ("Final Playing 11", "↑/↓ player  Enter info  r report  w save"),
    ("Reports", "j/k scroll"),
];

fn draw_help(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|(screen, keys)| {
            Line::from(vec![
                Span::styled(format!("{screen:<18}"), accent()),
                Span::raw(*keys),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::White).title(" Help ")),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(dim())
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(msg) = app.state.status_message.as_deref() {
        Line::styled(msg, Style::default().fg(Color::Yellow))
    } else if let Some(err) = app.state.last_error.as_deref() {
        Line::styled(err, Style::default().fg(Color::Red))
    } else {
        Line::styled(app.state.screen.title(), dim())
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    f.render_widget(
        TuiLoggerWidget::default()
            .block(default_border(Color::DarkGray).title(" Logs "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Cyan))
            .style_debug(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use chrono::NaiveDate;
    use cricxi_api::{CovMatrixToken, Fixture, Format, League, MatchDetails, Prediction, Side, SquadListing};
    use tui::backend::TestBackend;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, app, LoadingState::default());
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn loaded_app() -> App {
        let mut app = App::new(AppSettings::default());
        app.start();
        for c in "12072024".chars() {
            app.type_date_digit(c);
        }
        let side = |name: &str| Side {
            name: name.into(),
            squad: (0..11).map(|i| format!("{name} Player{i}")).collect(),
            second_squad: vec![],
        };
        app.on_squads_loaded(
            NaiveDate::from_ymd_opt(2024, 7, 12).unwrap(),
            SquadListing {
                leagues: vec![League {
                    name: "Zimbabwe T20I".into(),
                    matches: vec![Fixture {
                        key: "Zimbabwe_vs_Ireland_Harare".into(),
                        details: MatchDetails { format: Format::T20, sides: vec![side("Zimbabwe"), side("Ireland")] },
                    }],
                }],
            },
        );
        app
    }

    #[test]
    fn every_screen_renders_without_data() {
        let mut app = App::new(AppSettings::default());
        for screen in [
            Screen::Instructions,
            Screen::SelectMatch,
            Screen::PlayerSelection,
            Screen::Playing11,
            Screen::SwapPlayer,
            Screen::FinalPlaying11,
            Screen::TeamReport,
            Screen::PlayerInfo,
            Screen::Help,
        ] {
            app.state.screen = screen;
            render(&mut app);
        }
    }

    #[test]
    fn team_report_waits_only_while_analysis_is_pending() {
        let mut app = App::new(AppSettings::default());
        app.state.screen = Screen::TeamReport;
        assert!(render(&mut app).contains("No team analysis yet"));

        app.state.narrative.begin(&["A".to_string()]);
        assert!(render(&mut app).contains("Generating team analysis..."));
    }

    #[test]
    fn prediction_failure_shows_its_own_message() {
        let mut app = App::new(AppSettings::default());
        app.state.screen = Screen::Playing11;
        app.state.last_error = Some("No Data Available".into());
        app.state.prediction.error = Some("optimizer down".into());
        let text = render(&mut app);
        assert!(text.contains("optimizer down"));
        assert_eq!(text.matches("No Data Available").count(), 1);
    }

    #[test]
    fn match_screen_shows_carousels() {
        let mut app = loaded_app();
        let text = render(&mut app);
        assert!(text.contains("12/07/2024"));
        assert!(text.contains("Friday"));
        assert!(text.contains("Zimbabwe T20I"));
        assert!(text.contains("Harare"));
    }

    #[test]
    fn lineup_screen_shows_total_and_badges() {
        let mut app = loaded_app();
        app.confirm_match();
        app.on_aggregate_stats_loaded(Default::default());
        app.picker_auto_select();
        app.picker_commit();
        app.picker_auto_select();
        app.picker_commit();
        let lineup: Vec<String> = app.state.picker.team_a_names();
        app.on_team_predicted(Prediction {
            best_team: lineup.clone(),
            cov_matrix: CovMatrixToken::new("cov"),
            player_stats_raw: "[]".into(),
            player_stats: lineup
                .iter()
                .map(|p| cricxi_api::PlayerPoints { player: p.clone(), mean_points: 20.0, ..Default::default() })
                .collect(),
        });
        let text = render(&mut app);
        assert!(text.contains("Predicted Total Score: 220.00"));
        assert!(text.contains("(C)"));
        assert!(text.contains("(VC)"));

        app.open_swap();
        app.bench_move(1);
        let text = render(&mut app);
        assert!(text.contains("HOVER TO VIEW"));
    }
}
