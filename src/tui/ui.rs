//! UI rendering for the inspector.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::register::Radix;
use super::app::{InspectorApp, ROW_BITS};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &InspectorApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    // Left side: bits, values, input and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(chunks[0]);

    draw_bits(frame, left_chunks[0], app);
    draw_values(frame, left_chunks[1], app);
    draw_input(frame, left_chunks[2], app);
    draw_status(frame, left_chunks[3], app);
    draw_help(frame, left_chunks[4]);

    draw_transcript(frame, chunks[1], app);
}

/// Draw the bit grid, MSB top-left, one nibble per group.
fn draw_bits(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let reg = app.session.register();
    let mut lines = Vec::new();

    for row in 0..(64 / ROW_BITS) {
        let top = 63 - row * ROW_BITS;
        let bottom = top + 1 - ROW_BITS;

        let mut cells = vec![
            Span::styled(format!("{:>2}..{:<2}  ", top, bottom), Style::default().fg(Color::DarkGray)),
        ];

        for bit in (bottom..=top).rev() {
            let on = reg.get_bit(bit).unwrap_or(false);
            let mut style = if on {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if bit == app.cursor {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            cells.push(Span::styled(if on { "1" } else { "0" }, style));
            cells.push(Span::raw(if bit % 4 == 0 { "  " } else { " " }));
        }

        lines.push(Line::from(cells));
    }

    let title = format!(" Bits (cursor: {}) ", app.cursor);
    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(paragraph, area);
}

/// Draw the value in every radix.
fn draw_values(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let reg = app.session.register();

    let content: Vec<Line> = Radix::ALL
        .iter()
        .map(|radix| {
            Line::from(vec![
                Span::raw(format!("{}: ", radix)),
                Span::styled(reg.render(*radix), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Value ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw the input line.
fn draw_input(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let input = Paragraph::new(format!("> {}_", app.input))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default()
            .title(" Input ")
            .borders(Borders::ALL));

    frame.render_widget(input, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw the transcript, newest at the bottom.
fn draw_transcript(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let visible_rows = (area.height as usize).saturating_sub(2);
    let transcript = app.session.transcript();
    let start = transcript.len().saturating_sub(visible_rows);

    let items: Vec<ListItem> = transcript[start..]
        .iter()
        .map(|entry| {
            let text = entry.to_string();
            let style = if text.starts_with("<<<") {
                Style::default().fg(Color::Cyan)
            } else if text.starts_with(">>> error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Transcript ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(list, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("←→↑↓: Move cursor  Tab: Toggle bit  Enter: Run  Esc: Quit"),
        Line::from("zero|one|toggle|extract <lo> <hi>  shl|shr <n>  bit <i> [on|off]"),
        Line::from("all0  all1  invert  hex|dec|oct|bin <v>  clear  <expr>"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}
