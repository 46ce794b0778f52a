use crate::model::Record;
use crate::ui::layout::{ColumnMetrics, DialogLayout};
use crate::ui::state::{Focus, Session};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
const COUNT_COLOR: Color = BRAND_GREEN;
const FOCUS_COLOR: Color = BRAND_ORANGE;

const PROMPT: &str = "> ";
const HELP: &str = "Enter accept | Esc cancel | Tab focus | Space next | ←→ scroll";

pub fn draw<R: Record>(
    frame: &mut Frame,
    session: &Session<'_, R>,
    metrics: &ColumnMetrics,
    layout: &DialogLayout,
    title: &str,
) {
    frame.render_widget(Clear, layout.dialog);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(HEADER_STYLE)
        .borders(Borders::ALL);
    frame.render_widget(block, layout.dialog);

    draw_query(frame, layout.query, session);
    draw_header(frame, layout.header, session, metrics);
    draw_rows(frame, layout, session, metrics);
    draw_status(frame, layout.status, session);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    }
}

fn draw_query<R: Record>(frame: &mut Frame, area: Rect, session: &Session<'_, R>) {
    let is_focused = session.focus() == Focus::Query;

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(BRAND_MUTED)),
        Span::raw(session.query()),
    ]);
    let query = Paragraph::new(line).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(border_style(is_focused)),
    );
    frame.render_widget(query, area);

    if is_focused && area.width > 2 && area.height > 2 {
        let typed = (PROMPT.width() + session.query().width()) as u16;
        let x = (area.x + 1 + typed).min(area.right() - 2);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn draw_header<R: Record>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<'_, R>,
    metrics: &ColumnMetrics,
) {
    let cells: Vec<String> = session.columns().names().to_vec();
    let text = join_cells(&cells, metrics.widths());
    let header = Paragraph::new(Line::from(text))
        .style(HEADER_STYLE)
        .scroll((0, session.h_offset()));
    frame.render_widget(header, area);
}

fn draw_rows<R: Record>(
    frame: &mut Frame,
    layout: &DialogLayout,
    session: &Session<'_, R>,
    metrics: &ColumnMetrics,
) {
    let area = layout.rows;
    let view = session.view();

    if view.is_empty() {
        let empty = Paragraph::new("No matching rows").style(
            Style::default()
                .fg(BRAND_MUTED)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(empty, area);
        return;
    }

    let visible_rows = layout.visible_rows();
    let offset = session.offset();
    let line_width = usize::from(area.width) + usize::from(session.h_offset());
    let is_focused = session.focus() == Focus::Grid;

    let lines: Vec<Line> = view
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(row, &index)| {
            let cells = session.columns().cells(&session.records()[index]);
            let mut text = join_cells(&cells, metrics.widths());
            let width = text.width();
            if width < line_width {
                text.push_str(&" ".repeat(line_width - width));
            }

            let mut style = if session.is_selected(row) {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            if is_focused && session.cursor() == Some(row) {
                style = style.patch(CURSOR_STYLE);
            }
            Line::styled(text, style)
        })
        .collect();

    let rows = Paragraph::new(lines).scroll((0, session.h_offset()));
    frame.render_widget(rows, area);

    // Draw scrollbar if needed
    if view.len() > visible_rows && layout.scrollbar.width > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state =
            ScrollbarState::new(view.len()).position(session.cursor().unwrap_or(0));
        frame.render_stateful_widget(scrollbar, layout.scrollbar, &mut scrollbar_state);
    }
}

fn draw_status<R: Record>(frame: &mut Frame, area: Rect, session: &Session<'_, R>) {
    let status = Line::from(vec![
        Span::styled(
            format!("{}/{}", session.view().len(), session.records().len()),
            Style::default().fg(COUNT_COLOR),
        ),
        Span::raw(" rows | "),
        Span::styled(
            format!("{}", session.selected().len()),
            Style::default().fg(COUNT_COLOR),
        ),
        Span::raw(" selected | "),
        Span::styled(HELP, Style::default().fg(BRAND_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

/// Lay cells out side by side, each padded (or cut) to its column width.
fn join_cells(cells: &[String], widths: &[u16]) -> String {
    let mut line = String::new();
    for (cell, &width) in cells.iter().zip(widths) {
        line.push_str(&fit(cell, usize::from(width)));
    }
    line
}

fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fit_pads_and_cuts_by_display_width() {
        assert_eq!(fit("Wall", 6), "Wall  ");
        assert_eq!(fit("Basic Wall", 5), "Basic");
        assert_eq!(fit("階層", 3), "階 ");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn join_cells_lays_columns_side_by_side() {
        let cells = vec!["Door-B".to_string(), "Doors".to_string()];
        assert_eq!(join_cells(&cells, &[8, 7]), "Door-B  Doors  ");
    }
}
