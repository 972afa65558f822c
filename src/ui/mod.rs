//! Terminal UI: form, results panel, schedule table, status line.

use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel, field_enabled};
use crate::mortgage::format_money;

/// Label column width inside the form.
const LABEL_WIDTH: usize = 16;

/// Fixed rows above and beside the schedule table: title (1), form block
/// (7), results block (5), status line (1), plus the schedule block's own
/// borders and header (3).
const CHROME_ROWS: u16 = 17;

/// Schedule rows visible at a given terminal height.
pub const fn schedule_view_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

/// Render the complete UI.
pub fn view(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(7), // form
            Constraint::Length(5), // results
            Constraint::Min(3),    // schedule
            Constraint::Length(1), // status
        ])
        .split(area);

    render_title(model, frame, chunks[0]);
    render_form(model, frame, chunks[1]);
    render_results(model, frame, chunks[2]);
    render_schedule(model, frame, chunks[3]);
    render_status(model, frame, chunks[4]);
}

fn render_title(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = if model.installment {
        "installment"
    } else {
        "credit"
    };
    let title = Paragraph::new(format!(" amort — mortgage calculator  [{mode}]"))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(title, area);
}

fn render_form(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Terms ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(5);
    for (idx, field) in model.form.fields().iter().enumerate() {
        let focused = idx == model.form.focus();
        let enabled = field_enabled(field, model.installment);

        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = format!("{:<LABEL_WIDTH$}", field.label);

        let value: Span = if enabled {
            Span::raw(field.buffer.text().to_string())
        } else {
            Span::styled("0 (installment)", Style::default().fg(Color::DarkGray))
        };

        lines.push(Line::from(vec![Span::styled(label, label_style), value]));
    }
    lines.push(Line::from(Span::styled(
        "Ctrl+T switches credit/installment",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    // Place the terminal caret inside the focused field.
    let focused = model.form.focused();
    if field_enabled(focused, model.installment) {
        let row = model.form.focus();
        if (row as u16) < inner.height {
            let prefix = &focused.buffer.text()[..focused.buffer.cursor()];
            let x = inner.x + LABEL_WIDTH as u16 + prefix.width() as u16;
            let y = inner.y + row as u16;
            if x < inner.x + inner.width {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}

fn render_results(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Result ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = if let Some(error) = &model.error {
        vec![Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))]
    } else if let Some(summary) = &model.summary {
        vec![
            result_line("Monthly payment", format_money(summary.monthly_payment)),
            result_line("Total paid", format_money(summary.total_paid)),
            result_line(
                "Overpayment",
                format!(
                    "{}  ({}%)",
                    format_money(summary.overpayment),
                    summary.overpayment_percent
                ),
            ),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Fill in the terms and press Enter",
            Style::default().fg(Color::DarkGray),
        ))]
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

fn result_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<LABEL_WIDTH$}")),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn render_schedule(model: &Model, frame: &mut Frame, area: Rect) {
    let total = model.schedule.len();
    let view_rows = schedule_view_rows(model.size.1).max(1);
    let start = model.schedule_offset.min(total.saturating_sub(1));
    let end = (start + view_rows).min(total);

    let title = if total == 0 {
        " Schedule ".to_string()
    } else {
        format!(" Schedule {}–{} of {} ", start + 1, end, total)
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let header = Row::new(["Month", "Payment", "Interest", "Principal", "Balance"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = model.schedule[start..end].iter().map(|row| {
        Row::new([
            row.month.to_string(),
            format_money(row.payment),
            format_money(row.interest),
            format_money(row.principal),
            format_money(row.balance),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn render_status(model: &Model, frame: &mut Frame, area: Rect) {
    if let Some(toast) = &model.toast {
        let (prefix, style) = match toast.level {
            ToastLevel::Info => (
                "[info]",
                Style::default().bg(Color::DarkGray).fg(Color::White),
            ),
            ToastLevel::Warning => (
                "[warn]",
                Style::default().bg(Color::Yellow).fg(Color::Black),
            ),
            ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
        };
        let bar = Paragraph::new(format!(" {} {}", prefix, toast.text)).style(style);
        frame.render_widget(bar, area);
        return;
    }

    let status = Paragraph::new(
        " Tab: next field  Enter: calculate  Ctrl+E: export CSV  PgUp/PgDn: schedule  Esc: quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status, area);
}
