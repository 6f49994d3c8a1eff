use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::CategoryStat;
use crate::ui::{self, category_color};

/// Format minutes as "Xh Ym" or "Xm"
fn format_minutes(total: i64) -> String {
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Render the statistics view
pub fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(1), // Month selector
        Constraint::Min(1),    // Chart area
        Constraint::Length(3), // Summary
        Constraint::Length(2), // Controls
        Constraint::Length(1), // Footer
    ])
    .split(area);

    // Title
    let title = Line::from("Training Time by Category").bold().blue().centered();
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Month selector
    let month_label = NaiveDate::from_ymd_opt(app.stats.year, app.stats.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    let selector = Line::from(vec![
        Span::styled("< ", Style::default().dark_gray()),
        Span::styled(month_label, Style::default().bold().cyan()),
        Span::styled(" >", Style::default().dark_gray()),
    ]);
    frame.render_widget(Paragraph::new(selector).centered(), chunks[1]);

    // Chart area - bar chart and legend side by side
    let chart_chunks = Layout::horizontal([
        Constraint::Percentage(60), // Bar chart
        Constraint::Percentage(40), // Legend
    ])
    .split(chunks[2]);

    render_bar_chart(frame, chart_chunks[0], &app.stats.stats);
    render_legend(frame, chart_chunks[1], &app.stats.stats);

    // Summary stats
    let total_minutes: i64 = app.stats.stats.iter().map(|s| s.total_minutes).sum();
    let session_count: i64 = app.stats.stats.iter().map(|s| s.session_count).sum();
    let summary = format!(
        "Total: {}  |  Sessions: {}",
        format_minutes(total_minutes),
        session_count
    );
    frame.render_widget(
        Paragraph::new(summary)
            .centered()
            .block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );

    // Controls
    let controls = "[←/→ or h/l] Change Month";
    frame.render_widget(
        Paragraph::new(controls)
            .centered()
            .dark_gray()
            .block(Block::default().borders(Borders::TOP)),
        chunks[4],
    );

    // Footer / status
    ui::render_footer(frame, chunks[5], app, "[w] Week  [x] Export PDF  [q] Quit");
}

fn render_bar_chart(frame: &mut Frame, area: Rect, stats: &[CategoryStat]) {
    if stats.is_empty() {
        frame.render_widget(
            Paragraph::new("No sessions this month")
                .centered()
                .dark_gray(),
            area,
        );
        return;
    }

    let max_minutes = stats.iter().map(|s| s.total_minutes).max().unwrap_or(1);

    let bars: Vec<Bar> = stats
        .iter()
        .map(|stat| {
            Bar::default()
                .value(stat.total_minutes.max(0) as u64)
                .label(Line::from(stat.name.clone()))
                .text_value(format_minutes(stat.total_minutes))
                .style(Style::default().fg(category_color(&stat.name)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Planned Time"),
        )
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(max_minutes.max(1) as u64);

    frame.render_widget(chart, area);
}

fn render_legend(frame: &mut Frame, area: Rect, stats: &[CategoryStat]) {
    let total: i64 = stats.iter().map(|s| s.total_minutes).sum();
    if total == 0 {
        return;
    }

    let lines: Vec<Line> = stats
        .iter()
        .map(|stat| {
            let pct = (stat.total_minutes as f64 / total as f64) * 100.0;
            let color = category_color(&stat.name);
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(format!("{:<10}", stat.name), Style::default().fg(color)),
                Span::raw(format!(
                    "{:>8} {:>3}x ({:.0}%)",
                    format_minutes(stat.total_minutes),
                    stat.session_count,
                    pct
                )),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Breakdown")),
        area,
    );
}
