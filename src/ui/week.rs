use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::calendar::{iso_week_label, week_dates, week_of};
use crate::grid::{SlotGrid, slot_count, slot_start};
use crate::ui::{self, category_color};

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render the week calendar
pub fn render_week(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(1),    // Grid
        Constraint::Length(2), // Controls
        Constraint::Length(1), // Footer
    ])
    .split(area);

    // Title
    let (monday, sunday) = week_of(app.week.anchor);
    let title = Line::from(format!(
        "{}  ({} - {})",
        iso_week_label(monday),
        monday.format("%d/%m"),
        sunday.format("%d/%m/%Y")
    ))
    .bold()
    .blue()
    .centered();
    frame.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Keep the previous scroll position unless the cursor left the view
    let previous_first = app.week.grid.map_or(0, |g| g.first_slot);
    let grid = SlotGrid::new(chunks[1]).scrolled_to(app.week.cursor_slot, previous_first);
    app.week.grid = Some(grid);
    render_grid(frame, &grid, app);

    // Controls
    let controls = "[←↑↓→] Move  [Enter] Open  [n] New  [d] Delete  [[/]] Week  [t] Today";
    frame.render_widget(
        Paragraph::new(controls)
            .centered()
            .dark_gray()
            .block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );

    ui::render_footer(frame, chunks[3], app, "[s] Stats  [x] Export PDF  [q] Quit");
}

/// Part of `rect` inside the grid area; tiny terminals cut off headers and cells
fn clip(grid: &SlotGrid, rect: Rect) -> Option<Rect> {
    let clipped = rect.intersection(grid.area);
    (!clipped.is_empty()).then_some(clipped)
}

fn render_grid(frame: &mut Frame, grid: &SlotGrid, app: &App) {
    let monday = app.week.monday();
    let today = app.today();

    // Weekday headers
    for (day, (name, date)) in DAY_NAMES.iter().zip(week_dates(monday)).enumerate() {
        let style = if date == today {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().bold()
        };
        let header = vec![
            Line::from(*name).style(style),
            Line::from(date.format("%d/%m").to_string()).dark_gray(),
        ];
        if let Some(rect) = clip(grid, grid.header_rect(day as u16)) {
            frame.render_widget(Paragraph::new(header).centered(), rect);
        }
    }

    // Time labels on the hour, empty slots everywhere
    for slot in 0..slot_count() {
        let label_rect = grid.label_rect(slot).and_then(|r| clip(grid, r));
        if let (Some(time), Some(rect)) = (slot_start(slot), label_rect) {
            let label = time.format("%H:%M").to_string();
            let label = if slot % 2 == 0 {
                Paragraph::new(label)
            } else {
                Paragraph::new(label).dark_gray()
            };
            frame.render_widget(label, rect);
        }

        for day in 0..7 {
            let Some(rect) = grid.slot_rect(day, slot).and_then(|r| clip(grid, r)) else {
                continue;
            };
            let shade = if slot % 2 == 0 {
                Color::Rgb(0x26, 0x26, 0x26)
            } else {
                Color::Rgb(0x1E, 0x1E, 0x1E)
            };
            frame.render_widget(Block::default().style(Style::default().bg(shade)), rect);
        }
    }

    // Sessions, in store order; overlapping ones simply paint over each other
    for session in &app.week.sessions {
        let Some(rect) = grid
            .session_rect(session, monday)
            .and_then(|r| clip(grid, r))
        else {
            continue;
        };
        let color = category_color(&session.category);
        let text = vec![
            Line::from(format!("{} {}", session.start_time.format("%H:%M"), session.category))
                .bold(),
            Line::from(session.description.as_str()),
            Line::from(session.format_duration()).italic(),
        ];
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Black).bg(color)),
            rect,
        );
    }

    // Cursor drawn last so it stays visible on top of sessions
    let cursor = grid
        .slot_rect(app.week.cursor_day, app.week.cursor_slot)
        .and_then(|c| clip(grid, Rect::new(c.x, c.y, 1, c.height)));
    if let Some(rect) = cursor {
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Cyan)),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::db::{Database, ScheduleStore};
    use crate::models::Session;
    use chrono::{NaiveDate, NaiveTime};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_session() -> App {
        let day = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let db = Database::open_in_memory().unwrap();
        db.add(
            Session::new(
                "U15",
                "Physical work",
                day,
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            )
            .unwrap(),
        )
        .unwrap();
        let clock = FixedClock(day.and_hms_opt(9, 0, 0).unwrap());
        App::new(Box::new(db), Box::new(clock))
    }

    #[test]
    fn test_render_week_shows_header_and_session() {
        let mut app = app_with_session();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| render_week(frame, frame.area(), &mut app))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Week 15, 2025"));
        assert!(text.contains("18:00 U15"));
        assert!(app.week.grid.is_some());
    }

    #[test]
    fn test_render_week_scrolls_to_cursor_on_short_terminal() {
        let mut app = app_with_session();
        app.week.cursor_day = 0;
        app.week.cursor_slot = 20;
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render_week(frame, frame.area(), &mut app))
            .unwrap();

        let grid = app.week.grid.unwrap();
        assert!(grid.visible_slots < slot_count());
        assert!(grid.slot_rect(0, 20).is_some());
        assert!(buffer_text(&terminal).contains("18:00 U15"));
    }

    #[test]
    fn test_render_week_on_tiny_terminal() {
        let mut app = app_with_session();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal
            .draw(|frame| render_week(frame, frame.area(), &mut app))
            .unwrap();
    }
}
