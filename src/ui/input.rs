use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, FormField};
use crate::ui::modal_area;

/// Render the session form as an overlay
pub fn render_session_modal(frame: &mut Frame, area: Rect, app: &App) {
    let modal_area = modal_area(area, 56, 19);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let title = if app.form.editing.is_some() {
        " Edit Session "
    } else {
        " New Session "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Category
        Constraint::Length(3), // Description
        Constraint::Length(3), // Date
        Constraint::Length(3), // Start / end
        Constraint::Length(1), // Hint
        Constraint::Length(2), // Controls
    ])
    .split(inner);

    let form = &app.form.form;
    let field_widget = |field: FormField, label: &'static str, value: &str| {
        let focused = app.form.field == field;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };
        Paragraph::new(text).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(style),
        )
    };

    frame.render_widget(
        field_widget(FormField::Category, "Category (←/→ to pick)", &form.category),
        chunks[0],
    );
    frame.render_widget(
        field_widget(FormField::Description, "Description", &form.description),
        chunks[1],
    );
    frame.render_widget(
        field_widget(FormField::Date, "Date (YYYY-MM-DD)", &form.date),
        chunks[2],
    );

    let times = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    frame.render_widget(
        field_widget(FormField::Start, "Start (HH:MM)", &form.start),
        times[0],
    );
    frame.render_widget(field_widget(FormField::End, "End (HH:MM)", &form.end), times[1]);

    if !app.categories.is_empty() {
        let known = format!("Known: {}", app.categories.join(", "));
        frame.render_widget(Paragraph::new(known).dark_gray(), chunks[4]);
    }

    // Controls
    let controls = Line::from(vec![
        Span::styled("[Enter]", Style::default().bold()),
        Span::raw(" Save   "),
        Span::styled("[Tab]", Style::default().bold()),
        Span::raw(" Next Field   "),
        Span::styled("[Esc]", Style::default().bold()),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(controls).centered().dark_gray(), chunks[5]);
}
