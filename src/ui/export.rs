use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, ExportField};
use crate::ui::modal_area;

/// Render the PDF export form as an overlay
pub fn render_export_modal(frame: &mut Frame, area: Rect, app: &App) {
    let modal_area = modal_area(area, 60, 13);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Export Month to PDF ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Year
        Constraint::Length(2), // Month
        Constraint::Length(2), // Category
        Constraint::Length(2), // Path
        Constraint::Length(1), // Spacer
        Constraint::Length(2), // Controls
    ])
    .split(inner);

    // Helper to render a form row
    let render_row = |field: ExportField, label: &str, value: &str, placeholder: &str| {
        let is_selected = app.export.field == field;
        let style = if is_selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default()
        };

        let value_span = match (value.is_empty(), is_selected) {
            (true, false) => Span::styled(placeholder.to_string(), Style::default().dark_gray()),
            (_, true) => Span::styled(format!("{}_", value), style),
            (false, false) => Span::styled(value.to_string(), style),
        };

        Line::from(vec![Span::styled(format!("{:<11}", label), style), value_span])
    };

    let export = &app.export;
    frame.render_widget(
        Paragraph::new(render_row(ExportField::Year, "Year:", &export.year, "")),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(render_row(ExportField::Month, "Month:", &export.month, "1-12")),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(render_row(
            ExportField::Category,
            "Category:",
            &export.category,
            "all",
        )),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(render_row(
            ExportField::Path,
            "File:",
            &export.path,
            "(default: documents folder)",
        )),
        chunks[3],
    );

    // Controls
    let controls = Line::from(vec![
        Span::styled("[Enter]", Style::default().bold()),
        Span::raw(" Export   "),
        Span::styled("[Tab/↑↓]", Style::default().bold()),
        Span::raw(" Navigate   "),
        Span::styled("[Esc]", Style::default().bold()),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(controls).centered().dark_gray(), chunks[5]);
}
