use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::modal_area;

/// Render the current error as a blocking dialog
pub fn render_notice_modal(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ref notification) = app.notification else {
        return;
    };

    let modal_area = modal_area(area, 50, 8);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    frame.render_widget(
        Paragraph::new(notification.message.as_str())
            .centered()
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Red).bold()),
        chunks[0],
    );

    let controls = Line::from(vec![
        Span::styled("[Enter]", Style::default().bold()),
        Span::raw(" OK"),
    ]);
    frame.render_widget(Paragraph::new(controls).centered().dark_gray(), chunks[1]);
}
