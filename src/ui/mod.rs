mod export;
mod input;
mod notice;
mod stats;
mod week;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    widgets::Paragraph,
};

use crate::app::{App, NotificationLevel};

pub use export::render_export_modal;
pub use input::render_session_modal;
pub use notice::render_notice_modal;
pub use stats::render_stats;
pub use week::render_week;

const CATEGORY_PALETTE: [Color; 8] = [
    Color::Rgb(0xFF, 0x6B, 0x6B),
    Color::Rgb(0x4E, 0xCD, 0xC4),
    Color::Rgb(0x45, 0xB7, 0xD1),
    Color::Rgb(0x96, 0xCE, 0xB4),
    Color::Rgb(0xFF, 0xEA, 0xA7),
    Color::Rgb(0xDD, 0xA0, 0xDD),
    Color::Rgb(0xF4, 0xA2, 0x61),
    Color::Rgb(0xA8, 0xDA, 0xDC),
];

/// Stable color for a category name
pub fn category_color(name: &str) -> Color {
    // FNV-1a, so colors don't change between runs
    let hash = name
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    CATEGORY_PALETTE[(hash % CATEGORY_PALETTE.len() as u64) as usize]
}

/// Centered rectangle for a modal, shrunk to fit small terminals
pub fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let modal_width = width.min(area.width.saturating_sub(4));
    let modal_height = height.min(area.height.saturating_sub(4));
    let modal_x = area.x + (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = area.y + (area.height.saturating_sub(modal_height)) / 2;
    Rect::new(modal_x, modal_y, modal_width, modal_height)
}

/// Render the footer area with either a status message or navigation text
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App, nav_text: &str) {
    match app.notification {
        Some(ref n) if n.level == NotificationLevel::Info => {
            frame.render_widget(
                Paragraph::new(n.message.as_str())
                    .centered()
                    .style(Style::default().fg(Color::Green).bold()),
                area,
            );
        }
        _ => {
            frame.render_widget(Paragraph::new(nav_text).centered().dark_gray(), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color_is_stable() {
        assert_eq!(category_color("U15"), category_color("U15"));
        assert!(CATEGORY_PALETTE.contains(&category_color("")));
    }

    #[test]
    fn test_modal_area_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(modal_area(area, 50, 10), Rect::new(25, 15, 50, 10));

        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(modal_area(small, 50, 20), Rect::new(2, 2, 26, 6));
    }
}
