//! Geometry of the week grid.
//!
//! The grid has one column per weekday and one row per half-hour slot of
//! business hours. Every slot scrolled into view maps to exactly one cell
//! rectangle, and a session maps to a rectangle whose height is proportional
//! to its length.
//! Overlapping sessions get overlapping rectangles; whichever is drawn last
//! is the one visible.

use chrono::{NaiveDate, NaiveTime, Timelike};
use ratatui::layout::Rect;

use crate::config::{DAY_END_HOUR, DAY_START_HOUR, SLOT_MINUTES};
use crate::models::Session;

/// Width of the time label column on the left
pub const TIME_COLUMN_WIDTH: u16 = 6;
/// Height of the weekday header row
pub const HEADER_HEIGHT: u16 = 2;

const DAYS: u16 = 7;

/// Number of half-hour rows between opening and closing time
pub const fn slot_count() -> u16 {
    ((DAY_END_HOUR - DAY_START_HOUR) * 60 / SLOT_MINUTES) as u16
}

fn minutes_since_open(time: NaiveTime) -> i64 {
    i64::from(time.hour() * 60 + time.minute()) - i64::from(DAY_START_HOUR * 60)
}

/// Wall-clock time at which a slot starts
pub fn slot_start(slot: u16) -> Option<NaiveTime> {
    if slot >= slot_count() {
        return None;
    }
    let minutes = DAY_START_HOUR * 60 + u32::from(slot) * SLOT_MINUTES;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// The slot containing `time`, if it falls within business hours
pub fn slot_of(time: NaiveTime) -> Option<u16> {
    let offset = minutes_since_open(time);
    if offset < 0 {
        return None;
    }
    let slot = offset / i64::from(SLOT_MINUTES);
    (slot < i64::from(slot_count())).then_some(slot as u16)
}

/// Closing time of the grid
pub fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(DAY_END_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Slots a session occupies in the week starting on `monday`.
///
/// Returns `(day, first_slot, slot_rows)`. The session is clipped to
/// business hours and always at least one slot tall. Sessions outside the
/// week or entirely outside business hours occupy nothing.
pub fn session_slots(session: &Session, monday: NaiveDate) -> Option<(u16, u16, u16)> {
    let day = (session.date - monday).num_days();
    if !(0..i64::from(DAYS)).contains(&day) {
        return None;
    }

    let slot_minutes = i64::from(SLOT_MINUTES);
    let total = i64::from(slot_count()) * slot_minutes;
    let start = minutes_since_open(session.start_time).max(0);
    let end = minutes_since_open(session.end_time).min(total);
    if start >= total || end <= 0 || end <= start {
        return None;
    }

    let first = start / slot_minutes;
    let last = (end + slot_minutes - 1) / slot_minutes;
    Some((day as u16, first as u16, (last - first).max(1) as u16))
}

/// Whether a session covers the given (day, slot) cell
pub fn covers(session: &Session, monday: NaiveDate, day: u16, slot: u16) -> bool {
    session_slots(session, monday)
        .is_some_and(|(d, first, rows)| d == day && (first..first + rows).contains(&slot))
}

/// Cell layout of the grid inside a terminal area.
///
/// When the area is too short for every slot, only `visible_slots` rows
/// starting at `first_slot` are laid out; the rest have no rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub area: Rect,
    pub day_width: u16,
    pub slot_height: u16,
    pub first_slot: u16,
    pub visible_slots: u16,
}

impl SlotGrid {
    pub fn new(area: Rect) -> Self {
        let day_width = area.width.saturating_sub(TIME_COLUMN_WIDTH) / DAYS;
        let rows = area.height.saturating_sub(HEADER_HEIGHT);
        let slot_height = (rows / slot_count()).max(1);
        Self {
            area,
            day_width,
            slot_height,
            first_slot: 0,
            visible_slots: (rows / slot_height).min(slot_count()),
        }
    }

    /// Scroll so that `slot` is visible, moving as little as possible from
    /// `previous_first`
    pub fn scrolled_to(mut self, slot: u16, previous_first: u16) -> Self {
        let max_first = slot_count() - self.visible_slots;
        let mut first = previous_first.min(slot);
        if self.visible_slots > 0 && slot >= first + self.visible_slots {
            first = slot + 1 - self.visible_slots;
        }
        self.first_slot = first.min(max_first);
        self
    }

    fn is_visible(&self, slot: u16) -> bool {
        (self.first_slot..self.first_slot + self.visible_slots).contains(&slot)
    }

    fn column_x(&self, day: u16) -> u16 {
        self.area.x + TIME_COLUMN_WIDTH + day * self.day_width
    }

    /// Top row of a visible slot
    fn row_y(&self, slot: u16) -> u16 {
        self.area.y + HEADER_HEIGHT + (slot - self.first_slot) * self.slot_height
    }

    /// Header cell for a weekday column
    pub fn header_rect(&self, day: u16) -> Rect {
        Rect::new(self.column_x(day), self.area.y, self.day_width, HEADER_HEIGHT)
    }

    /// Time label cell for a slot row, if the row is scrolled into view
    pub fn label_rect(&self, slot: u16) -> Option<Rect> {
        self.is_visible(slot).then(|| {
            Rect::new(self.area.x, self.row_y(slot), TIME_COLUMN_WIDTH, self.slot_height)
        })
    }

    /// Cell rectangle of one (day, slot) pair, if the row is scrolled into view
    pub fn slot_rect(&self, day: u16, slot: u16) -> Option<Rect> {
        self.is_visible(slot).then(|| {
            Rect::new(
                self.column_x(day),
                self.row_y(slot),
                self.day_width.saturating_sub(1),
                self.slot_height,
            )
        })
    }

    /// Map a terminal position back to the (day, slot) under it
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        let left = self.area.x + TIME_COLUMN_WIDTH;
        let top = self.area.y + HEADER_HEIGHT;
        if x < left || y < top || x >= self.area.right() || y >= self.area.bottom() {
            return None;
        }
        if self.day_width == 0 {
            return None;
        }
        let day = (x - left) / self.day_width;
        let row = (y - top) / self.slot_height;
        (day < DAYS && row < self.visible_slots).then_some((day, self.first_slot + row))
    }

    /// Visible part of a session in the week starting on `monday`
    pub fn session_rect(&self, session: &Session, monday: NaiveDate) -> Option<Rect> {
        let (day, first, rows) = session_slots(session, monday)?;
        let top = first.max(self.first_slot);
        let bottom = (first + rows).min(self.first_slot + self.visible_slots);
        if top >= bottom {
            return None;
        }
        let cell = self.slot_rect(day, top)?;
        Some(Rect::new(cell.x, cell.y, cell.width, (bottom - top) * self.slot_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn grid() -> SlotGrid {
        // 6 label columns + 7 days of 10 cells; 2 header rows + 28 slots
        SlotGrid::new(Rect::new(0, 0, 76, 30))
    }

    #[test]
    fn test_slot_count_covers_business_hours() {
        assert_eq!(slot_count(), 28);
        assert_eq!(slot_start(0), Some(t(8, 0)));
        assert_eq!(slot_start(1), Some(t(8, 30)));
        assert_eq!(slot_start(27), Some(t(21, 30)));
        assert_eq!(slot_start(28), None);
    }

    #[test]
    fn test_slot_of() {
        assert_eq!(slot_of(t(8, 0)), Some(0));
        assert_eq!(slot_of(t(8, 29)), Some(0));
        assert_eq!(slot_of(t(18, 0)), Some(20));
        assert_eq!(slot_of(t(21, 59)), Some(27));
        assert_eq!(slot_of(t(7, 59)), None);
        assert_eq!(slot_of(t(22, 0)), None);
    }

    #[test]
    fn test_layout_dimensions() {
        let g = grid();
        assert_eq!(g.day_width, 10);
        assert_eq!(g.slot_height, 1);
        assert_eq!(g.visible_slots, 28);
        assert_eq!(g.slot_rect(0, 0), Some(Rect::new(6, 2, 9, 1)));
        assert_eq!(g.slot_rect(6, 27), Some(Rect::new(66, 29, 9, 1)));
    }

    #[test]
    fn test_slot_height_grows_with_area() {
        let g = SlotGrid::new(Rect::new(0, 0, 76, 2 + 28 * 2));
        assert_eq!(g.slot_height, 2);
        assert_eq!(g.slot_rect(0, 1), Some(Rect::new(6, 4, 9, 2)));
    }

    #[test]
    fn test_hit_test_inverts_slot_rect() {
        let g = grid();
        for day in 0..7 {
            for slot in 0..slot_count() {
                let rect = g.slot_rect(day, slot).unwrap();
                assert_eq!(g.hit_test(rect.x, rect.y), Some((day, slot)));
            }
        }
    }

    #[test]
    fn test_hit_test_outside_grid() {
        let g = grid();
        assert_eq!(g.hit_test(2, 10), None); // time labels
        assert_eq!(g.hit_test(20, 1), None); // header
        assert_eq!(g.hit_test(20, 30), None); // below last slot
        assert_eq!(g.hit_test(76, 10), None); // right of Sunday
    }

    #[test]
    fn test_hit_test_stays_inside_short_area() {
        // Room for 8 of the 28 slots
        let g = SlotGrid::new(Rect::new(0, 3, 76, 10));
        assert_eq!(g.visible_slots, 8);
        assert_eq!(g.hit_test(36, 12), Some((3, 7)));
        assert_eq!(g.hit_test(36, 13), None);
        assert_eq!(g.hit_test(36, 14), None);
        assert_eq!(g.slot_rect(3, 8), None);
    }

    #[test]
    fn test_scroll_keeps_slot_visible() {
        let g = SlotGrid::new(Rect::new(0, 0, 76, 12)).scrolled_to(20, 0);
        assert_eq!(g.first_slot, 11);
        assert_eq!(g.slot_rect(0, 20), Some(Rect::new(6, 11, 9, 1)));
        assert_eq!(g.slot_rect(0, 10), None);
        assert_eq!(g.hit_test(6, 11), Some((0, 20)));
        assert_eq!(g.hit_test(6, 2), Some((0, 11)));

        // Moving back up only scrolls once the slot leaves the top
        let up = g.scrolled_to(15, g.first_slot);
        assert_eq!(up.first_slot, 11);
        let up = g.scrolled_to(3, g.first_slot);
        assert_eq!(up.first_slot, 3);

        // Never scrolls past the last slot
        let end = g.scrolled_to(27, 0);
        assert_eq!(end.first_slot, 18);
        assert!(end.slot_rect(0, 27).is_some());

        for slot in 0..slot_count() {
            let g = g.scrolled_to(slot, g.first_slot);
            let rect = g.slot_rect(2, slot).unwrap();
            assert_eq!(g.hit_test(rect.x, rect.y), Some((2, slot)));
        }
    }

    #[test]
    fn test_session_rect_cut_at_scroll_edge() {
        let monday = d(2025, 4, 7);
        let g = SlotGrid::new(Rect::new(0, 0, 76, 12)).scrolled_to(20, 0);
        // 10:00-12:00 covers slots 4..8, first visible slot is 11
        let hidden = Session::new("U15", "", monday, t(10, 0), t(12, 0)).unwrap();
        assert_eq!(g.session_rect(&hidden, monday), None);
        // 13:00-14:00 covers slots 10..12, one of them visible
        let straddle = Session::new("U15", "", monday, t(13, 0), t(14, 0)).unwrap();
        assert_eq!(g.session_rect(&straddle, monday), Some(Rect::new(6, 2, 9, 1)));
    }

    #[test]
    fn test_session_rect_position_and_height() {
        let g = grid();
        let monday = d(2025, 4, 7);
        let session =
            Session::new("U15", "", d(2025, 4, 9), t(18, 0), t(19, 30)).unwrap();

        let rect = g.session_rect(&session, monday).unwrap();
        assert_eq!(rect, Rect::new(26, 22, 9, 3));
    }

    #[test]
    fn test_session_rect_rounds_partial_slots_up() {
        let g = grid();
        let monday = d(2025, 4, 7);
        let short = Session::new("U15", "", monday, t(9, 10), t(9, 20)).unwrap();
        assert_eq!(g.session_rect(&short, monday).unwrap().height, 1);

        let straddle = Session::new("U15", "", monday, t(9, 15), t(10, 15)).unwrap();
        assert_eq!(g.session_rect(&straddle, monday).unwrap().height, 3);
    }

    #[test]
    fn test_session_rect_clipped_to_business_hours() {
        let g = grid();
        let monday = d(2025, 4, 7);

        let early = Session::new("U15", "", monday, t(7, 0), t(9, 0)).unwrap();
        assert_eq!(g.session_rect(&early, monday), Some(Rect::new(6, 2, 9, 2)));

        let late = Session::new("U15", "", monday, t(21, 0), t(23, 0)).unwrap();
        assert_eq!(g.session_rect(&late, monday), Some(Rect::new(6, 28, 9, 2)));

        let night = Session::new("U15", "", monday, t(22, 0), t(23, 0)).unwrap();
        assert_eq!(g.session_rect(&night, monday), None);

        let dawn = Session::new("U15", "", monday, t(6, 0), t(8, 0)).unwrap();
        assert_eq!(g.session_rect(&dawn, monday), None);
    }

    #[test]
    fn test_covers() {
        let monday = d(2025, 4, 7);
        let session = Session::new("U15", "", d(2025, 4, 9), t(18, 0), t(19, 30)).unwrap();
        assert_eq!(session_slots(&session, monday), Some((2, 20, 3)));
        assert!(covers(&session, monday, 2, 20));
        assert!(covers(&session, monday, 2, 22));
        assert!(!covers(&session, monday, 2, 23));
        assert!(!covers(&session, monday, 2, 19));
        assert!(!covers(&session, monday, 1, 20));
    }

    #[test]
    fn test_session_rect_outside_week() {
        let g = grid();
        let monday = d(2025, 4, 7);
        let next_monday = Session::new("U15", "", d(2025, 4, 14), t(18, 0), t(19, 0)).unwrap();
        let sunday_before = Session::new("U15", "", d(2025, 4, 6), t(18, 0), t(19, 0)).unwrap();
        assert_eq!(g.session_rect(&next_monday, monday), None);
        assert_eq!(g.session_rect(&sunday_before, monday), None);
    }
}
