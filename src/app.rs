use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{error, warn};
use ratatui::{DefaultTerminal, Frame};

use crate::calendar::{month_bounds, shift_month, shift_weeks, week_dates, week_of};
use crate::clock::Clock;
use crate::config::{DEFAULT_SESSION_MINUTES, TICK_RATE, get_export_dir};
use crate::db::ScheduleStore;
use crate::error::{PlannerError, Result, ValidationError};
use crate::event::{AppEvent, poll_event};
use crate::export::{default_file_name, export_sessions_to_pdf, export_title};
use crate::grid::{self, SlotGrid};
use crate::models::{CategoryFilter, CategoryStat, Session, SessionId};
use crate::ui::{
    render_export_modal, render_notice_modal, render_session_modal, render_stats, render_week,
};
use crate::validation::{SessionForm, parse_year_month};

/// Ticks an informational status message stays in the footer
const STATUS_TICKS: u16 = 16;

/// The current view/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Week,
    Stats,
}

/// The current modal state - only one form can be open at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Session,
    Export,
}

/// Which input field is focused in the session form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Category,
    Description,
    Date,
    Start,
    End,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Category => FormField::Description,
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Start,
            FormField::Start => FormField::End,
            FormField::End => FormField::Category,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Category => FormField::End,
            FormField::Description => FormField::Category,
            FormField::Date => FormField::Description,
            FormField::Start => FormField::Date,
            FormField::End => FormField::Start,
        }
    }
}

/// Which field is focused in the export form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportField {
    #[default]
    Year,
    Month,
    Category,
    Path,
}

impl ExportField {
    pub fn next(&self) -> Self {
        match self {
            ExportField::Year => ExportField::Month,
            ExportField::Month => ExportField::Category,
            ExportField::Category => ExportField::Path,
            ExportField::Path => ExportField::Year,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ExportField::Year => ExportField::Path,
            ExportField::Month => ExportField::Year,
            ExportField::Category => ExportField::Month,
            ExportField::Path => ExportField::Category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A message for the user. Errors block input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Week view state
#[derive(Debug, Clone)]
pub struct WeekState {
    /// Any date inside the visible week
    pub anchor: NaiveDate,
    pub sessions: Vec<Session>,
    pub cursor_day: u16,
    pub cursor_slot: u16,
    /// Layout from the last render, for mouse hit-testing
    pub grid: Option<SlotGrid>,
}

impl WeekState {
    pub fn monday(&self) -> NaiveDate {
        week_of(self.anchor).0
    }

    /// The session drawn on top at a cell, if any
    pub fn session_at(&self, day: u16, slot: u16) -> Option<&Session> {
        let monday = self.monday();
        self.sessions
            .iter()
            .rev()
            .find(|s| grid::covers(s, monday, day, slot))
    }
}

/// Session form state
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub form: SessionForm,
    pub field: FormField,
    /// Set when editing an existing session
    pub editing: Option<SessionId>,
}

/// Export form state
#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub year: String,
    pub month: String,
    pub category: String,
    /// Blank means the default file in the export directory
    pub path: String,
    pub field: ExportField,
}

/// Statistics view state
#[derive(Debug, Clone)]
pub struct StatsState {
    pub year: i32,
    pub month: u32,
    pub stats: Vec<CategoryStat>,
}

/// The main application state
pub struct App {
    pub running: bool,
    pub view: View,
    pub modal: ModalState,
    pub week: WeekState,
    pub form: FormState,
    pub export: ExportState,
    pub stats: StatsState,
    pub categories: Vec<String>,
    pub notification: Option<Notification>,
    status_ticks: u16,
    store: Box<dyn ScheduleStore>,
    clock: Box<dyn Clock>,
}

impl App {
    /// Create the application around an opened store
    pub fn new(store: Box<dyn ScheduleStore>, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        let today = now.date();
        let mut app = Self {
            running: false,
            view: View::Week,
            modal: ModalState::None,
            week: WeekState {
                anchor: today,
                sessions: Vec::new(),
                cursor_day: today.weekday().num_days_from_monday() as u16,
                cursor_slot: grid::slot_of(now.time()).unwrap_or(0),
                grid: None,
            },
            form: FormState::default(),
            export: ExportState::default(),
            stats: StatsState {
                year: today.year(),
                month: today.month(),
                stats: Vec::new(),
            },
            categories: Vec::new(),
            notification: None,
            status_ticks: 0,
            store,
            clock,
        };
        app.refresh_data();
        app
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            if let Some(event) = poll_event(TICK_RATE)? {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Mouse(mouse) => self.handle_mouse_event(mouse),
                    AppEvent::Tick => self.handle_tick(),
                }
            }
        }

        Ok(())
    }

    /// Render the current view
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match self.view {
            View::Week => render_week(frame, area, self),
            View::Stats => render_stats(frame, area, self),
        }

        // Render modal on top if visible
        match self.modal {
            ModalState::None => {}
            ModalState::Session => render_session_modal(frame, area, self),
            ModalState::Export => render_export_modal(frame, area, self),
        }

        if self.has_blocking_notice() {
            render_notice_modal(frame, area, self);
        }
    }

    fn has_blocking_notice(&self) -> bool {
        self.notification
            .as_ref()
            .is_some_and(|n| n.level == NotificationLevel::Error)
    }

    fn notify_error(&mut self, err: &PlannerError) {
        if err.is_recoverable() {
            warn!("{}", err);
        } else {
            error!("{}", err);
        }
        self.notification = Some(Notification {
            level: NotificationLevel::Error,
            message: err.to_string(),
        });
    }

    fn notify_info(&mut self, message: String) {
        self.notification = Some(Notification {
            level: NotificationLevel::Info,
            message,
        });
        self.status_ticks = STATUS_TICKS;
    }

    /// Handle a key event
    fn handle_key_event(&mut self, key: KeyEvent) {
        // An error notice swallows input until dismissed
        if self.has_blocking_notice() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notification = None;
            }
            return;
        }

        match self.modal {
            ModalState::Session => {
                self.handle_session_modal_key(key);
                return;
            }
            ModalState::Export => {
                self.handle_export_modal_key(key);
                return;
            }
            ModalState::None => {}
        }

        // Global keys
        match (key.modifiers, key.code) {
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => self.quit(),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => self.quit(),
            (_, KeyCode::Char('w')) => self.view = View::Week,
            (_, KeyCode::Char('s')) if self.view != View::Stats => {
                self.view = View::Stats;
                let (year, month) = (self.week.anchor.year(), self.week.anchor.month());
                self.stats.year = year;
                self.stats.month = month;
                self.refresh_data();
            }
            (_, KeyCode::Char('x')) => self.open_export_form(),
            _ => match self.view {
                View::Week => self.handle_week_key(key),
                View::Stats => self.handle_stats_key(key),
            },
        }
    }

    /// Handle week view keys
    fn handle_week_key(&mut self, key: KeyEvent) {
        let last_slot = grid::slot_count() - 1;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.week.cursor_day = self.week.cursor_day.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.week.cursor_day = (self.week.cursor_day + 1).min(6);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.week.cursor_slot = self.week.cursor_slot.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.week.cursor_slot = (self.week.cursor_slot + 1).min(last_slot);
            }
            KeyCode::Char('[') => self.move_week(-1),
            KeyCode::Char(']') => self.move_week(1),
            KeyCode::Char('t') => {
                let now = self.clock.now();
                self.week.anchor = now.date();
                self.week.cursor_day = now.weekday().num_days_from_monday() as u16;
                self.week.cursor_slot = grid::slot_of(now.time()).unwrap_or(0);
                self.refresh_data();
            }
            KeyCode::Char('n') => self.open_new_form(self.week.cursor_day, self.week.cursor_slot),
            KeyCode::Enter => self.activate_cell(self.week.cursor_day, self.week.cursor_slot),
            KeyCode::Char('d') => self.delete_at(self.week.cursor_day, self.week.cursor_slot),
            _ => {}
        }
    }

    /// Handle stats view keys
    fn handle_stats_key(&mut self, key: KeyEvent) {
        let delta = match key.code {
            KeyCode::Left | KeyCode::Char('h') => -1,
            KeyCode::Right | KeyCode::Char('l') => 1,
            _ => return,
        };
        let (year, month) = shift_month(self.stats.year, self.stats.month, delta);
        self.stats.year = year;
        self.stats.month = month;
        self.refresh_data();
    }

    /// Handle a mouse click on the week grid
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.has_blocking_notice() || self.modal != ModalState::None || self.view != View::Week
        {
            return;
        }
        let Some((day, slot)) = self
            .week
            .grid
            .and_then(|g| g.hit_test(mouse.column, mouse.row))
        else {
            return;
        };

        self.week.cursor_day = day;
        self.week.cursor_slot = slot;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.activate_cell(day, slot),
            MouseEventKind::Down(MouseButton::Right) => self.delete_at(day, slot),
            _ => {}
        }
    }

    fn move_week(&mut self, weeks: i64) {
        self.week.anchor = shift_weeks(self.week.anchor, weeks);
        self.refresh_data();
    }

    /// Edit the session in a cell, or start a new one if the cell is empty
    fn activate_cell(&mut self, day: u16, slot: u16) {
        let Some(id) = self.week.session_at(day, slot).and_then(|s| s.id) else {
            self.open_new_form(day, slot);
            return;
        };

        // The copy on screen may be stale
        match self.store.get(id) {
            Ok(Some(session)) => self.open_edit_form(&session),
            Ok(None) => {
                self.notify_error(&PlannerError::NotFound(id));
                self.refresh_data();
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn open_new_form(&mut self, day: u16, slot: u16) {
        let Some(start) = grid::slot_start(slot) else {
            return;
        };
        let date = week_dates(self.week.anchor)[usize::from(day.min(6))];
        let end = (start + TimeDelta::minutes(DEFAULT_SESSION_MINUTES)).min(grid::day_end());

        self.form = FormState {
            form: SessionForm::for_slot(date, start, end),
            field: FormField::Category,
            editing: None,
        };
        self.modal = ModalState::Session;
    }

    fn open_edit_form(&mut self, session: &Session) {
        self.form = FormState {
            form: SessionForm::from_session(session),
            field: FormField::Category,
            editing: session.id,
        };
        self.modal = ModalState::Session;
    }

    fn open_export_form(&mut self) {
        let anchor = self.week.anchor;
        self.export = ExportState {
            year: anchor.year().to_string(),
            month: anchor.month().to_string(),
            category: "all".to_string(),
            path: String::new(),
            field: ExportField::Year,
        };
        self.modal = ModalState::Export;
    }

    fn delete_at(&mut self, day: u16, slot: u16) {
        let Some(id) = self.week.session_at(day, slot).and_then(|s| s.id) else {
            return;
        };
        match self.store.delete(id) {
            Ok(_) => self.notify_info(format!("Deleted session {}", id)),
            Err(e) => self.notify_error(&e),
        }
        self.refresh_data();
    }

    fn focused_form_text(&mut self) -> &mut String {
        let form = &mut self.form.form;
        match self.form.field {
            FormField::Category => &mut form.category,
            FormField::Description => &mut form.description,
            FormField::Date => &mut form.date,
            FormField::Start => &mut form.start,
            FormField::End => &mut form.end,
        }
    }

    /// Step the category field through the categories already in use
    fn cycle_category(&mut self, forward: bool) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        let current = self
            .categories
            .iter()
            .position(|c| *c == self.form.form.category);
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.form.form.category = self.categories[next].clone();
    }

    /// Handle session form keys
    fn handle_session_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.modal = ModalState::None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.field = self.form.field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.field = self.form.field.prev();
            }
            KeyCode::Left if self.form.field == FormField::Category => self.cycle_category(false),
            KeyCode::Right if self.form.field == FormField::Category => self.cycle_category(true),
            KeyCode::Enter => self.submit_session_form(),
            KeyCode::Backspace => {
                self.focused_form_text().pop();
            }
            KeyCode::Char(c) => {
                self.focused_form_text().push(c);
            }
            _ => {}
        }
    }

    /// Parse, validate and save the session form.
    ///
    /// Invalid input keeps the form open with everything typed so far.
    fn submit_session_form(&mut self) {
        let result = self
            .form
            .form
            .parse()
            .and_then(|draft| draft.validate(self.form.editing))
            .map_err(PlannerError::from)
            .and_then(|session| self.save_session(session));

        match result {
            Ok(session) => {
                self.modal = ModalState::None;
                self.week.anchor = session.date;
                self.refresh_data();
            }
            Err(e @ PlannerError::NotFound(_)) => {
                self.modal = ModalState::None;
                self.notify_error(&e);
                self.refresh_data();
            }
            Err(e) => self.notify_error(&e),
        }
    }

    fn save_session(&self, session: Session) -> Result<Session> {
        if session.id.is_some() {
            self.store.update(&session)?;
            Ok(session)
        } else {
            self.store.add(session)
        }
    }

    fn focused_export_text(&mut self) -> &mut String {
        match self.export.field {
            ExportField::Year => &mut self.export.year,
            ExportField::Month => &mut self.export.month,
            ExportField::Category => &mut self.export.category,
            ExportField::Path => &mut self.export.path,
        }
    }

    /// Handle export form keys
    fn handle_export_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.modal = ModalState::None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.export.field = self.export.field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.export.field = self.export.field.prev();
            }
            KeyCode::Enter => match self.run_export() {
                Ok(message) => {
                    self.modal = ModalState::None;
                    self.notify_info(message);
                }
                Err(e) => self.notify_error(&e),
            },
            KeyCode::Backspace => {
                self.focused_export_text().pop();
            }
            KeyCode::Char(c) => {
                self.focused_export_text().push(c);
            }
            _ => {}
        }
    }

    /// Export the chosen month and return a status message
    fn run_export(&self) -> Result<String> {
        let (year, month) = parse_year_month(&self.export.year, &self.export.month)?;
        let filter = CategoryFilter::parse(&self.export.category);
        let path = match self.export.path.trim() {
            "" => get_export_dir()?.join(default_file_name(year, month, &filter)),
            custom => PathBuf::from(custom),
        };

        let sessions = self.store.query_month(year, month, &filter)?;
        let pages =
            export_sessions_to_pdf(&sessions, &export_title(year, month, &filter), &path)?;
        Ok(format!(
            "PDF written: {} ({} sessions, {} pages)",
            path.display(),
            sessions.len(),
            pages
        ))
    }

    /// Expire informational messages
    fn handle_tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 && !self.has_blocking_notice() {
                self.notification = None;
            }
        }
    }

    /// Reload everything the current view shows from the store
    fn refresh_data(&mut self) {
        if let Err(e) = self.try_refresh() {
            self.notify_error(&e);
        }
    }

    fn try_refresh(&mut self) -> Result<()> {
        self.week.sessions = self.store.query_week(self.week.anchor)?;
        self.categories = self.store.list_categories()?.into_iter().collect();

        if self.view == View::Stats {
            let (first, last) = month_bounds(self.stats.year, self.stats.month)
                .ok_or(ValidationError::InvalidMonth)?;
            self.stats.stats = self.store.category_stats(first, last)?;
        }
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Quit the application
    fn quit(&mut self) {
        self.running = false;
    }
}
