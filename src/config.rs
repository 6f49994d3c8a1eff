use directories::{ProjectDirs, UserDirs};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PlannerError, Result};

/// Tick rate for the event loop (250ms)
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// First hour shown on the week grid
pub const DAY_START_HOUR: u32 = 8;
/// The week grid ends at this hour (exclusive)
pub const DAY_END_HOUR: u32 = 22;
/// Length of one grid row
pub const SLOT_MINUTES: u32 = 30;
/// Default length of a session created from an empty slot
pub const DEFAULT_SESSION_MINUTES: i64 = 60;

/// Years a session may fall in; four digits keep stored dates sortable as text
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A4 page size in millimetres
pub const PDF_PAGE_WIDTH_MM: f32 = 210.0;
pub const PDF_PAGE_HEIGHT_MM: f32 = 297.0;
/// Page layout in points (1/72 inch)
pub const PDF_MARGIN_PT: f32 = 40.0;
pub const PDF_LINE_HEIGHT_PT: f32 = 20.0;
pub const PDF_FONT_SIZE_PT: f32 = 12.0;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "courtplan").ok_or(PlannerError::NoDataDirectory)
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.to_path_buf())
}

/// Get the path to the database file.
///
/// Returns the path to `courtplan.db` in the appropriate data directory:
/// - Linux: `~/.local/share/courtplan/courtplan.db`
/// - macOS: `~/Library/Application Support/courtplan/courtplan.db`
/// - Windows: `C:\Users\<User>\AppData\Roaming\courtplan\courtplan.db`
pub fn get_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("courtplan.db"))
}

/// Get the path to the log file.
///
/// Returns the path to `courtplan.log` in the same data directory as the database.
pub fn get_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("courtplan.log"))
}

/// Directory PDF exports are offered in by default.
///
/// The user's documents folder when there is one, otherwise the data directory.
pub fn get_export_dir() -> Result<PathBuf> {
    match UserDirs::new().and_then(|dirs| dirs.document_dir().map(PathBuf::from)) {
        Some(dir) => Ok(dir),
        None => data_dir(),
    }
}
