use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::config::{
    PDF_FONT_SIZE_PT, PDF_LINE_HEIGHT_PT, PDF_MARGIN_PT, PDF_PAGE_HEIGHT_MM, PDF_PAGE_WIDTH_MM,
};
use crate::error::Result;
use crate::models::{CategoryFilter, Session};

const MM_PER_PT: f32 = 25.4 / 72.0;

fn pt(value: f32) -> Mm {
    Mm(value * MM_PER_PT)
}

fn page_height_pt() -> f32 {
    PDF_PAGE_HEIGHT_MM / MM_PER_PT
}

/// How many lines fit between the top and bottom margins
pub fn lines_per_page() -> usize {
    let usable = page_height_pt() - 2.0 * PDF_MARGIN_PT;
    (usable / PDF_LINE_HEIGHT_PT).floor().max(0.0) as usize + 1
}

/// "07/04 - 18:00–19:30 - Physical work (U15)"
pub fn session_line(session: &Session) -> String {
    format!(
        "{} - {} - {} ({})",
        session.date.format("%d/%m"),
        session.time_range_label(),
        session.description,
        session.category
    )
}

/// Heading printed at the top of the first page
pub fn export_title(year: i32, month: u32, filter: &CategoryFilter) -> String {
    format!("Trainings {:04}-{:02} - {}", year, month, filter)
}

/// Default file name for a month export
pub fn default_file_name(year: i32, month: u32, filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => format!("trainings-{:04}-{:02}.pdf", year, month),
        CategoryFilter::Only(name) => {
            let safe: String = name
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
                .collect();
            format!("trainings-{:04}-{:02}-{}.pdf", year, month, safe)
        }
    }
}

/// Split lines into pages of at most `per_page` lines.
///
/// Always returns at least one page.
pub fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    let per_page = per_page.max(1);
    let mut pages: Vec<Vec<String>> = Vec::new();
    let mut current = Vec::with_capacity(per_page);

    for line in lines {
        if current.len() == per_page {
            pages.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    pages.push(current);
    pages
}

/// Lay out the document text: the title, then one line per session
pub fn document_lines(title: &str, sessions: &[Session]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if sessions.is_empty() {
        lines.push("No sessions".to_string());
    } else {
        lines.extend(sessions.iter().map(session_line));
    }
    lines
}

/// Write sessions to an A4 PDF, in the order given.
///
/// Returns the number of pages written.
pub fn export_sessions_to_pdf(sessions: &[Session], title: &str, path: &Path) -> Result<usize> {
    let pages = paginate(document_lines(title, sessions), lines_per_page());

    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PDF_PAGE_WIDTH_MM),
        Mm(PDF_PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let top = page_height_pt() - PDF_MARGIN_PT;

    for (index, lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PDF_PAGE_WIDTH_MM), Mm(PDF_PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            let y = top - row as f32 * PDF_LINE_HEIGHT_PT;
            layer.use_text(line.as_str(), PDF_FONT_SIZE_PT, pt(PDF_MARGIN_PT), pt(y), &font);
        }
    }

    doc.save(&mut BufWriter::new(File::create(path)?))?;
    info!(
        "Exported {} sessions to {} ({} pages)",
        sessions.len(),
        path.display(),
        pages.len()
    );
    Ok(pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample(day: u32) -> Session {
        Session::new(
            "U15",
            "Physical work",
            NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_a4_fits_39_lines() {
        assert_eq!(lines_per_page(), 39);
    }

    #[test]
    fn test_session_line() {
        assert_eq!(
            session_line(&sample(7)),
            "07/04 - 18:00–19:30 - Physical work (U15)"
        );
    }

    #[test]
    fn test_paginate_breaks_on_overflow() {
        let lines: Vec<String> = (0..80).map(|i| i.to_string()).collect();
        let pages = paginate(lines, 39);
        let sizes: Vec<_> = pages.iter().map(Vec::len).collect();
        assert_eq!(sizes, [39, 39, 2]);
        assert_eq!(pages[1][0], "39");
    }

    #[test]
    fn test_paginate_exact_fit_has_no_blank_page() {
        let lines: Vec<String> = (0..39).map(|i| i.to_string()).collect();
        assert_eq!(paginate(lines, 39).len(), 1);
    }

    #[test]
    fn test_paginate_empty_is_one_page() {
        assert_eq!(paginate(Vec::new(), 39), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_document_lines() {
        let lines = document_lines("Title", &[sample(7), sample(8)]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Title");
        assert!(lines[2].starts_with("08/04"));

        assert_eq!(document_lines("Title", &[]), ["Title", "No sessions"]);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            default_file_name(2025, 4, &CategoryFilter::All),
            "trainings-2025-04.pdf"
        );
        assert_eq!(
            default_file_name(2025, 4, &CategoryFilter::Only("U15 girls".to_string())),
            "trainings-2025-04-U15_girls.pdf"
        );
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("april.pdf");
        let sessions: Vec<_> = (1..=30).cycle().take(50).map(sample).collect();

        let pages = export_sessions_to_pdf(&sessions, "April", &path).unwrap();
        assert_eq!(pages, 2);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
