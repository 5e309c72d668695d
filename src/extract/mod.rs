// src/extract/mod.rs

pub mod record;

use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::trace;

use crate::dates::ResumePoint;
pub use record::{escape_leading_minus, DayRecord, Field};
use record::CELL_LAYOUT;

/// Attribute carrying the day of month on every day row.
const DAY_MARKER: &str = "data-day";

/// The page no longer has the shape the cell layout expects.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StructureError(pub String);

/// Extract every day row of one month page, in document order.
///
/// On the first month of a run, rows before `resume.first_month_day` are
/// already stored and get skipped. A single malformed row fails the whole page.
pub fn extract_month(
    html: &str,
    is_first_month: bool,
    resume: &ResumePoint,
) -> Result<Vec<DayRecord>, StructureError> {
    let document = Html::parse_document(html);
    let skip_before = is_first_month.then_some(resume.first_month_day);

    let mut records = Vec::with_capacity(31);
    walk(document.root_element(), skip_before, &mut records)?;
    Ok(records)
}

fn walk(
    element: ElementRef<'_>,
    skip_before: Option<u32>,
    out: &mut Vec<DayRecord>,
) -> Result<(), StructureError> {
    let value = element.value();
    if value.name() == "tr" {
        if let Some(marker) = value.attr(DAY_MARKER) {
            let day: u32 = marker.trim().parse().map_err(|_| {
                StructureError(format!("day marker {marker:?} is not a number"))
            })?;
            match skip_before {
                Some(first) if day < first => trace!(day, "skipping stored day"),
                _ => out.push(read_day_row(element, day)?),
            }
        }
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        walk(child, skip_before, out)?;
    }
    Ok(())
}

fn read_day_row(row: ElementRef<'_>, day: u32) -> Result<DayRecord, StructureError> {
    // whitespace text between cells is not a cell
    let cells: Vec<ElementRef<'_>> = row.children().filter_map(ElementRef::wrap).collect();

    let mut record = DayRecord::default();
    for &(position, field) in CELL_LAYOUT.iter() {
        let cell = *cells.get(position).ok_or_else(|| {
            StructureError(format!(
                "day {day}: row has {} cells, {field:?} expected at {position}",
                cells.len()
            ))
        })?;

        let holder = if field.is_linked() {
            cell.first_child()
                .and_then(ElementRef::wrap)
                .filter(|link| link.value().name() == "a")
                .ok_or_else(|| StructureError(format!("day {day}: {field:?} cell has no link")))?
        } else {
            cell
        };

        let text = holder
            .first_child()
            .and_then(|node| node.value().as_text())
            .map(|text| &**text)
            .ok_or_else(|| StructureError(format!("day {day}: {field:?} cell has no text")))?;

        *record.slot_mut(field) = if field.escapes_minus() {
            escape_leading_minus(text)
        } else {
            text.to_string()
        };
    }
    Ok(record)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{day_row, month_page};
    use super::*;
    use crate::dates::parse_last_stored_date;
    use chrono::NaiveDate;

    fn resume(last: &str) -> ResumePoint {
        parse_last_stored_date(last, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()).unwrap()
    }

    #[test]
    fn extracts_all_fields_of_a_row() {
        let html = month_page(7, 2024, [4]);
        let records = extract_month(&html, false, &resume("15.06.2024")).unwrap();
        assert_eq!(
            records,
            vec![DayRecord {
                date: "04.07.2024".into(),
                min_temperature: "-4'".into(),
                max_temperature: "14".into(),
                max_sustained_wind: "15 Km/h".into(),
                max_gust_wind: "30 Km/h".into(),
                rainfall: "0.4 mm".into(),
                snow_depth: "0 cm".into(),
                description: "Innorat".into(),
            }]
        );
    }

    #[test]
    fn first_month_skips_stored_days() {
        let html = month_page(6, 2024, 1..=30);
        let rp = resume("15.06.2024");

        let records = extract_month(&html, true, &rp).unwrap();
        assert_eq!(records.len(), 30 - 15);
        assert_eq!(records[0].date, "16.06.2024");
        for r in &records {
            let day: u32 = r.date[..2].parse().unwrap();
            assert!(day >= rp.first_month_day);
        }

        // later months keep everything
        let records = extract_month(&html, false, &rp).unwrap();
        assert_eq!(records.len(), 30);
    }

    #[test]
    fn first_month_can_be_fully_skipped() {
        let html = month_page(6, 2024, 1..=10);
        let records = extract_month(&html, true, &resume("15.06.2024")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn keeps_document_order_across_nested_tables() {
        let html = format!(
            "<html><body><table><tr><td><table>{}</table></td></tr></table>\
             <div><section><table>{}{}</table></section></div></body></html>",
            day_row(3, 7, 2024),
            day_row(1, 7, 2024),
            day_row(2, 7, 2024),
        );
        let records = extract_month(&html, false, &resume("15.06.2024")).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["03.07.2024", "01.07.2024", "02.07.2024"]);
    }

    #[test]
    fn page_without_day_rows_is_empty() {
        let html = "<html><body><table><tr><td>nimic</td></tr></table></body></html>";
        assert!(extract_month(html, false, &resume("15.06.2024"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_cell_fails_whole_page() {
        let truncated = "<tr data-day=\"2\"><td><a href=\"#\">02.07.2024</a></td><td>3</td></tr>";
        let html = format!(
            "<html><body><table>{}{}{}</table></body></html>",
            day_row(1, 7, 2024),
            truncated,
            day_row(3, 7, 2024)
        );
        let err = extract_month(&html, false, &resume("15.06.2024")).unwrap_err();
        assert!(err.0.contains("day 2"), "{err}");
    }

    #[test]
    fn unlinked_date_fails() {
        let row = day_row(5, 7, 2024).replace("<a href=\"/zi/5\">05.07.2024</a>", "05.07.2024");
        let html = format!("<html><body><table>{row}</table></body></html>");
        let err = extract_month(&html, false, &resume("15.06.2024")).unwrap_err();
        assert!(err.0.contains("link"), "{err}");
    }

    #[test]
    fn empty_cell_fails() {
        let row = day_row(5, 7, 2024).replace("<td>Innorat</td>", "<td></td>");
        let html = format!("<html><body><table>{row}</table></body></html>");
        assert!(extract_month(&html, false, &resume("15.06.2024")).is_err());
    }

    #[test]
    fn non_numeric_day_marker_fails() {
        let row = day_row(5, 7, 2024).replace("data-day=\"5\"", "data-day=\"cinci\"");
        let html = format!("<html><body><table>{row}</table></body></html>");
        let err = extract_month(&html, false, &resume("15.06.2024")).unwrap_err();
        assert!(err.0.contains("cinci"), "{err}");
    }

    #[test]
    fn cell_text_is_passed_through_untrimmed() {
        let row = day_row(4, 7, 2024)
            .replace("<td>Innorat</td>", "<td> Ceata </td>")
            .replacen("<td>-4</td>", "<td> -4</td>", 1);
        let html = format!("<html><body><table>{row}</table></body></html>");
        let records = extract_month(&html, false, &resume("15.06.2024")).unwrap();
        assert_eq!(records[0].description, " Ceata ");
        // only a minus in the first position is escaped
        assert_eq!(records[0].min_temperature, " -4");
    }

    #[test]
    fn skipped_rows_are_not_validated() {
        // a stored day with a broken layout does not matter
        let broken = "<tr data-day=\"2\"><td>?</td></tr>";
        let html = format!(
            "<html><body><table>{broken}{}</table></body></html>",
            day_row(20, 6, 2024)
        );
        let records = extract_month(&html, true, &resume("15.06.2024")).unwrap();
        assert_eq!(records.len(), 1);
    }
}
