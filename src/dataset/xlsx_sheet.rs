// src/dataset/xlsx_sheet.rs

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;
use umya_spreadsheet::{reader, writer, Spreadsheet, Worksheet};

use super::Dataset;
use crate::error::{HarvestError, Result};

/// One named sheet inside an `.xlsx` workbook.
pub struct XlsxSheet {
    path: PathBuf,
    sheet: String,
    book: Spreadsheet,
}

impl XlsxSheet {
    /// Opens `<workbook>.xlsx`; a path already ending in `.xlsx` is used as is.
    pub fn open(workbook: impl AsRef<Path>, sheet: &str) -> Result<Self> {
        let path = workbook_path(workbook.as_ref());
        let book = reader::xlsx::read(&path).map_err(|e| HarvestError::DatasetUnavailable {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        })?;
        let rows = book
            .get_sheet_by_name(sheet)
            .ok_or_else(|| HarvestError::DatasetUnavailable {
                path: path.clone(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("sheet {sheet} not found, make sure sheet {sheet} exists"),
                ),
            })?
            .get_highest_row();

        debug!(path = %path.display(), sheet, rows, "opened workbook");
        Ok(Self {
            path,
            sheet: sheet.to_string(),
            book,
        })
    }

    fn worksheet(&self) -> Option<&Worksheet> {
        self.book.get_sheet_by_name(&self.sheet)
    }
}

fn workbook_path(workbook: &Path) -> PathBuf {
    if workbook.extension().is_some_and(|ext| ext == "xlsx") {
        return workbook.to_path_buf();
    }
    let mut name = OsString::from(workbook.as_os_str());
    name.push(".xlsx");
    PathBuf::from(name)
}

/// 0-based column + 1-based row → the workbook's 1-based (column, row).
fn coordinates(row: usize, column: usize) -> Option<(u32, u32)> {
    let col = u32::try_from(column).ok()?.checked_add(1)?;
    let row = u32::try_from(row).ok().filter(|r| *r > 0)?;
    Some((col, row))
}

impl Dataset for XlsxSheet {
    fn highest_row(&self) -> usize {
        self.worksheet()
            .map_or(0, |ws| ws.get_highest_row() as usize)
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        let coords = coordinates(row, column)?;
        self.worksheet()?
            .get_cell(coords)
            .map(|cell| cell.get_value().to_string())
    }

    fn write_cell(&mut self, row: usize, column: usize, text: &str) -> io::Result<()> {
        let coords = coordinates(row, column).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no cell at row {row}, column {column}"),
            )
        })?;
        let sheet = &self.sheet;
        let ws = self.book.get_sheet_by_name_mut(sheet).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("sheet {sheet} not found"))
        })?;
        // stored as text so the spreadsheet never reinterprets the value
        ws.get_cell_mut(coords).set_value_string(text);
        Ok(())
    }

    /// Written to a sibling temp file first, then renamed over the workbook.
    fn persist(&mut self) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        writer::xlsx::write_writer(&self.book, tmp.as_file_mut()).map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("{e}, make sure {} is not open", self.path.display()),
            )
        })?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), sheet = %self.sheet, "saved workbook");
        Ok(())
    }
}
