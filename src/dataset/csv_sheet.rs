// src/dataset/csv_sheet.rs

use std::{
    io,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

use super::Dataset;
use crate::error::{HarvestError, Result};

/// One sheet of a workbook directory, stored as `<workbook>/<sheet>.csv`.
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl CsvSheet {
    pub fn open(workbook: impl AsRef<Path>, sheet: &str) -> Result<Self> {
        let path = workbook.as_ref().join(format!("{sheet}.csv"));
        let unavailable = |source: io::Error| HarvestError::DatasetUnavailable {
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| unavailable(e.into()))?;
        let rows = reader
            .records()
            .map(|rec| rec.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()
            .map_err(|e| unavailable(e.into()))?;

        debug!(path = %path.display(), rows = rows.len(), "opened sheet");
        Ok(Self { path, rows })
    }
}

impl Dataset for CsvSheet {
    fn highest_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |i| i + 1)
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        self.rows.get(row.checked_sub(1)?)?.get(column).cloned()
    }

    fn write_cell(&mut self, row: usize, column: usize, text: &str) -> io::Result<()> {
        if row == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "rows are numbered from 1",
            ));
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = text.to_string();
        Ok(())
    }

    /// Written to a sibling temp file first, then renamed over the sheet.
    fn persist(&mut self) -> io::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file_mut());
            for row in &self.rows {
                // a blank line would be dropped on the next read and shift every row below it
                if row.is_empty() {
                    writer.write_record([""])?;
                } else {
                    writer.write_record(row)?;
                }
            }
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), rows = self.rows.len(), "saved sheet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_cells_by_row_and_column() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("Vremea.csv"),
            "Data,Min,Max\n01.06.2024,12,20\n02.06.2024,-1',9\n",
        )
        .unwrap();

        let sheet = CsvSheet::open(dir.path(), "Vremea").unwrap();
        assert_eq!(sheet.highest_row(), 3);
        assert_eq!(sheet.cell_text(1, 0).as_deref(), Some("Data"));
        assert_eq!(sheet.cell_text(3, 1).as_deref(), Some("-1'"));
        assert_eq!(sheet.cell_text(3, 7).as_deref(), None);
        assert_eq!(sheet.cell_text(0, 0).as_deref(), None);
        assert_eq!(sheet.cell_text(9, 0).as_deref(), None);
    }

    #[test]
    fn trailing_blank_rows_do_not_count() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("S.csv"), "Data\n01.06.2024\n,\n,,\n").unwrap();
        let sheet = CsvSheet::open(dir.path(), "S").unwrap();
        assert_eq!(sheet.highest_row(), 2);
    }

    #[test]
    fn missing_sheet_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = CsvSheet::open(dir.path(), "Nope").unwrap_err();
        match err {
            HarvestError::DatasetUnavailable { path, .. } => {
                assert_eq!(path, dir.path().join("Nope.csv"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("S.csv"), "Note,Data\n,01.06.2024\n").unwrap();

        let mut sheet = CsvSheet::open(dir.path(), "S").unwrap();
        sheet.write_cell(5, 1, "05.06.2024").unwrap();
        sheet.write_cell(5, 2, "text, with comma").unwrap();
        sheet.persist().unwrap();

        let reopened = CsvSheet::open(dir.path(), "S").unwrap();
        assert_eq!(reopened.highest_row(), 5);
        assert_eq!(reopened.cell_text(2, 1).as_deref(), Some("01.06.2024"));
        assert_eq!(reopened.cell_text(5, 1).as_deref(), Some("05.06.2024"));
        assert_eq!(reopened.cell_text(5, 2).as_deref(), Some("text, with comma"));
        // padding rows keep their place
        assert_eq!(reopened.cell_text(4, 0).as_deref(), Some(""));
    }

    #[test]
    fn row_zero_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("S.csv"), "Data\n").unwrap();
        let mut sheet = CsvSheet::open(dir.path(), "S").unwrap();
        assert!(sheet.write_cell(0, 0, "x").is_err());
    }
}
