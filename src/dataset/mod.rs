// src/dataset/mod.rs

pub mod csv_sheet;
pub mod resume;
pub mod write;
pub mod xlsx_sheet;

use std::io;

use crate::config::{DatasetFormat, HarvestConfig};
use crate::error::Result;
pub use csv_sheet::CsvSheet;
pub use resume::{resolve_resume_point, ResumeTarget};
pub use write::write_records;
pub use xlsx_sheet::XlsxSheet;

/// Row 1 holds column titles; stored data starts below it.
pub const FIRST_DATA_ROW: usize = 2;

/// A spreadsheet-like grid addressed by 1-based row and 0-based column.
pub trait Dataset {
    /// Highest used row, 0 when the sheet is blank. Rows below it may still be empty.
    fn highest_row(&self) -> usize;

    fn cell_text(&self, row: usize, column: usize) -> Option<String>;

    fn write_cell(&mut self, row: usize, column: usize, text: &str) -> io::Result<()>;

    /// Make every write so far durable.
    fn persist(&mut self) -> io::Result<()>;
}

/// Open the configured sheet with the backend its format names.
pub fn open(config: &HarvestConfig) -> Result<Box<dyn Dataset>> {
    Ok(match config.format {
        DatasetFormat::Xlsx => Box::new(XlsxSheet::open(&config.dataset, &config.sheet)?),
        DatasetFormat::Csv => Box::new(CsvSheet::open(&config.dataset, &config.sheet)?),
    })
}
