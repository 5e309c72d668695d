// src/config.rs

use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::{HarvestError, Result};

/// Run configuration, loaded once at startup and passed by reference afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarvestConfig {
    /// Workbook path without extension: `<dataset>.xlsx`, or a directory of
    /// `<sheet>.csv` files for the csv format.
    pub dataset: PathBuf,
    #[serde(default)]
    pub format: DatasetFormat,
    pub sheet: String,
    pub date_column: DateColumn,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    #[default]
    Xlsx,
    Csv,
}

/// Which column holds the stored dates, by letter (`"A"`, `"AB"`) or 0-based index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateColumn {
    Index(usize),
    Letter(String),
}

impl DateColumn {
    /// 0-based column index. Only meaningful after [`HarvestConfig::validate`].
    pub fn index(&self) -> usize {
        match self {
            DateColumn::Index(i) => *i,
            DateColumn::Letter(letters) => letter_index(letters).unwrap_or(usize::MAX),
        }
    }
}

/// Last column a spreadsheet can address, `XFD`.
const MAX_COLUMN_INDEX: usize = 16_383;

fn letter_index(letters: &str) -> Option<usize> {
    letters
        .bytes()
        .try_fold(0usize, |acc, b| {
            if !b.is_ascii_alphabetic() {
                return None;
            }
            let n = (b.to_ascii_uppercase() - b'A') as usize + 1;
            acc.checked_mul(26)?.checked_add(n)
        })?
        .checked_sub(1)
}

impl fmt::Display for DateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateColumn::Index(i) => write!(f, "#{i}"),
            DateColumn::Letter(letters) => f.write_str(letters),
        }
    }
}

/// Monthly history page of one weather station.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub base_url: String,
    pub gid: String,
    pub station: String,
    pub language: String,
    pub country: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://freemeteo.ro/vremea/bucuroaia/istoric/istoric-lunar/".into(),
            gid: "683499".into(),
            station: "4621".into(),
            language: "romanian".into(),
            country: "romania".into(),
        }
    }
}

impl HarvestConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            HarvestError::ConfigInvalid(format!(
                "failed to read {}: {e}, make sure the file exists",
                path.display()
            ))
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| HarvestError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dataset.as_os_str().is_empty() {
            return Err(HarvestError::ConfigInvalid("dataset cannot be empty".into()));
        }
        if self.sheet.trim().is_empty() {
            return Err(HarvestError::ConfigInvalid("sheet cannot be empty".into()));
        }
        if let DateColumn::Letter(letters) = &self.date_column {
            if letters.is_empty() {
                return Err(HarvestError::ConfigInvalid(
                    "date_column cannot be empty".into(),
                ));
            }
            if letters.chars().any(|c| c.is_ascii_digit()) {
                return Err(HarvestError::ConfigInvalid(
                    "date_column cannot contain numbers".into(),
                ));
            }
            if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(HarvestError::ConfigInvalid(format!(
                    "date_column {letters:?} must be a column letter like A or AB"
                )));
            }
            if letter_index(letters).map_or(true, |i| i > MAX_COLUMN_INDEX) {
                return Err(HarvestError::ConfigInvalid(format!(
                    "date_column {letters:?} is past the last column XFD"
                )));
            }
        }
        if self.source.base_url.trim().is_empty() {
            return Err(HarvestError::ConfigInvalid(
                "source.base_url cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
