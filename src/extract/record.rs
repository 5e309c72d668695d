// src/extract/record.rs

/// One harvested day, every field passed through as the page shows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRecord {
    pub date: String,
    pub min_temperature: String,
    pub max_temperature: String,
    pub max_sustained_wind: String,
    pub max_gust_wind: String,
    pub rainfall: String,
    pub snow_depth: String,
    pub description: String,
}

impl DayRecord {
    pub const FIELD_COUNT: usize = 8;

    /// Fields in column order, as written to the dataset.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.date,
            &self.min_temperature,
            &self.max_temperature,
            &self.max_sustained_wind,
            &self.max_gust_wind,
            &self.rainfall,
            &self.snow_depth,
            &self.description,
        ]
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date,
            Field::MinTemperature => &mut self.min_temperature,
            Field::MaxTemperature => &mut self.max_temperature,
            Field::MaxSustainedWind => &mut self.max_sustained_wind,
            Field::MaxGustWind => &mut self.max_gust_wind,
            Field::Rainfall => &mut self.rainfall,
            Field::SnowDepth => &mut self.snow_depth,
            Field::Description => &mut self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    MinTemperature,
    MaxTemperature,
    MaxSustainedWind,
    MaxGustWind,
    Rainfall,
    SnowDepth,
    Description,
}

impl Field {
    /// Spreadsheets read a leading minus as a formula or number; only temperatures carry one.
    pub(crate) fn escapes_minus(self) -> bool {
        matches!(self, Field::MinTemperature | Field::MaxTemperature)
    }

    /// The date cell wraps its text in a link.
    pub(crate) fn is_linked(self) -> bool {
        matches!(self, Field::Date)
    }
}

/// Cell position within a day row → field. Positions 7 and 8 are not stored.
pub(crate) const CELL_LAYOUT: [(usize, Field); DayRecord::FIELD_COUNT] = [
    (0, Field::Date),
    (1, Field::MinTemperature),
    (2, Field::MaxTemperature),
    (3, Field::MaxSustainedWind),
    (4, Field::MaxGustWind),
    (5, Field::Rainfall),
    (6, Field::SnowDepth),
    (9, Field::Description),
];

/// `"-5"` → `"-5'"`; anything else is returned unchanged.
pub fn escape_leading_minus(text: &str) -> String {
    if text.starts_with('-') {
        format!("{text}'")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_touches_negative_values() {
        assert_eq!(escape_leading_minus("-5"), "-5'");
        assert_eq!(escape_leading_minus("5"), "5");
        assert_eq!(escape_leading_minus("-0.5 °C"), "-0.5 °C'");
        assert_eq!(escape_leading_minus(""), "");
        assert_eq!(escape_leading_minus("1-2"), "1-2");
    }

    #[test]
    fn layout_fills_every_slot_once() {
        let mut record = DayRecord::default();
        for (i, (_, field)) in CELL_LAYOUT.iter().enumerate() {
            let slot = record.slot_mut(*field);
            assert!(slot.is_empty(), "{field:?} mapped twice");
            *slot = i.to_string();
        }
        assert_eq!(record.fields(), ["0", "1", "2", "3", "4", "5", "6", "7"]);
    }
}
