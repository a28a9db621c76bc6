//! Export rows for spreadsheet writers
//!
//! This module provides:
//! - The flat `ExportRow` shape handed to spreadsheet writers
//! - CSV and JSON writers for those rows

use crate::error::{Error, Result};
use crate::record::CharacterRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Default sheet name for exported tables
pub const DEFAULT_SHEET_NAME: &str = "Characters";

/// Column headers, in export order
pub const EXPORT_HEADERS: [&str; 7] = [
    "Name",
    "Damage",
    "Defense",
    "Energy Rate",
    "Move Speed",
    "Average",
    "Beast",
];

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Display name of the record
    pub name: String,
    pub damage: f64,
    pub defense: f64,
    pub energy_rate: f64,
    pub move_speed: f64,
    /// Average stats formatted with two decimals
    pub average: String,
    pub beast: bool,
}

impl ExportRow {
    /// Cell text for an export column index
    pub fn cell(&self, column: usize) -> Option<String> {
        let value = match column {
            0 => self.name.clone(),
            1 => self.damage.to_string(),
            2 => self.defense.to_string(),
            3 => self.energy_rate.to_string(),
            4 => self.move_speed.to_string(),
            5 => self.average.clone(),
            6 => beast_label(self.beast).to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Text for the beast column in every rendering
pub fn beast_label(beast: bool) -> &'static str {
    if beast {
        "Yes"
    } else {
        "No"
    }
}

impl From<&CharacterRecord> for ExportRow {
    fn from(record: &CharacterRecord) -> Self {
        Self {
            name: record.display_name.clone(),
            damage: record.damage,
            defense: record.defense,
            energy_rate: record.energy_rate,
            move_speed: record.move_speed,
            average: format!("{:.2}", record.average_stats),
            beast: record.beast,
        }
    }
}

/// Map records to export rows, preserving order
pub fn prepare_export_rows<'a, I>(records: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a CharacterRecord>,
{
    records.into_iter().map(ExportRow::from).collect()
}

/// Output format for exported rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// JSON export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Sheet name the rows belong to
    pub sheet: String,
    /// When the export was produced
    pub exported_at: DateTime<Utc>,
    pub rows: Vec<ExportRow>,
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        let cells: Vec<String> = (0..EXPORT_HEADERS.len())
            .filter_map(|column| row.cell(column))
            .collect();
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON document
pub fn write_json<W: Write>(rows: &[ExportRow], sheet: &str, writer: W) -> Result<()> {
    let document = ExportDocument {
        sheet: sheet.to_string(),
        exported_at: Utc::now(),
        rows: rows.to_vec(),
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Write rows to a file in the given format
pub fn export_to_file<P: AsRef<Path>>(
    rows: &[ExportRow],
    format: ExportFormat,
    sheet: &str,
    output: P,
) -> Result<()> {
    let file = File::create(output.as_ref())?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(rows, &mut writer)?,
        ExportFormat::Json => write_json(rows, sheet, &mut writer)?,
    }

    writer.flush()?;
    Ok(())
}
