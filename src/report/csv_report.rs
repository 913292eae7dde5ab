//! @ai:module:intent Flat CSV export and re-import of run records
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter
//! @ai:module:stateless true

use crate::record::Record;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent One flat CSV row; field order defines the column order
///
/// Durations are serialized as plain f64 seconds so they parse back to
/// the exact same value; absent optionals serialize as empty cells.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Lang")]
    lang: String,
    #[serde(rename = "Load Time")]
    load_time: f64,
    #[serde(rename = "Transcription Time")]
    transcription_time: f64,
    #[serde(rename = "Translation Time")]
    translation_time: Option<f64>,
    #[serde(rename = "Transcription")]
    transcription: String,
    #[serde(rename = "Translation")]
    translation: Option<String>,
    #[serde(rename = "Expect")]
    expect: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

impl From<&Record> for CsvRow {
    fn from(record: &Record) -> Self {
        Self {
            model: record.model().to_string(),
            filename: record.item_id().to_string(),
            lang: record.lang().to_string(),
            load_time: record.load_time(),
            transcription_time: record.transcription_time(),
            translation_time: record.translation_time(),
            transcription: record.transcription().to_string(),
            translation: record.translation().map(str::to_string),
            expect: record.expect().map(str::to_string),
            note: record.note().map(str::to_string),
        }
    }
}

impl CsvRow {
    /// @ai:intent Rebuild a Record, re-validating invariants on the way in
    /// @ai:effects pure
    fn into_record(self) -> Result<Record> {
        let mut builder = Record::builder(self.model, self.filename)
            .lang(self.lang)
            .load_time(self.load_time)
            .transcription_time(self.transcription_time)
            .transcription(self.transcription)
            .expect_text(self.expect)
            .note(self.note);

        if let Some(t) = self.translation_time {
            builder = builder.translation_time(t);
        }
        if let Some(text) = self.translation {
            builder = builder.translation(text);
        }

        builder.build().context("invalid record in CSV")
    }
}

/// @ai:intent Trait for the flat tabular export
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Write one row per record, with a header row
    fn write(&self, records: &[Record], output_path: &Path) -> Result<()>;

    /// @ai:intent Read a previously written table back into Records
    fn read(&self, input_path: &Path) -> Result<Vec<Record>>;
}

/// @ai:intent Writes and re-reads the flat, round-trippable record table
///
/// UTF-8 throughout; the csv writer quotes as needed, so multilingual
/// text and embedded punctuation survive the round trip unmangled.
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:intent Create a new CSV reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:intent Write records to a CSV file
    /// @ai:effects fs:write
    fn write(&self, records: &[Record], output_path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;

        for record in records {
            writer.serialize(CsvRow::from(record))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// @ai:intent Read records back from a CSV file
    /// @ai:effects fs:read
    fn read(&self, input_path: &Path) -> Result<Vec<Record>> {
        let mut reader = csv::Reader::from_path(input_path)
            .with_context(|| format!("failed to open {}", input_path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row.context("malformed CSV row")?;
            records.push(row.into_record()?);
        }

        Ok(records)
    }
}
