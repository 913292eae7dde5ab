//! @ai:module:intent Immutable result entities for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api Record, RecordBuilder, RunOutcome, Skip
//! @ai:module:stateless true

use crate::lang::LanguageNormalizer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// @ai:intent Invariant violations caught at Record construction time
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("{field} must be a finite, non-negative duration (got {value})")]
    NegativeDuration { field: &'static str, value: f64 },

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// @ai:intent One immutable outcome of invoking a model on a corpus item
///
/// Durations are wall-clock seconds; a `None` translation time means the
/// phase was not measured, never that it took zero time. Constructed only
/// through [`RecordBuilder`], which normalizes the language code and
/// rejects negative durations. Corrections produce a new Record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    model: String,
    item_id: String,
    lang: String,
    load_time: f64,
    transcription_time: f64,
    translation_time: Option<f64>,
    transcription: String,
    translation: Option<String>,
    expect: Option<String>,
    note: Option<String>,
}

impl Record {
    /// @ai:intent Start building a record for one (model, item) pair
    /// @ai:effects pure
    pub fn builder(model: impl Into<String>, item_id: impl Into<String>) -> RecordBuilder {
        RecordBuilder::new(model, item_id)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Canonical detected language.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Model load time in seconds, amortized over the model's sub-run.
    pub fn load_time(&self) -> f64 {
        self.load_time
    }

    pub fn transcription_time(&self) -> f64 {
        self.transcription_time
    }

    pub fn translation_time(&self) -> Option<f64> {
        self.translation_time
    }

    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn expect(&self) -> Option<&str> {
        self.expect.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// @ai:intent Builder enforcing Record invariants at creation time
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    model: String,
    item_id: String,
    lang: Option<String>,
    load_time: Option<f64>,
    transcription_time: Option<f64>,
    translation_time: Option<f64>,
    transcription: Option<String>,
    translation: Option<String>,
    expect: Option<String>,
    note: Option<String>,
}

impl RecordBuilder {
    /// @ai:intent Create a builder for one (model, item) pair
    /// @ai:effects pure
    pub fn new(model: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            item_id: item_id.into(),
            ..Default::default()
        }
    }

    /// Raw backend-reported language; normalized on `build`.
    pub fn lang(mut self, raw: impl Into<String>) -> Self {
        self.lang = Some(raw.into());
        self
    }

    pub fn load_time(mut self, secs: f64) -> Self {
        self.load_time = Some(secs);
        self
    }

    pub fn transcription_time(mut self, secs: f64) -> Self {
        self.transcription_time = Some(secs);
        self
    }

    pub fn translation_time(mut self, secs: f64) -> Self {
        self.translation_time = Some(secs);
        self
    }

    pub fn transcription(mut self, text: impl Into<String>) -> Self {
        self.transcription = Some(text.into());
        self
    }

    pub fn translation(mut self, text: impl Into<String>) -> Self {
        self.translation = Some(text.into());
        self
    }

    pub fn expect_text(mut self, text: impl Into<Option<String>>) -> Self {
        self.expect = text.into();
        self
    }

    pub fn note(mut self, text: impl Into<Option<String>>) -> Self {
        self.note = text.into();
        self
    }

    /// @ai:intent Validate invariants and produce the immutable Record
    /// @ai:effects pure
    pub fn build(self) -> Result<Record, RecordError> {
        let lang = self.lang.ok_or(RecordError::MissingField("lang"))?;
        let load_time = self.load_time.ok_or(RecordError::MissingField("load_time"))?;
        let transcription_time = self
            .transcription_time
            .ok_or(RecordError::MissingField("transcription_time"))?;
        let transcription = self
            .transcription
            .ok_or(RecordError::MissingField("transcription"))?;

        check_duration("load_time", load_time)?;
        check_duration("transcription_time", transcription_time)?;
        if let Some(t) = self.translation_time {
            check_duration("translation_time", t)?;
        }

        let normalizer = LanguageNormalizer::new();
        let lang = normalizer.normalize(&lang).to_string();

        Ok(Record {
            model: self.model,
            item_id: self.item_id,
            lang,
            load_time,
            transcription_time,
            translation_time: self.translation_time,
            transcription,
            translation: self.translation,
            expect: self.expect,
            note: self.note,
        })
    }
}

/// @ai:intent Reject non-finite or negative durations
/// @ai:effects pure
fn check_duration(field: &'static str, value: f64) -> Result<(), RecordError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecordError::NegativeDuration { field, value })
    }
}

/// @ai:intent Marker for a SKIPPED (model, item) pair
///
/// A skipped pair contributes no Record but remains representable in
/// aggregation, so reports keep a uniform column structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    pub model: String,
    pub item_id: String,
    pub reason: String,
}

/// @ai:intent One run entry, in evaluation order
#[derive(Debug, Clone)]
pub enum RunEntry {
    Recorded(Record),
    Skipped(Skip),
}

impl RunEntry {
    /// @ai:intent Model id regardless of outcome
    /// @ai:effects pure
    pub fn model(&self) -> &str {
        match self {
            RunEntry::Recorded(r) => r.model(),
            RunEntry::Skipped(s) => &s.model,
        }
    }

    /// @ai:intent Corpus-item id regardless of outcome
    /// @ai:effects pure
    pub fn item_id(&self) -> &str {
        match self {
            RunEntry::Recorded(r) => r.item_id(),
            RunEntry::Skipped(s) => &s.item_id,
        }
    }
}

/// @ai:intent Ordered result sequence for one benchmark run
///
/// Insertion order is evaluation order. Destroyed once the run's report
/// has been rendered; there is no persistence layer behind it.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    entries: Vec<RunEntry>,
}

impl RunOutcome {
    /// @ai:intent Create an empty outcome
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Build an outcome from already-materialized records
    /// @ai:effects pure
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            entries: records.into_iter().map(RunEntry::Recorded).collect(),
        }
    }

    pub fn push_record(&mut self, record: Record) {
        self.entries.push(RunEntry::Recorded(record));
    }

    pub fn push_skip(&mut self, skip: Skip) {
        self.entries.push(RunEntry::Skipped(skip));
    }

    /// All entries in evaluation order.
    pub fn entries(&self) -> &[RunEntry] {
        &self.entries
    }

    /// Successful records in evaluation order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().filter_map(|e| match e {
            RunEntry::Recorded(r) => Some(r),
            RunEntry::Skipped(_) => None,
        })
    }

    /// Skipped pairs in evaluation order.
    pub fn skips(&self) -> impl Iterator<Item = &Skip> {
        self.entries.iter().filter_map(|e| match e {
            RunEntry::Recorded(_) => None,
            RunEntry::Skipped(s) => Some(s),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    pub fn skip_count(&self) -> usize {
        self.skips().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> RecordBuilder {
        Record::builder("tiny", "sample-zh-01.mp3")
            .lang("zh")
            .load_time(1.5)
            .transcription_time(0.8)
            .transcription("中文語音辨識測試")
    }

    #[test]
    fn test_build_normalizes_language() {
        let record = base_builder().build().unwrap();
        assert_eq!(record.lang(), "zh");

        let yue = Record::builder("tiny", "sample-zh-01.mp3")
            .lang("yue")
            .load_time(0.0)
            .transcription_time(0.0)
            .transcription("text")
            .build()
            .unwrap();
        assert_eq!(yue.lang(), "zh");
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = base_builder().translation_time(-0.1).build().unwrap_err();
        assert_eq!(
            err,
            RecordError::NegativeDuration {
                field: "translation_time",
                value: -0.1
            }
        );
    }

    #[test]
    fn test_nan_duration_rejected() {
        let err = base_builder().load_time(f64::NAN).build();
        assert!(err.is_err());
    }

    #[test]
    fn test_missing_required_field() {
        let err = Record::builder("tiny", "a-en.mp3")
            .lang("en")
            .load_time(1.0)
            .transcription_time(1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, RecordError::MissingField("transcription"));
    }

    #[test]
    fn test_absent_translation_time_is_not_measured() {
        let record = base_builder().build().unwrap();
        assert_eq!(record.translation_time(), None);
        assert_eq!(record.translation(), None);
    }

    #[test]
    fn test_outcome_preserves_evaluation_order() {
        let mut outcome = RunOutcome::new();
        outcome.push_record(base_builder().build().unwrap());
        outcome.push_skip(Skip {
            model: "small".to_string(),
            item_id: "sample-zh-01.mp3".to_string(),
            reason: "resource missing".to_string(),
        });
        outcome.push_record(
            Record::builder("small", "sample-en-01.mp3")
                .lang("en")
                .load_time(2.0)
                .transcription_time(1.0)
                .transcription("hello")
                .build()
                .unwrap(),
        );

        assert_eq!(outcome.record_count(), 2);
        assert_eq!(outcome.skip_count(), 1);

        let models: Vec<_> = outcome.entries().iter().map(|e| e.model()).collect();
        assert_eq!(models, vec!["tiny", "small", "small"]);
    }
}
