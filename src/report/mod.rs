//! @ai:module:intent Report generation for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, CsvReporter, MarkdownReporter

pub mod csv_report;
pub mod markdown_report;

pub use csv_report::{CsvReporter, CsvReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::aggregate::ResultAggregator;
use crate::catalog::ReferenceCatalog;
use crate::record::RunOutcome;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    csv: CsvReporter,
    markdown: MarkdownReporter,
    aggregator: ResultAggregator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            csv: CsvReporter::new(),
            markdown: MarkdownReporter::new(),
            aggregator: ResultAggregator::new(),
        }
    }

    /// @ai:intent Generate the CSV table and the grouped markdown report
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        outcome: &RunOutcome,
        catalog: &ReferenceCatalog,
        output_dir: &Path,
    ) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        let records: Vec<_> = outcome.records().cloned().collect();
        self.csv.write(&records, &output_dir.join("results.csv"))?;

        let aggregation = self.aggregator.aggregate(outcome);
        self.markdown
            .generate(&aggregation, catalog, &output_dir.join("results.md"))?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }

    /// @ai:intent Re-render the markdown report from a saved CSV table
    /// @ai:effects fs:read,fs:write
    pub fn regenerate_from_csv(
        &self,
        csv_path: &Path,
        catalog: &ReferenceCatalog,
        output_path: &Path,
    ) -> Result<()> {
        let records = self.csv.read(csv_path)?;
        let aggregation = self.aggregator.aggregate(&RunOutcome::from_records(records));
        self.markdown.generate(&aggregation, catalog, output_path)?;

        tracing::info!("Report regenerated at {}", output_path.display());
        Ok(())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use tempfile::TempDir;

    #[test]
    fn test_generate_all_writes_both_reports() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("results");

        let mut outcome = RunOutcome::new();
        outcome.push_record(
            Record::builder("tiny", "thinking-ja.mp3")
                .lang("ja")
                .load_time(1.0)
                .transcription_time(0.5)
                .transcription("私はぼーっとしているのではなく")
                .build()
                .unwrap(),
        );

        ReportGenerator::new()
            .generate_all(&outcome, &ReferenceCatalog::default(), &output_dir)
            .unwrap();

        assert!(output_dir.join("results.csv").exists());
        assert!(output_dir.join("results.md").exists());
    }

    #[tokio::test]
    async fn test_full_run_with_partial_failure_renders_both_reports() {
        use crate::backend::MockBackend;
        use crate::corpus::CorpusItem;
        use crate::runner::{BatchDriver, BenchmarkContext};
        use std::time::Duration;

        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("results");

        let mut item = CorpusItem::new("sample-zh-01.mp3", "test-data/sample-zh-01.mp3");
        item.expect = Some("中文語音辨識測試".to_string());
        let items = vec![item];

        let driver = BatchDriver::new();
        let mut outcome = RunOutcome::new();

        let good = MockBackend::new("中文語音辨識測試", "zh");
        let ctx = BenchmarkContext::with_load_time("good", good, Duration::from_secs(1));
        driver.run_model(&ctx, &items, &mut outcome).await;

        let bad = MockBackend::new("", "en").with_missing_resource("sample-zh-01.mp3");
        let ctx = BenchmarkContext::with_load_time("bad", bad, Duration::from_secs(1));
        driver.run_model(&ctx, &items, &mut outcome).await;

        assert_eq!(outcome.record_count(), 1);
        assert_eq!(outcome.skip_count(), 1);

        ReportGenerator::new()
            .generate_all(&outcome, &ReferenceCatalog::default(), &output_dir)
            .unwrap();

        let csv = std::fs::read_to_string(output_dir.join("results.csv")).unwrap();
        assert!(csv.contains("good,sample-zh-01.mp3,zh"));
        assert!(!csv.contains("bad,sample-zh-01.mp3"));

        let md = std::fs::read_to_string(output_dir.join("results.md")).unwrap();
        assert!(md.contains("#### sample-zh-01.mp3"));
        // transcription matched the golden text, so the diff has no brackets
        assert!(md.contains("good     : 中文語音辨識測試"));
        assert!(!md.contains("[中文語音辨識測試]"));
        assert!(md.contains("bad      : -"));
    }

    #[test]
    fn test_regenerate_from_csv() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("results");

        let mut outcome = RunOutcome::new();
        outcome.push_record(
            Record::builder("tiny", "serenity-ko.mp3")
                .lang("ko")
                .load_time(2.0)
                .transcription_time(1.0)
                .transcription("하나님")
                .build()
                .unwrap(),
        );

        let generator = ReportGenerator::new();
        generator
            .generate_all(&outcome, &ReferenceCatalog::default(), &output_dir)
            .unwrap();

        let regenerated = output_dir.join("regenerated.md");
        generator
            .regenerate_from_csv(
                &output_dir.join("results.csv"),
                &ReferenceCatalog::default(),
                &regenerated,
            )
            .unwrap();

        let original = std::fs::read_to_string(output_dir.join("results.md")).unwrap();
        let again = std::fs::read_to_string(&regenerated).unwrap();
        assert_eq!(original, again);
    }
}
