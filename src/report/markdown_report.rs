//! @ai:module:intent Grouped markdown narrative report
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::aggregate::Aggregation;
use crate::catalog::ReferenceCatalog;
use crate::corpus::parse_item_id;
use crate::diff::DiffHighlighter;
use crate::record::Record;
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for the grouped narrative report
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Render the aggregation and write it to a file
    fn generate(
        &self,
        aggregation: &Aggregation,
        catalog: &ReferenceCatalog,
        output_path: &Path,
    ) -> Result<()>;
}

/// @ai:intent Renders one narrative block per corpus item, columns = models
///
/// Each block shows per-phase timings for every model, then fenced text
/// blocks comparing the catalog's reference phrase against each model's
/// transcription (with a word diff when a golden expectation exists)
/// and the English reference against each model's translation. A model
/// that skipped the item renders as a `-` placeholder, and a catalog
/// miss renders a blank reference line; neither is an error.
pub struct MarkdownReporter {
    diff: DiffHighlighter,
}

impl MarkdownReporter {
    /// @ai:intent Create a new markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            diff: DiffHighlighter::new(),
        }
    }

    /// @ai:intent Render the full report to a string
    /// @ai:effects pure
    pub fn render(&self, aggregation: &Aggregation, catalog: &ReferenceCatalog) -> String {
        let mut out = String::new();
        let models = aggregation.models();
        let model_list = models.join(", ");

        let label_width = models
            .iter()
            .map(|m| m.len())
            .chain(std::iter::once("reference".len()))
            .max()
            .unwrap_or(0);

        for row in aggregation.rows() {
            let parsed = parse_item_id(&row.item_id);
            let sample = parsed.map(|(name, _)| name);
            let lang = parsed.map(|(_, lang)| lang.as_str());

            writeln!(out, "#### {}", row.item_id).unwrap();
            writeln!(out).unwrap();

            writeln!(
                out,
                "* Load time ({}): {}",
                model_list,
                join_times(row.cells(), |r| Some(r.load_time()))
            )
            .unwrap();
            writeln!(
                out,
                "* Transcription time ({}): {}",
                model_list,
                join_times(row.cells(), |r| Some(r.transcription_time()))
            )
            .unwrap();
            writeln!(
                out,
                "* Translation time ({}): {}",
                model_list,
                join_times(row.cells(), |r| r.translation_time())
            )
            .unwrap();
            writeln!(out).unwrap();

            writeln!(out, "##### Transcription").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "```text").unwrap();

            let reference = sample
                .zip(lang)
                .and_then(|(s, l)| catalog.lookup(s, l))
                .unwrap_or("");
            writeln!(out, "{:<label_width$}: {}", "reference", reference).unwrap();

            for (model, cell) in models.iter().zip(row.cells()) {
                let text = cell.as_ref().map(|r| r.transcription()).unwrap_or("-");
                writeln!(out, "{model:<label_width$}: {text}").unwrap();
            }
            writeln!(out, "```").unwrap();

            self.render_diff_section(&mut out, models, row.cells(), label_width);
            self.render_translation_section(
                &mut out,
                models,
                row.cells(),
                sample,
                catalog,
                label_width,
            );

            writeln!(out).unwrap();
        }

        out
    }

    /// @ai:intent Word-diff section against golden expectations, if any
    /// @ai:effects pure
    fn render_diff_section(
        &self,
        out: &mut String,
        models: &[String],
        cells: &[Option<Record>],
        label_width: usize,
    ) {
        let has_expect = cells
            .iter()
            .any(|c| c.as_ref().is_some_and(|r| r.expect().is_some()));
        if !has_expect {
            return;
        }

        writeln!(out).unwrap();
        writeln!(out, "##### Diff vs expected").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "```text").unwrap();

        for (model, cell) in models.iter().zip(cells) {
            let line = match cell.as_ref().and_then(|r| r.expect().zip(Some(r))) {
                Some((expect, record)) => {
                    let tokens = self.diff.highlight(expect, record.transcription());
                    self.diff.render(&tokens)
                }
                None => "-".to_string(),
            };
            writeln!(out, "{model:<label_width$}: {line}").unwrap();
        }

        writeln!(out, "```").unwrap();
    }

    /// @ai:intent Translation section, rendered only when any model translated
    /// @ai:effects pure
    fn render_translation_section(
        &self,
        out: &mut String,
        models: &[String],
        cells: &[Option<Record>],
        sample: Option<&str>,
        catalog: &ReferenceCatalog,
        label_width: usize,
    ) {
        let any_translation = cells
            .iter()
            .any(|c| c.as_ref().is_some_and(|r| r.translation().is_some()));
        if !any_translation {
            return;
        }

        writeln!(out).unwrap();
        writeln!(out, "##### Translation").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "```text").unwrap();

        let reference = sample
            .and_then(|s| catalog.english_reference(s))
            .unwrap_or("");
        writeln!(out, "{:<label_width$}: {}", "reference", reference).unwrap();

        for (model, cell) in models.iter().zip(cells) {
            let text = cell.as_ref().and_then(|r| r.translation()).unwrap_or("-");
            writeln!(out, "{model:<label_width$}: {text}").unwrap();
        }

        writeln!(out, "```").unwrap();
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Render and write the report file
    /// @ai:effects fs:write
    fn generate(
        &self,
        aggregation: &Aggregation,
        catalog: &ReferenceCatalog,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.render(aggregation, catalog);
        std::fs::write(output_path, content)?;
        Ok(())
    }
}

/// @ai:intent Join per-model phase times, `-` for blanks and unmeasured
/// @ai:effects pure
fn join_times<F>(cells: &[Option<Record>], time: F) -> String
where
    F: Fn(&Record) -> Option<f64>,
{
    cells
        .iter()
        .map(|cell| match cell.as_ref().and_then(&time) {
            Some(secs) => format!("{secs:.1}s"),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
