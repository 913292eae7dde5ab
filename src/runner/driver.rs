//! @ai:module:intent Sequential batch driver for model sub-runs
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkContext, BatchDriver
//! @ai:module:stateless false

use crate::backend::Backend;
use crate::corpus::CorpusItem;
use crate::error::BackendError;
use crate::lang::LanguageNormalizer;
use crate::record::{Record, RunOutcome, Skip};
use crate::runner::invoker::TimedInvoker;
use std::time::{Duration, Instant};

/// @ai:intent Owns the loaded backend for one model's sub-run
///
/// Created before a model's sub-run with its load cost measured once,
/// then reused read-only across every item in that sub-run. Torn down
/// (dropped) when the sub-run ends.
pub struct BenchmarkContext<B: Backend> {
    model_id: String,
    backend: B,
    load_time: Duration,
}

impl<B: Backend> BenchmarkContext<B> {
    /// @ai:intent Build a context, timing the backend construction as load cost
    /// @ai:effects io
    pub fn create<F>(model_id: impl Into<String>, build: F) -> Result<Self, BackendError>
    where
        F: FnOnce() -> Result<B, BackendError>,
    {
        let start = Instant::now();
        let backend = build()?;
        let load_time = start.elapsed();

        Ok(Self {
            model_id: model_id.into(),
            backend,
            load_time,
        })
    }

    /// @ai:intent Wrap an already-loaded backend with a known load time
    /// @ai:effects pure
    pub fn with_load_time(model_id: impl Into<String>, backend: B, load_time: Duration) -> Self {
        Self {
            model_id: model_id.into(),
            backend,
            load_time,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn load_time(&self) -> Duration {
        self.load_time
    }
}

/// @ai:intent Drives (model, item) invocations through their state machine
///
/// Each pair moves `PENDING -> INVOKED -> RECORDED | SKIPPED`: a
/// successful call appends a [`Record`], a failed one logs the cause and
/// appends a [`Skip`]. Both terminal states are final — one attempt per
/// pair, no retries, no backoff — and a skipped pair never aborts the
/// batch. Items are processed strictly one at a time.
pub struct BatchDriver {
    invoker: TimedInvoker,
    normalizer: LanguageNormalizer,
    translate: bool,
    target_lang: String,
}

impl BatchDriver {
    /// @ai:intent Create a transcription-only driver
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            invoker: TimedInvoker::new(),
            normalizer: LanguageNormalizer::new(),
            translate: false,
            target_lang: "en".to_string(),
        }
    }

    /// @ai:intent Enable the translation phase toward a target language
    /// @ai:effects pure
    pub fn with_translation(mut self, target_lang: impl Into<String>) -> Self {
        self.translate = true;
        self.target_lang = target_lang.into();
        self
    }

    /// @ai:intent Run one model over every corpus item, appending outcomes
    /// @ai:effects io
    pub async fn run_model<B: Backend>(
        &self,
        ctx: &BenchmarkContext<B>,
        items: &[CorpusItem],
        outcome: &mut RunOutcome,
    ) {
        let total = items.len();

        for (index, item) in items.iter().enumerate() {
            tracing::info!(
                "[{}/{}] {} × {}",
                index + 1,
                total,
                ctx.model_id(),
                item.id
            );

            match self.run_pair(ctx, item).await {
                Ok(record) => outcome.push_record(record),
                Err(err) => {
                    tracing::warn!(
                        "Skipping item {} for model {}: {}",
                        item.id,
                        ctx.model_id(),
                        err
                    );
                    outcome.push_skip(Skip {
                        model: ctx.model_id().to_string(),
                        item_id: item.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    /// @ai:intent Invoke one (model, item) pair and build its Record
    /// @ai:effects io
    async fn run_pair<B: Backend>(
        &self,
        ctx: &BenchmarkContext<B>,
        item: &CorpusItem,
    ) -> Result<Record, BackendError> {
        let transcription = self
            .invoker
            .invoke(ctx.backend.transcribe(&item.path))
            .await?;

        let lang = self
            .normalizer
            .normalize(&transcription.value.language)
            .to_string();

        let mut builder = Record::builder(ctx.model_id(), &item.id)
            .lang(&transcription.value.language)
            .load_time(ctx.load_time().as_secs_f64())
            .transcription_time(transcription.elapsed.as_secs_f64())
            .transcription(&transcription.value.text)
            .expect_text(item.expect.clone())
            .note(item.note.clone());

        if self.translate && ctx.backend.supports_translation() {
            let translation = self
                .invoker
                .invoke(ctx.backend.translate(
                    &transcription.value.text,
                    &lang,
                    &self.target_lang,
                ))
                .await?;

            builder = builder
                .translation(translation.value)
                .translation_time(translation.elapsed.as_secs_f64());
        }

        builder
            .build()
            .map_err(|e| BackendError::failure(format!("record construction failed: {e}")))
    }
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    fn items(names: &[&str]) -> Vec<CorpusItem> {
        names
            .iter()
            .map(|n| CorpusItem::new(*n, format!("corpus/{n}")))
            .collect()
    }

    #[tokio::test]
    async fn test_success_and_skip_both_represented() {
        let backend = MockBackend::new("hello world", "en")
            .with_missing_resource("sample-zh-01.mp3");
        let ctx = BenchmarkContext::with_load_time("tiny", backend, Duration::from_secs(1));

        let driver = BatchDriver::new();
        let mut outcome = RunOutcome::new();
        driver
            .run_model(
                &ctx,
                &items(&["sample-zh-01.mp3", "sample-en-01.mp3"]),
                &mut outcome,
            )
            .await;

        assert_eq!(outcome.record_count(), 1);
        assert_eq!(outcome.skip_count(), 1);

        let skip = outcome.skips().next().unwrap();
        assert_eq!(skip.item_id, "sample-zh-01.mp3");
        assert_eq!(skip.model, "tiny");
        assert!(skip.reason.contains("resource missing"));
    }

    #[tokio::test]
    async fn test_record_carries_load_time_and_lang() {
        let backend = MockBackend::new("吃葡萄不吐葡萄皮", "yue");
        let ctx = BenchmarkContext::with_load_time("small", backend, Duration::from_millis(1500));

        let driver = BatchDriver::new();
        let mut outcome = RunOutcome::new();
        driver
            .run_model(&ctx, &items(&["sample-zh-02.mp3"]), &mut outcome)
            .await;

        let record = outcome.records().next().unwrap();
        assert_eq!(record.lang(), "zh");
        assert!((record.load_time() - 1.5).abs() < 1e-9);
        assert!(record.transcription_time() >= 0.0);
        assert_eq!(record.translation(), None);
    }

    #[tokio::test]
    async fn test_translation_phase_when_enabled() {
        let backend = MockBackend::new("能力越大，責任越大。", "zh");
        let ctx = BenchmarkContext::with_load_time("m4t", backend, Duration::ZERO);

        let driver = BatchDriver::new().with_translation("en");
        let mut outcome = RunOutcome::new();
        driver
            .run_model(&ctx, &items(&["spiderman-zh.mp3"]), &mut outcome)
            .await;

        let record = outcome.records().next().unwrap();
        assert_eq!(record.translation(), Some("能力越大，責任越大。 (zh→en)"));
        assert!(record.translation_time().is_some());
    }

    #[tokio::test]
    async fn test_failure_never_blocks_later_items() {
        let backend = MockBackend::new("ok", "en")
            .with_internal_failure("a-en.mp3", "model raised OOM")
            .with_internal_failure("b-en.mp3", "model raised OOM");
        let ctx = BenchmarkContext::with_load_time("tiny", backend, Duration::ZERO);

        let driver = BatchDriver::new();
        let mut outcome = RunOutcome::new();
        driver
            .run_model(
                &ctx,
                &items(&["a-en.mp3", "b-en.mp3", "c-en.mp3"]),
                &mut outcome,
            )
            .await;

        assert_eq!(outcome.skip_count(), 2);
        assert_eq!(outcome.record_count(), 1);
        assert_eq!(outcome.records().next().unwrap().item_id(), "c-en.mp3");
    }
}
