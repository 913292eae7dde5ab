//! @ai:module:intent Speech-to-text benchmark harness library
//! @ai:module:layer application
//! @ai:module:public_api config, corpus, backend, runner, aggregate, report

pub mod aggregate;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod corpus;
pub mod diff;
pub mod error;
pub mod lang;
pub mod record;
pub mod report;
pub mod runner;

pub use aggregate::{AggregatedRow, Aggregation, ResultAggregator};
pub use backend::{Backend, HttpBackend, MockBackend, Transcription, WhisperCliBackend};
pub use catalog::ReferenceCatalog;
pub use config::BenchmarkConfig;
pub use corpus::{CorpusItem, CorpusLoader, CorpusLoaderTrait};
pub use diff::DiffHighlighter;
pub use error::{BackendError, CorpusError};
pub use lang::{CanonicalLang, LanguageNormalizer};
pub use record::{Record, RunOutcome, Skip};
pub use report::ReportGenerator;
pub use runner::{BatchDriver, BenchmarkContext};
