//! @ai:module:intent Configuration structs for the benchmark harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, RunConfig, ModelConfig, CorpusFilter
//! @ai:module:stateless true

use crate::corpus::CorpusItem;
use crate::lang::LanguageNormalizer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the benchmark harness
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default = "default_models", rename = "model")]
    pub models: Vec<ModelConfig>,
    #[serde(default)]
    pub paths: PathConfig,
}

/// @ai:intent Run configuration for benchmark execution
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub translate: bool,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub filter: CorpusFilter,
}

/// @ai:intent Which backend implementation drives a configured model
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    WhisperCli,
    Http,
    Mock,
}

/// @ai:intent One model under test: an id plus how to reach it
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: String,
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    /// Base URL, for the `http` backend.
    pub endpoint: Option<String>,
    /// Executable name, for the `whisper-cli` backend.
    pub command: Option<String>,
}

/// @ai:intent Path configuration for input/output directories
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Golden-text manifest; omit to run without expectations.
    pub expectations_file: Option<PathBuf>,
    /// Reference phrase catalog; omit to use the built-in one.
    pub catalog_file: Option<PathBuf>,
}

/// @ai:intent Filter for selecting a subset of the corpus
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusFilter {
    pub samples: Option<Vec<String>>,
    pub langs: Option<Vec<String>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            translate: false,
            target_lang: default_target_lang(),
            dry_run: false,
            filter: CorpusFilter::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            results_dir: default_results_dir(),
            expectations_file: None,
            catalog_file: None,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            models: default_models(),
            paths: PathConfig::default(),
        }
    }
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_backend() -> BackendKind {
    BackendKind::WhisperCli
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("test-data")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_models() -> Vec<ModelConfig> {
    vec![ModelConfig {
        id: "tiny".to_string(),
        backend: BackendKind::WhisperCli,
        endpoint: None,
        command: None,
    }]
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl CorpusFilter {
    /// @ai:intent Check if the filter selects a corpus item
    ///
    /// Filter languages go through the same normalization as backend
    /// codes, so `yue` selects the same items as `zh`. Items whose names
    /// do not follow the naming convention match an unset filter only.
    /// @ai:effects pure
    pub fn matches(&self, item: &CorpusItem) -> bool {
        let sample_match = self
            .samples
            .as_ref()
            .map(|samples| {
                item.sample_name()
                    .is_some_and(|name| samples.iter().any(|s| s == name))
            })
            .unwrap_or(true);

        let lang_match = self
            .langs
            .as_ref()
            .map(|langs| {
                item.lang_suffix().is_some_and(|lang| {
                    langs
                        .iter()
                        .any(|l| LanguageNormalizer::lookup(l) == Some(lang))
                })
            })
            .unwrap_or(true);

        sample_match && lang_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(id: &str) -> CorpusItem {
        CorpusItem::new(id, format!("test-data/{id}"))
    }

    #[test]
    fn test_filter_matches_all_when_empty() {
        let filter = CorpusFilter::default();
        assert!(filter.matches(&item("serenity-zh.mp3")));
        assert!(filter.matches(&item("recording.mp3")));
    }

    #[test]
    fn test_filter_by_sample_name() {
        let filter = CorpusFilter {
            samples: Some(vec!["serenity".to_string()]),
            ..Default::default()
        };
        assert!(filter.matches(&item("serenity-zh.mp3")));
        assert!(!filter.matches(&item("spiderman-zh.mp3")));
        assert!(!filter.matches(&item("recording.mp3")));
    }

    #[test]
    fn test_filter_lang_is_normalized() {
        let filter = CorpusFilter {
            langs: Some(vec!["yue".to_string()]),
            ..Default::default()
        };
        assert!(filter.matches(&item("serenity-zh.mp3")));
        assert!(!filter.matches(&item("serenity-th.mp3")));
    }

    #[test]
    fn test_filter_combines_criteria() {
        let filter = CorpusFilter {
            samples: Some(vec!["serenity".to_string()]),
            langs: Some(vec!["th".to_string()]),
        };
        assert!(filter.matches(&item("serenity-th.mp3")));
        assert!(!filter.matches(&item("serenity-zh.mp3")));
        assert!(!filter.matches(&item("thinking-th.mp3")));
    }

    #[test]
    fn test_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("benchmark.toml");

        let config = BenchmarkConfig::default();
        config.save(&path).unwrap();

        let loaded = BenchmarkConfig::load(&path).unwrap();
        assert_eq!(loaded.models.len(), config.models.len());
        assert_eq!(loaded.run.target_lang, "en");
        assert_eq!(loaded.paths.corpus_dir, PathBuf::from("test-data"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("benchmark.toml");
        std::fs::write(
            &path,
            r#"
[[model]]
id = "m4t-large"
backend = "http"
endpoint = "http://localhost:8080"

[run]
translate = true
"#,
        )
        .unwrap();

        let config = BenchmarkConfig::load(&path).unwrap();
        assert_eq!(config.models[0].id, "m4t-large");
        assert_eq!(config.models[0].backend, BackendKind::Http);
        assert!(config.run.translate);
        assert_eq!(config.run.target_lang, "en");
        assert!(!config.run.dry_run);
    }
}
