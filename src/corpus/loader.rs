//! @ai:module:intent Corpus loader for audio samples and golden expectations
//! @ai:module:layer infrastructure
//! @ai:module:public_api CorpusLoader
//! @ai:module:stateless true

use crate::config::CorpusFilter;
use crate::corpus::item::CorpusItem;
use crate::error::CorpusError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// Audio extensions recognized as corpus inputs.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac"];

/// @ai:intent Trait for loading the benchmark corpus
pub trait CorpusLoaderTrait: Send + Sync {
    /// @ai:intent Load all corpus items from a directory
    fn load_all(&self, corpus_dir: &Path) -> Result<Vec<CorpusItem>, CorpusError>;

    /// @ai:intent Load corpus items matching filter criteria
    fn load_filtered(
        &self,
        corpus_dir: &Path,
        filter: &CorpusFilter,
    ) -> Result<Vec<CorpusItem>, CorpusError>;
}

/// @ai:intent Expectations manifest structure from TOML file
#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    item: Vec<ManifestEntry>,
}

/// @ai:intent One golden-text entry in the expectations manifest
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    file: String,
    expect: Option<String>,
    note: Option<String>,
}

/// @ai:intent Loads corpus items by scanning a directory of audio samples
///
/// Item identity comes from the `<sample-name>-<lang-suffix>.<ext>` file
/// name convention. Golden expectations are attached from an optional
/// TOML manifest; files without an entry load with no expectations,
/// which is not an error.
pub struct CorpusLoader {
    expectations: HashMap<String, (Option<String>, Option<String>)>,
}

impl CorpusLoader {
    /// @ai:intent Create a loader with no expectations manifest
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            expectations: HashMap::new(),
        }
    }

    /// @ai:intent Create a loader with expectations from a TOML manifest
    /// @ai:effects fs:read
    pub fn with_manifest(path: &Path) -> Result<Self, CorpusError> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::BadManifest {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let manifest: ManifestFile =
            toml::from_str(&content).map_err(|e| CorpusError::BadManifest {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        let expectations = manifest
            .item
            .into_iter()
            .map(|entry| (entry.file, (entry.expect, entry.note)))
            .collect();

        Ok(Self { expectations })
    }

    /// @ai:intent Check whether a path looks like a corpus audio file
    /// @ai:effects pure
    fn is_audio(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusLoaderTrait for CorpusLoader {
    /// @ai:intent Load all corpus items, sorted by file name
    /// @ai:effects fs:read
    fn load_all(&self, corpus_dir: &Path) -> Result<Vec<CorpusItem>, CorpusError> {
        if !corpus_dir.is_dir() {
            return Err(CorpusError::Unavailable(corpus_dir.to_path_buf()));
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(corpus_dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();

            if !path.is_file() || !Self::is_audio(path) {
                continue;
            }

            let Some(id) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(
                    "Skipping corpus file with non-UTF-8 name: {}",
                    path.display()
                );
                continue;
            };

            let mut item = CorpusItem::new(id, path);

            if let Some((expect, note)) = self.expectations.get(id) {
                item.expect = expect.clone();
                item.note = note.clone();
            }

            items.push(item);
        }

        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    /// @ai:intent Load corpus items matching filter criteria
    /// @ai:effects fs:read
    fn load_filtered(
        &self,
        corpus_dir: &Path,
        filter: &CorpusFilter,
    ) -> Result<Vec<CorpusItem>, CorpusError> {
        let all = self.load_all(corpus_dir)?;

        Ok(all
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::CanonicalLang;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_missing_corpus_dir_is_fatal() {
        let loader = CorpusLoader::new();
        let err = loader.load_all(Path::new("no-such-corpus")).unwrap_err();
        assert!(matches!(err, CorpusError::Unavailable(_)));
    }

    #[test]
    fn test_load_all_sorted_audio_only() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "serenity-zh.mp3");
        touch(temp.path(), "serenity-en.mp3");
        touch(temp.path(), "notes.txt");

        let loader = CorpusLoader::new();
        let items = loader.load_all(temp.path()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "serenity-en.mp3");
        assert_eq!(items[1].id, "serenity-zh.mp3");
        assert!(items[0].expect.is_none());
    }

    #[test]
    fn test_manifest_attaches_expectations() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "sample-zh-01.mp3");
        touch(temp.path(), "sample-en-01.mp3");

        let manifest = temp.path().join("expectations.toml");
        std::fs::write(
            &manifest,
            r#"
[[item]]
file = "sample-zh-01.mp3"
expect = "中文語音辨識測試"
note = "中文語音辨識測試"
"#,
        )
        .unwrap();

        let loader = CorpusLoader::with_manifest(&manifest).unwrap();
        let items = loader.load_all(temp.path()).unwrap();

        let zh = items.iter().find(|i| i.id == "sample-zh-01.mp3").unwrap();
        assert_eq!(zh.expect.as_deref(), Some("中文語音辨識測試"));

        let en = items.iter().find(|i| i.id == "sample-en-01.mp3").unwrap();
        assert!(en.expect.is_none());
    }

    #[test]
    fn test_load_filtered_by_lang() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "serenity-zh.mp3");
        touch(temp.path(), "serenity-th.mp3");

        let loader = CorpusLoader::new();
        let filter = CorpusFilter {
            langs: Some(vec!["th".to_string()]),
            ..Default::default()
        };

        let items = loader.load_filtered(temp.path(), &filter).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].lang_suffix(), Some(CanonicalLang::Th));
    }

    #[test]
    fn test_bad_manifest_is_error() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("expectations.toml");
        std::fs::write(&manifest, "not [ valid toml").unwrap();

        assert!(CorpusLoader::with_manifest(&manifest).is_err());
    }
}
