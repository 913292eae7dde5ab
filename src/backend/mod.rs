//! @ai:module:intent Backend capability interface for transcription and translation
//! @ai:module:layer domain
//! @ai:module:public_api Backend, Transcription, MockBackend

pub mod http;
pub mod whisper_cli;

pub use http::HttpBackend;
pub use whisper_cli::WhisperCliBackend;

use crate::error::BackendError;
use std::collections::HashMap;
use std::path::Path;

/// @ai:intent Transcription result from a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    pub text: String,
    /// Raw language code as the backend reported it; normalization
    /// happens later, at Record construction.
    pub language: String,
}

/// @ai:intent Polymorphic transcription/translation capability
///
/// The harness never cares whether the implementation holds a locally
/// loaded model across calls or hits a remote pipeline per call.
/// Failure must be signalled through `Err`; an empty-string success is
/// not a valid way to report one.
#[allow(async_fn_in_trait)]
pub trait Backend: Send + Sync {
    /// @ai:intent Transcribe an audio file, reporting the detected language
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, BackendError>;

    /// @ai:intent Whether this backend can translate text
    fn supports_translation(&self) -> bool {
        false
    }

    /// @ai:intent Translate text between languages
    async fn translate(
        &self,
        _text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, BackendError> {
        Err(BackendError::failure("backend does not support translation"))
    }
}

/// How a scripted mock call should fail.
#[derive(Debug, Clone)]
enum MockFailure {
    ResourceMissing,
    Internal(String),
}

/// @ai:intent Scripted backend for tests and dry runs
pub struct MockBackend {
    default_text: String,
    default_lang: String,
    responses: HashMap<String, (String, String)>,
    failures: HashMap<String, MockFailure>,
}

impl MockBackend {
    /// @ai:intent Create a mock returning a fixed transcription
    /// @ai:effects pure
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            default_text: text.into(),
            default_lang: lang.into(),
            responses: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// @ai:intent Script a per-file transcription response
    /// @ai:effects pure
    pub fn with_response(
        mut self,
        file_name: impl Into<String>,
        text: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        self.responses
            .insert(file_name.into(), (text.into(), lang.into()));
        self
    }

    /// @ai:intent Script a missing-resource failure for a file
    /// @ai:effects pure
    pub fn with_missing_resource(mut self, file_name: impl Into<String>) -> Self {
        self.failures
            .insert(file_name.into(), MockFailure::ResourceMissing);
        self
    }

    /// @ai:intent Script an internal backend failure for a file
    /// @ai:effects pure
    pub fn with_internal_failure(
        mut self,
        file_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.failures
            .insert(file_name.into(), MockFailure::Internal(reason.into()));
        self
    }

    fn file_name(audio: &Path) -> String {
        audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Backend for MockBackend {
    /// @ai:intent Return the scripted transcription for the file
    /// @ai:effects pure
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, BackendError> {
        let name = Self::file_name(audio);

        if let Some(failure) = self.failures.get(&name) {
            return Err(match failure {
                MockFailure::ResourceMissing => {
                    BackendError::ResourceMissing(audio.to_path_buf())
                }
                MockFailure::Internal(reason) => BackendError::failure(reason.clone()),
            });
        }

        let (text, language) = self
            .responses
            .get(&name)
            .cloned()
            .unwrap_or_else(|| (self.default_text.clone(), self.default_lang.clone()));

        Ok(Transcription { text, language })
    }

    fn supports_translation(&self) -> bool {
        true
    }

    /// @ai:intent Echo a marked translation for deterministic tests
    /// @ai:effects pure
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, BackendError> {
        Ok(format!("{} ({}→{})", text, source_lang, target_lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response() {
        let backend = MockBackend::new("hello world", "en");
        let result = backend.transcribe(Path::new("any-en.mp3")).await.unwrap();
        assert_eq!(result.text, "hello world");
        assert_eq!(result.language, "en");
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let backend =
            MockBackend::new("x", "en").with_missing_resource("sample-zh-01.mp3");

        let err = backend
            .transcribe(Path::new("test-data/sample-zh-01.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ResourceMissing(_)));
    }

    #[tokio::test]
    async fn test_mock_per_file_response() {
        let backend = MockBackend::new("fallback", "en").with_response(
            "serenity-ja.mp3",
            "痛みを感じる",
            "ja",
        );

        let result = backend
            .transcribe(Path::new("corpus/serenity-ja.mp3"))
            .await
            .unwrap();
        assert_eq!(result.language, "ja");
    }
}
