//! @ai:module:intent HTTP inference endpoint backend
//! @ai:module:layer infrastructure
//! @ai:module:public_api HttpBackend
//! @ai:module:stateless false

use crate::backend::{Backend, Transcription};
use crate::error::BackendError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Backend that calls a remote/managed inference endpoint per call
///
/// Talks to a transcription server exposing `POST {base}/transcribe`
/// (raw audio body, JSON response) and `POST {base}/translate` (JSON in
/// and out). Nothing is held between calls beyond the HTTP client, so
/// there is no load cost to amortize.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

/// @ai:intent Transcription response body from the endpoint
#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
    language: String,
}

/// @ai:intent Translation request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    model: &'a str,
}

/// @ai:intent Translation response body from the endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    text: String,
}

impl HttpBackend {
    /// @ai:intent Create a backend for an endpoint and model name
    /// @ai:effects pure
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BackendError::failure_with("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }
}

impl Backend for HttpBackend {
    /// @ai:intent Send audio bytes to the endpoint and parse the result
    /// @ai:effects network, fs:read
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, BackendError> {
        let bytes = std::fs::read(audio)
            .map_err(|_| BackendError::ResourceMissing(audio.to_path_buf()))?;

        let url = format!("{}/transcribe", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("model", self.model.as_str())])
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| BackendError::failure_with("transcription request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::failure(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| BackendError::failure_with("malformed transcription response", e))?;

        Ok(Transcription {
            text: parsed.text,
            language: parsed.language,
        })
    }

    fn supports_translation(&self) -> bool {
        true
    }

    /// @ai:intent Translate text through the endpoint
    /// @ai:effects network
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, BackendError> {
        let url = format!("{}/translate", self.base_url);
        let request = TranslateRequest {
            text,
            source_lang,
            target_lang,
            model: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::failure_with("translation request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::failure(format!(
                "endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::failure_with("malformed translation response", e))?;

        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/", "m4t").unwrap();
        assert_eq!(backend.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_missing_audio_is_resource_missing() {
        let backend = HttpBackend::new("http://localhost:8080", "m4t").unwrap();
        let err = backend
            .transcribe(Path::new("no-such-dir/sample-zh-01.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::ResourceMissing(_)));
    }
}
