//! @ai:module:intent Local whisper CLI backend
//! @ai:module:layer infrastructure
//! @ai:module:public_api WhisperCliBackend
//! @ai:module:stateless true

use crate::backend::{Backend, Transcription};
use crate::error::BackendError;
use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Stdio};

/// @ai:intent Backend that shells out to a locally installed whisper CLI
///
/// Each call spawns `whisper <audio> --model <size> --output_format json`
/// and reads the JSON artifact the CLI writes next to its output
/// directory. The CLI holds the model weights locally; the harness
/// measures its warm-up separately as the model's load time.
///
/// Text translation is not supported here: the whisper CLI translates
/// audio, not text, so runs needing the translation phase pair this
/// backend with an endpoint that does.
pub struct WhisperCliBackend {
    command: String,
    model: String,
}

/// @ai:intent JSON artifact the whisper CLI writes per input file
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    text: String,
    language: String,
}

impl WhisperCliBackend {
    /// @ai:intent Create a backend for a whisper model size
    /// @ai:effects pure
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            command: "whisper".to_string(),
            model: model.into(),
        }
    }

    /// @ai:intent Override the CLI command name or path
    /// @ai:effects pure
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// @ai:intent Locate the JSON artifact for an input file
    /// @ai:effects pure
    fn output_json_path(output_dir: &Path, audio: &Path) -> Result<std::path::PathBuf, BackendError> {
        let stem = audio
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| BackendError::failure("audio path has no usable file stem"))?;
        Ok(output_dir.join(format!("{stem}.json")))
    }
}

impl Backend for WhisperCliBackend {
    /// @ai:intent Run the whisper CLI on one audio file
    /// @ai:effects io, fs:read, fs:write
    async fn transcribe(&self, audio: &Path) -> Result<Transcription, BackendError> {
        if !audio.exists() {
            return Err(BackendError::ResourceMissing(audio.to_path_buf()));
        }

        let output_dir = tempfile::tempdir()
            .map_err(|e| BackendError::failure_with("failed to create output dir", e))?;

        let output = Command::new(&self.command)
            .arg(audio)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(output_dir.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                BackendError::failure_with(
                    format!("failed to spawn `{}`. Is whisper installed?", self.command),
                    e,
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::failure(format!(
                "whisper exited with {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let json_path = Self::output_json_path(output_dir.path(), audio)?;
        let content = std::fs::read_to_string(&json_path).map_err(|e| {
            BackendError::failure_with(
                format!("whisper produced no JSON at {}", json_path.display()),
                e,
            )
        })?;

        let parsed: WhisperOutput = serde_json::from_str(&content)
            .map_err(|e| BackendError::failure_with("malformed whisper JSON output", e))?;

        Ok(Transcription {
            text: parsed.text.trim().to_string(),
            language: parsed.language,
        })
    }
}
