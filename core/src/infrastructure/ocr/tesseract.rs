use std::process::Stdio;

use bytes::Bytes;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, error, instrument};

use crate::domain::{
    common::{OcrConfig, entities::app_errors::CoreError},
    label_analysis::ports::TextExtractor,
};

/// Runs the Tesseract CLI, piping the image through stdin and reading text from stdout.
#[derive(Debug, Clone)]
pub struct TesseractTextExtractor {
    binary: String,
    oem: u8,
    psm: u8,
    char_whitelist: Option<String>,
}

impl TesseractTextExtractor {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.tesseract_path.clone(),
            oem: config.oem,
            psm: config.psm,
            char_whitelist: config
                .char_whitelist
                .clone()
                .filter(|chars| !chars.is_empty()),
        }
    }

    fn recognition_args(&self) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
        ];

        if let Some(chars) = &self.char_whitelist {
            args.push("-c".to_string());
            args.push(format!("tessedit_char_whitelist={chars}"));
        }

        args
    }
}

fn extraction_error(context: &str, e: impl std::fmt::Display) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::ExtractionError(format!("{}: {}", context, e))
}

impl TextExtractor for TesseractTextExtractor {
    #[instrument(skip(self, image), fields(size = image.len()))]
    async fn extract_text(&self, image: Bytes) -> Result<String, CoreError> {
        let mut child = Command::new(&self.binary)
            .args(self.recognition_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| extraction_error("Failed to start tesseract", e))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CoreError::ExtractionError("tesseract stdin unavailable".to_string()))?;
        stdin
            .write_all(&image)
            .await
            .map_err(|e| extraction_error("Failed to send image to tesseract", e))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| extraction_error("Failed to read tesseract output", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(extraction_error(
                &format!("tesseract exited with {}", output.status),
                stderr.trim(),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "Extracted label text");

        Ok(text)
    }

    async fn engine_version(&self) -> Result<String, CoreError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| extraction_error("Tesseract not available", e))?;

        if !output.status.success() {
            return Err(CoreError::ExtractionError(format!(
                "tesseract --version exited with {}",
                output.status
            )));
        }

        // Older releases print the banner on stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        Ok(String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or("tesseract")
            .trim()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognition_args_follow_config() {
        let extractor = TesseractTextExtractor::new(&OcrConfig {
            tesseract_path: "tesseract".to_string(),
            oem: 3,
            psm: 6,
            char_whitelist: None,
        });

        assert_eq!(
            extractor.recognition_args(),
            vec!["stdin", "stdout", "--oem", "3", "--psm", "6"]
        );
    }

    #[test]
    fn char_whitelist_becomes_a_config_variable() {
        let extractor = TesseractTextExtractor::new(&OcrConfig {
            tesseract_path: "tesseract".to_string(),
            oem: 1,
            psm: 4,
            char_whitelist: Some("0123456789%".to_string()),
        });

        assert_eq!(
            extractor.recognition_args(),
            vec![
                "stdin",
                "stdout",
                "--oem",
                "1",
                "--psm",
                "4",
                "-c",
                "tessedit_char_whitelist=0123456789%"
            ]
        );

        let blank = TesseractTextExtractor::new(&OcrConfig {
            tesseract_path: "tesseract".to_string(),
            oem: 3,
            psm: 6,
            char_whitelist: Some(String::new()),
        });
        assert_eq!(blank.recognition_args().len(), 6);
    }

    #[tokio::test]
    async fn missing_binary_is_an_extraction_error() {
        let extractor = TesseractTextExtractor::new(&OcrConfig {
            tesseract_path: "/nonexistent/tesseract-binary".to_string(),
            oem: 3,
            psm: 6,
            char_whitelist: None,
        });

        let result = extractor.extract_text(Bytes::from_static(b"png")).await;
        assert!(matches!(result, Err(CoreError::ExtractionError(_))));

        let version = extractor.engine_version().await;
        assert!(matches!(version, Err(CoreError::ExtractionError(_))));
    }
}
