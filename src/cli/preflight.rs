//! Pre-flight checks before expensive operations.
//!
//! Validates that required keys and files are available before starting
//! operations that would otherwise fail midway through a run.

use crate::config::{Credentials, Settings};
use crate::error::{Result, StudyError};
use std::path::Path;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Questions and notes need the LLM key.
    Generate,
    /// Audio also needs the TTS service-account file.
    Narrate,
}

/// Run pre-flight checks for the given operation and return the resolved credentials.
pub fn check(operation: Operation, settings: &Settings) -> Result<Credentials> {
    let credentials = Credentials::from_env(settings)?;
    if operation == Operation::Narrate {
        check_credentials_file(&credentials.tts_credentials_path, &settings.tts.credentials_env)?;
    }
    Ok(credentials)
}

/// Check that the TTS service-account file exists.
pub fn check_credentials_file(path: &Path, env_var: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StudyError::Config(format!(
            "TTS credentials file not found at {}. Set {} to your service-account JSON key.",
            path.display(),
            env_var
        )))
    }
}
