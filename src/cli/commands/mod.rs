//! CLI command implementations.

mod audio;
mod chunks;
mod config;
mod doctor;
mod notes;
mod questions;
mod serve;
mod transcript;

pub use audio::run_audio;
pub use chunks::run_chunks;
pub use config::run_config;
pub use doctor::run_doctor;
pub use notes::run_notes;
pub use questions::run_questions;
pub use serve::{router, run_serve, AppState};
pub use transcript::run_transcript;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;

/// Run pre-flight checks and build the production pipeline.
fn build_pipeline(operation: Operation, settings: Settings) -> anyhow::Result<Pipeline> {
    let credentials = match preflight::check(operation, &settings) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&e.to_string());
            Output::info("Run 'tubestudy doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };
    Ok(Pipeline::new(settings, &credentials)?)
}
