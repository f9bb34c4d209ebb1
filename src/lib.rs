//! tubestudy - study material from YouTube videos
//!
//! Turns a YouTube link into multiple-choice questions, a PDF of notes, or a
//! narrated MP3 summary, using the video's captions, an OpenAI-compatible
//! chat model, and Google Cloud Text-to-Speech.
//!
//! # Architecture
//!
//! - `video_source` - Link parsing and video ID validation
//! - `transcript` - Caption retrieval and edge trimming
//! - `chunking` - Length-dependent transcript chunking
//! - `llm` - Language model capability and chat client
//! - `speech` - Speech synthesis capability and Google TTS client
//! - `generate` - Question, notes, and narration generators
//! - `render` - Notes layout and PDF output
//! - `pipeline` - End-to-end coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tubestudy::config::{Credentials, Settings};
//! use tubestudy::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env(&settings)?;
//!     let pipeline = Pipeline::new(settings, &credentials)?;
//!
//!     let questions = pipeline
//!         .questions("https://youtu.be/dQw4w9WgXcQ", 10, "medium", None)
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&questions)?);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod render;
pub mod speech;
pub mod transcript;
pub mod video_source;

#[cfg(test)]
mod testing;

pub use error::{Result, StudyError};
