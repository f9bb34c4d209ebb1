//! Deterministic stand-ins for the network capabilities.

use crate::error::{Result, StudyError};
use crate::llm::LanguageModel;
use crate::speech::{SpeechSynthesizer, VoiceConfig};
use crate::transcript::{FetchFailure, TranscriptSegment, TranscriptSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transcript source returning a fixed result.
pub struct FakeTranscripts {
    result: std::result::Result<Vec<TranscriptSegment>, FetchFailure>,
}

impl FakeTranscripts {
    /// Serve `text` as caption segments of ten words each.
    pub fn with_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let segments = words
            .chunks(10)
            .enumerate()
            .map(|(i, w)| TranscriptSegment::new(w.join(" "), i as f64 * 3.0, 3.0))
            .collect();
        Self { result: Ok(segments) }
    }

    pub fn failing(failure: FetchFailure) -> Self {
        Self {
            result: Err(failure),
        }
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch_segments(
        &self,
        _video_id: &str,
        _language: &str,
    ) -> std::result::Result<Vec<TranscriptSegment>, FetchFailure> {
        self.result.clone()
    }
}

type Responder = Box<dyn Fn(&str) -> std::result::Result<String, String> + Send + Sync>;

/// Language model that answers from a closure or a queue, recording prompts.
pub struct FakeModel {
    responder: Responder,
    queue: Mutex<VecDeque<std::result::Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    /// Answer every prompt with `respond(prompt)`. `Err` becomes a generation failure.
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(respond),
            queue: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer prompts in order from `responses`, then fail.
    pub fn scripted(responses: Vec<std::result::Result<&str, &str>>) -> Self {
        let model = Self::new(|_| Err("script exhausted".to_string()));
        {
            let mut queue = model.queue.lock().unwrap();
            for response in responses {
                queue.push_back(response.map(str::to_string).map_err(str::to_string));
            }
        }
        model
    }

    /// Every prompt seen so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let queued = self.queue.lock().unwrap().pop_front();
        queued
            .unwrap_or_else(|| (self.responder)(prompt))
            .map_err(StudyError::Generation)
    }

    fn model(&self) -> &str {
        "fake"
    }
}

/// Build a JSON array of `n` well-formed questions tagged with `tag`.
pub fn mcq_json(n: usize, tag: &str) -> String {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "question": format!("{} question {}?", tag, i),
                "options": ["a", "b", "c", "d"],
                "answer": "a",
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Pull the `{{num}}` value back out of a rendered question prompt.
pub fn requested_count(prompt: &str) -> usize {
    prompt
        .split("Generate ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Synthesizer that echoes the text back as bytes.
#[derive(Default)]
pub struct FakeSpeech {
    fail: bool,
    calls: Mutex<Vec<(String, VoiceConfig)>>,
}

impl FakeSpeech {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, VoiceConfig)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.clone()));
        if self.fail {
            return Err(StudyError::Speech("fake synthesizer failure".to_string()));
        }
        let mut audio = b"ID3".to_vec();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }
}
