//! Pipeline facade for tubestudy.
//!
//! Every entry point runs the same front half: resolve the link, fetch and
//! trim the transcript, chunk it. The back half hands the chunks to a freshly
//! built generator for the requested artifact.

use crate::chunking::{ChunkSet, TextChunker};
use crate::config::{Credentials, Prompts, Settings};
use crate::error::{Result, StudyError};
use crate::generate::{
    McqItem, NotesArtifact, NotesGenerator, QuestionSetGenerator, VoiceArtifact,
    VoiceSummaryGenerator,
};
use crate::llm::{ChatModel, LanguageModel};
use crate::speech::{GoogleSpeech, SpeechSynthesizer, VoiceConfig};
use crate::transcript::{TranscriptFetcher, TranscriptSource, YoutubeCaptions};
use crate::video_source::VideoReference;
use std::sync::Arc;
use tracing::{info, instrument};

/// The language models used for each artifact.
#[derive(Clone)]
pub struct Models {
    pub questions: Arc<dyn LanguageModel>,
    pub notes: Arc<dyn LanguageModel>,
    pub voice: Arc<dyn LanguageModel>,
}

impl Models {
    /// Use one model for every artifact.
    pub fn single(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            questions: model.clone(),
            notes: model.clone(),
            voice: model,
        }
    }
}

/// Turns a video link into study artifacts.
pub struct Pipeline {
    settings: Settings,
    prompts: Prompts,
    fetcher: TranscriptFetcher,
    chunker: TextChunker,
    models: Models,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl Pipeline {
    /// Build the pipeline with the production clients.
    pub fn new(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let llm = &settings.llm;
        info!(
            "Using models {} (questions), {} (notes), {} (voice) at {}",
            llm.question_model, llm.notes_model, llm.voice_model, llm.api_base
        );
        let models = Models {
            questions: Arc::new(ChatModel::new(llm, credentials, &llm.question_model)?),
            notes: Arc::new(ChatModel::new(llm, credentials, &llm.notes_model)?),
            voice: Arc::new(ChatModel::new(llm, credentials, &llm.voice_model)?),
        };

        let speech = Arc::new(GoogleSpeech::new(
            &settings.tts.endpoint,
            credentials.tts_credentials_path.clone(),
        ));

        Ok(Self::with_components(
            settings,
            prompts,
            Arc::new(YoutubeCaptions::new()),
            models,
            speech,
        ))
    }

    /// Build the pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptSource>,
        models: Models,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        let fetcher = TranscriptFetcher::new(transcripts, settings.transcript.edge_words);
        let chunker = TextChunker::new(settings.chunking.unit_size, settings.chunking.unit_overlap);

        Self {
            settings,
            prompts,
            fetcher,
            chunker,
            models,
            speech,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve a link in `language`, or the configured default.
    pub fn resolve(&self, link: &str, language: Option<&str>) -> Result<VideoReference> {
        let language = language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(self.settings.transcript.language.as_str());
        VideoReference::new(link, language)
    }

    /// The trimmed transcript for a link.
    #[instrument(skip(self))]
    pub async fn transcript(&self, link: &str, language: Option<&str>) -> Result<String> {
        let video = self.resolve(link, language)?;
        self.fetcher.fetch(&video).await.into_text(video.video_id())
    }

    /// The chunk plan for a link.
    #[instrument(skip(self))]
    pub async fn chunks(&self, link: &str, language: Option<&str>) -> Result<ChunkSet> {
        let text = self.transcript(link, language).await?;
        let chunks = self.chunker.chunk(&text);
        info!("Chunked transcript into {} groups", chunks.len());
        Ok(chunks)
    }

    /// Generate `num` multiple-choice questions.
    #[instrument(skip(self))]
    pub async fn questions(
        &self,
        link: &str,
        num: usize,
        difficulty: &str,
        language: Option<&str>,
    ) -> Result<Vec<McqItem>> {
        if num == 0 {
            return Err(StudyError::InvalidInput(
                "number of questions must be at least 1".to_string(),
            ));
        }

        let chunks = self.chunks(link, language).await?;
        let generator = QuestionSetGenerator::new(
            self.models.questions.clone(),
            self.prompts.clone(),
            self.settings.questions.remainder,
        );
        let questions = generator.generate(&chunks, num, difficulty).await?;
        info!("Generated {} questions", questions.len());
        Ok(questions)
    }

    /// Generate the notes article and PDF.
    #[instrument(skip(self))]
    pub async fn notes(&self, link: &str, language: Option<&str>) -> Result<NotesArtifact> {
        let chunks = self.chunks(link, language).await?;
        let generator = NotesGenerator::new(
            self.models.notes.clone(),
            self.prompts.clone(),
            self.settings.notes.token_budget,
        );
        generator.generate(&chunks).await
    }

    /// Generate the narration script and its audio.
    #[instrument(skip(self))]
    pub async fn audio(&self, link: &str, language: Option<&str>) -> Result<VoiceArtifact> {
        let chunks = self.chunks(link, language).await?;
        let generator = VoiceSummaryGenerator::new(
            self.models.voice.clone(),
            self.speech.clone(),
            self.prompts.clone(),
            VoiceConfig::from(&self.settings.voice),
            self.settings.voice.char_budget,
        );

        let script = generator
            .generate_script(&chunks)
            .await
            .ok_or(StudyError::ScriptGenerationFailed)?;
        let audio = generator.synthesize(&script).await?;
        info!("Synthesized {} bytes of narration", audio.len());

        Ok(VoiceArtifact { script, audio })
    }
}
