//! HTTP API server for web front-ends.
//!
//! Provides endpoints for questions, notes, and narrated audio.

use super::build_pipeline;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::StudyError;
use crate::pipeline::Pipeline;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, info_span, Instrument};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared application state.
pub struct AppState {
    pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let narration_ready = preflight::check(Operation::Narrate, &settings).map(|_| ());
    let pipeline = build_pipeline(Operation::Generate, settings)?;

    let app = router(Arc::new(AppState::new(pipeline)));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("tubestudy API server");
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Health", "GET  /health");
    Output::kv("Questions", "POST /generate-questions  (alias /mcq)");
    Output::kv("Notes", "POST /generate-notes      (alias /notes)");
    Output::kv("Audio", "POST /generate-audio      (alias /summary-audio)");
    if let Err(e) = narration_ready {
        Output::warning(&format!("{} Audio requests will fail.", e));
    }
    Output::info("Press Ctrl+C to stop the server.");

    info!("Serving on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all routes and CORS.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/generate-questions", post(generate_questions))
        .route("/generate-notes", post(generate_notes))
        .route("/generate-audio", post(generate_audio))
        .route("/mcq", post(generate_questions))
        .route("/notes", post(generate_notes))
        .route("/summary-audio", post(generate_audio))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
struct QuestionsRequest {
    link: String,
    #[serde(default)]
    num: Option<usize>,
    #[serde(default, alias = "diff")]
    difficulty: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtifactRequest {
    link: String,
    #[serde(default)]
    language: Option<String>,
    /// `json` returns text plus base64 bytes instead of a file download.
    #[serde(default)]
    format: Option<String>,
}

impl ArtifactRequest {
    fn wants_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

#[derive(Serialize)]
struct NotesJson {
    article: String,
    pdf_base64: String,
}

#[derive(Serialize)]
struct AudioJson {
    script: String,
    audio_base64: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP status for a pipeline error.
fn status_for(error: &StudyError) -> StatusCode {
    match error {
        StudyError::InvalidIdentifier(_) | StudyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StudyError::TranscriptUnavailable { .. } | StudyError::TranscriptTooShort { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: StudyError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    } else {
        info!("Request rejected: {}", error);
    }
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    let mut response = bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate_questions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionsRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("generate_questions", request_id = %request_id, link = %req.link);

    let response = async {
        let defaults = &state.pipeline.settings().questions;
        let num = req.num.unwrap_or(defaults.default_count);
        let difficulty = req
            .difficulty
            .clone()
            .unwrap_or_else(|| defaults.default_difficulty.clone());

        match state
            .pipeline
            .questions(&req.link, num, &difficulty, req.language.as_deref())
            .await
        {
            Ok(questions) => Json(questions).into_response(),
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await;

    with_request_id(response, &request_id)
}

async fn generate_notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArtifactRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("generate_notes", request_id = %request_id, link = %req.link);

    let response = async {
        match state.pipeline.notes(&req.link, req.language.as_deref()).await {
            Ok(notes) if req.wants_json() => Json(NotesJson {
                pdf_base64: base64::engine::general_purpose::STANDARD.encode(&notes.pdf),
                article: notes.article,
            })
            .into_response(),
            Ok(notes) => attachment(notes.pdf, "application/pdf", "notes.pdf"),
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await;

    with_request_id(response, &request_id)
}

async fn generate_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArtifactRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("generate_audio", request_id = %request_id, link = %req.link);

    let response = async {
        match state.pipeline.audio(&req.link, req.language.as_deref()).await {
            Ok(narration) if req.wants_json() => Json(AudioJson {
                audio_base64: base64::engine::general_purpose::STANDARD.encode(&narration.audio),
                script: narration.script,
            })
            .into_response(),
            Ok(narration) => attachment(narration.audio, "audio/mpeg", "summary_audio.mp3"),
            Err(e) => error_response(e),
        }
    }
    .instrument(span)
    .await;

    with_request_id(response, &request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::pipeline::Models;
    use crate::testing::{mcq_json, requested_count, FakeModel, FakeSpeech, FakeTranscripts};
    use crate::transcript::FetchFailure;

    fn lecture() -> String {
        (0..600).map(|i| format!("word{}.", i)).collect::<Vec<_>>().join(" ")
    }

    fn state(transcripts: FakeTranscripts) -> Arc<AppState> {
        let model = Arc::new(FakeModel::new(|prompt| {
            if prompt.contains("multiple-choice") {
                Ok(mcq_json(requested_count(prompt), "q"))
            } else if prompt.contains("spoken script") {
                Ok("Narration.".to_string())
            } else if prompt.contains("well-formatted article") {
                Ok("Title: Notes\nBody text here.\n- End of Document -".to_string())
            } else {
                Ok("Summary.".to_string())
            }
        }));
        let pipeline = Pipeline::with_components(
            Settings::default(),
            Prompts::default(),
            Arc::new(transcripts),
            Models::single(model),
            Arc::new(FakeSpeech::default()),
        );
        Arc::new(AppState::new(pipeline))
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&StudyError::InvalidIdentifier("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&StudyError::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&StudyError::TranscriptUnavailable {
                video_id: "x".into(),
                reason: "y".into()
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&StudyError::ScriptGenerationFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&StudyError::MalformedResponse("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&StudyError::Render("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_questions_request_accepts_diff_alias() {
        let req: QuestionsRequest =
            serde_json::from_str(r#"{"link": "dQw4w9WgXcQ", "num": 3, "diff": "hard"}"#).unwrap();
        assert_eq!(req.difficulty.as_deref(), Some("hard"));
        assert_eq!(req.num, Some(3));

        let req: QuestionsRequest = serde_json::from_str(r#"{"link": "dQw4w9WgXcQ"}"#).unwrap();
        assert!(req.num.is_none() && req.difficulty.is_none());
    }

    #[tokio::test]
    async fn test_questions_handler() {
        let req = QuestionsRequest {
            link: "dQw4w9WgXcQ".to_string(),
            num: Some(7),
            difficulty: None,
            language: None,
        };
        let response = generate_questions(State(state(FakeTranscripts::with_text(&lecture()))), Json(req)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_zero_questions_is_bad_request() {
        let req = QuestionsRequest {
            link: "dQw4w9WgXcQ".to_string(),
            num: Some(0),
            difficulty: None,
            language: None,
        };
        let response = generate_questions(State(state(FakeTranscripts::with_text(&lecture()))), Json(req)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notes_handler_returns_pdf_attachment() {
        let req = ArtifactRequest {
            link: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            language: None,
            format: None,
        };
        let response = generate_notes(State(state(FakeTranscripts::with_text(&lecture()))), Json(req)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"notes.pdf\""
        );
    }

    #[tokio::test]
    async fn test_audio_handler_disabled_transcript() {
        let req = ArtifactRequest {
            link: "dQw4w9WgXcQ".to_string(),
            language: None,
            format: None,
        };
        let response = generate_audio(
            State(state(FakeTranscripts::failing(FetchFailure::Disabled))),
            Json(req),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_audio_handler_returns_mp3() {
        let req = ArtifactRequest {
            link: "dQw4w9WgXcQ".to_string(),
            language: None,
            format: None,
        };
        let response = generate_audio(State(state(FakeTranscripts::with_text(&lecture()))), Json(req)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    }
}
