//! YouTube caption source backed by the innertube player API.

use super::{parse_timed_text, FetchFailure, TranscriptSegment, TranscriptSource};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches captions straight from YouTube.
pub struct YoutubeCaptions {
    http: reqwest::Client,
    api_key_regex: Regex,
}

impl YoutubeCaptions {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        let api_key_regex =
            Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("Invalid regex");
        Self {
            http,
            api_key_regex,
        }
    }

    async fn innertube_key(&self, video_id: &str) -> Result<String, FetchFailure> {
        let html = self
            .http
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;

        if html.contains("class=\"g-recaptcha\"") {
            return Err(FetchFailure::Transport(
                "YouTube is blocking requests from this IP (captcha)".to_string(),
            ));
        }

        self.api_key_regex
            .captures(&html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                FetchFailure::Transport("Could not find innertube API key on watch page".to_string())
            })
    }

    async fn player_response(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse, FetchFailure> {
        let body = json!({
            "context": { "client": { "clientName": CLIENT_NAME, "clientVersion": CLIENT_VERSION } },
            "videoId": video_id,
        });

        self.http
            .post(PLAYER_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport)?
            .json::<PlayerResponse>()
            .await
            .map_err(transport)
    }
}

impl Default for YoutubeCaptions {
    fn default() -> Self {
        Self::new()
    }
}

fn transport(e: reqwest::Error) -> FetchFailure {
    FetchFailure::Transport(e.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TrackList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackList {
    #[serde(default)]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Pick a track in `language`, preferring manual captions over generated ones.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .filter(|t| t.language_code == language)
        .min_by_key(|t| t.is_generated())
}

fn tracks_from(response: PlayerResponse) -> Result<Vec<CaptionTrack>, FetchFailure> {
    if let Some(status) = &response.playability_status {
        if status.status != "OK" {
            let reason = status.reason.clone().unwrap_or_else(|| status.status.clone());
            return Err(FetchFailure::Transport(format!("Video unplayable: {}", reason)));
        }
    }

    response
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|t| t.caption_tracks)
        .filter(|tracks| !tracks.is_empty())
        .ok_or(FetchFailure::Disabled)
}

#[async_trait]
impl TranscriptSource for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn fetch_segments(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, FetchFailure> {
        let api_key = self.innertube_key(video_id).await?;
        let response = self.player_response(video_id, &api_key).await?;
        let tracks = tracks_from(response)?;

        let track = select_track(&tracks, language).ok_or_else(|| FetchFailure::NotFound {
            available: tracks.iter().map(|t| t.language_code.clone()).collect(),
        })?;

        debug!(
            "Using {} '{}' track",
            if track.is_generated() { "generated" } else { "manual" },
            track.language_code
        );

        let url = track.base_url.replace("&fmt=srv3", "");
        let xml = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)?;

        Ok(parse_timed_text(&xml))
    }
}
