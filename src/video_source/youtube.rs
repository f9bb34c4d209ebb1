//! YouTube video ID extraction.

use crate::error::{Result, StudyError};
use url::Url;

/// Length of a YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// Path prefixes that carry the ID as the next segment on youtube.com.
const ID_PATH_PREFIXES: [&str; 4] = ["embed", "shorts", "live", "v"];

/// Extract the video ID from a watch URL, a youtu.be short link, or a bare ID.
///
/// Watch URLs use the `v` query parameter, short links use the path. Anything
/// else is taken as the ID itself.
pub fn resolve_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    let candidate = if input.contains("youtube.com") {
        parse_url(input).and_then(|url| watch_id(&url))
    } else if input.contains("youtu.be") {
        parse_url(input).map(|url| url.path().trim_matches('/').to_string())
    } else {
        Some(input.to_string())
    };

    match candidate {
        Some(id) if is_valid_id(&id) => Ok(id),
        Some(id) => Err(StudyError::InvalidIdentifier(id)),
        None => Err(StudyError::InvalidIdentifier(input.to_string())),
    }
}

fn parse_url(input: &str) -> Option<Url> {
    if input.contains("://") {
        Url::parse(input).ok()
    } else {
        Url::parse(&format!("https://{}", input)).ok()
    }
}

fn watch_id(url: &Url) -> Option<String> {
    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        return Some(v.into_owned());
    }

    let mut segments = url.path_segments()?;
    let first = segments.next()?;
    if ID_PATH_PREFIXES.contains(&first) {
        return segments.next().map(|s| s.to_string());
    }
    None
}

fn is_valid_id(id: &str) -> bool {
    id.chars().count() == VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_inputs_resolve_to_same_id() {
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abcdef",
            "youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
        ];

        for input in inputs {
            assert_eq!(resolve_video_id(input).unwrap(), "dQw4w9WgXcQ", "input: {}", input);
        }
    }

    #[test]
    fn test_ids_with_dash_and_underscore() {
        assert_eq!(resolve_video_id("a-b_c-d_e-f").unwrap(), "a-b_c-d_e-f");
    }

    #[test]
    fn test_invalid_inputs() {
        let inputs = [
            "",
            "not-a-video-id",
            "dQw4w9WgXc",
            "dQw4w9WgXcQQ",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/watch?v=short",
            "https://youtu.be/",
            "https://www.youtube.com/channel/UC1234567890",
            "dQw4w9 gXcQ",
        ];

        for input in inputs {
            let err = resolve_video_id(input).unwrap_err();
            assert!(
                matches!(err, StudyError::InvalidIdentifier(_)),
                "input: {}",
                input
            );
        }
    }
}
