//! Parser for YouTube timed-text caption XML.

use super::TranscriptSegment;
use regex::Regex;
use std::sync::OnceLock;

fn text_element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<text\b([^>]*)>(.*?)</text>").expect("valid regex"))
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("valid regex"))
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

/// Parse `<text start=".." dur="..">..</text>` elements into segments.
///
/// Entities are decoded twice since caption bodies are usually HTML-escaped
/// inside the XML. Inline formatting tags are dropped and empty elements skipped.
pub fn parse_timed_text(xml: &str) -> Vec<TranscriptSegment> {
    text_element_regex()
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            let text = unescape(&unescape(body));
            let text = tag_regex().replace_all(&text, "");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }

            let mut start = 0.0;
            let mut duration = 0.0;
            for attr in attribute_regex().captures_iter(attrs) {
                match &attr[1] {
                    "start" => start = attr[2].parse().unwrap_or(0.0),
                    "dur" => duration = attr[2].parse().unwrap_or(0.0),
                    _ => {}
                }
            }

            Some(TranscriptSegment::new(text, start, duration))
        })
        .collect()
}

/// Decode the XML/HTML entities that show up in caption bodies.
fn unescape(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail.find(';').filter(|&end| end <= 10).and_then(|end| {
            let entity = &tail[1..end];
            decode_entity(entity).map(|c| (c, end + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_track() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
<text start="0.16" dur="2.5">Hey there</text>
<text start="2.66" dur="3.1">how&amp;#39;s it going</text>
<text start="5.76" dur="1.0"></text>
<text start="6.8">rust &amp;amp; &lt;i&gt;cargo&lt;/i&gt;</text>
</transcript>"#;

        let segments = parse_timed_text(xml);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], TranscriptSegment::new("Hey there", 0.16, 2.5));
        assert_eq!(segments[1].text, "how's it going");
        assert_eq!(segments[2].text, "rust & cargo");
        assert_eq!(segments[2].start, 6.8);
        assert_eq!(segments[2].duration, 0.0);
    }

    #[test]
    fn test_multiline_bodies_are_flattened() {
        let xml = "<transcript><text start=\"1\" dur=\"2\">line one\nline two</text></transcript>";
        let segments = parse_timed_text(xml);
        assert_eq!(segments[0].text, "line one line two");
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape("AT&T &bogus; &#8217;"), "AT&T &bogus; \u{2019}");
        assert_eq!(unescape("&#x41;&#66;"), "AB");
    }
}
