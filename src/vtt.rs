use std::sync::LazyLock;

use regex::Regex;

static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Normalize raw WebVTT caption data into single-line prose.
///
/// Drops the WEBVTT header block, `::cue` style rules, cue-timing lines, and
/// numeric cue identifiers; strips inline markup tags and decodes HTML
/// entities in the cue text. Overlapping cues repeat their text on adjacent
/// lines, so consecutive duplicates collapse to the first occurrence.
///
/// Idempotent: normalizing already-normalized text returns it unchanged.
/// Empty input yields an empty string.
pub fn normalize(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in raw.lines() {
        if is_structural(line) {
            continue;
        }
        let stripped = INLINE_TAG_RE.replace_all(line, "");
        let text = html_escape::decode_html_entities(stripped.trim()).trim().to_string();
        if text.is_empty() {
            continue;
        }
        if lines.last().is_some_and(|prev| prev == &text) {
            continue;
        }
        lines.push(text);
    }

    lines.join(" ")
}

fn is_structural(line: &str) -> bool {
    let line = line.trim();
    line.contains("WEBVTT")
        || line.contains("-->")
        || line.contains("::cue")
        || line.starts_with("Kind:")
        || line.starts_with("Language:")
        || line.starts_with("NOTE")
        || line.starts_with("STYLE")
        // bare cue identifiers
        || (!line.is_empty() && line.chars().all(|c| c.is_ascii_digit()))
}
