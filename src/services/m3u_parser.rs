use crate::models::Channel;

const EXTINF_TAG: &str = "#EXTINF:";

/// Extract the display name from an EXTINF line
/// Format: #EXTINF:duration tvg-id="..." group-title="...",Title
///
/// Attribute values may themselves contain commas, so the title is whatever
/// follows the *last* comma. Returns `None` when there is no comma or the
/// title is blank.
fn parse_extinf_name(line: &str) -> Option<&str> {
    let content = line.strip_prefix(EXTINF_TAG)?;
    let last_comma = content.rfind(',')?;
    let title = content[last_comma + 1..].trim();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Parse M3U/M3U8 text into channels, in input order
///
/// Lenient by construction: a `#EXTINF` with no following stream line is
/// dropped, a stream line with no pending `#EXTINF` is skipped, and other
/// `#` directives are ignored. Never fails.
pub fn parse(text: &str) -> Vec<Channel> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut channels = Vec::new();
    // Each EXTINF name pairs with at most one following stream line
    let mut pending_name: Option<&str> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(EXTINF_TAG) {
            pending_name = parse_extinf_name(trimmed);
            continue;
        }

        // #EXTM3U, #EXTGRP, #EXTVLCOPT, ...
        if trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = pending_name.take() {
            if let Some(channel) = Channel::new(name, trimmed) {
                channels.push(channel);
            }
        }
    }

    channels
}
