//! Inline markers embedded in dialogue text.
//!
//! Mentor turns may carry `**bold**` emphasis and `[label](url)` links.
//! Renderers get a flat segment list; anything unmatched stays plain text.

/// A renderable slice of a dialogue turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Bold(String),
    Link { label: String, url: String },
}

/// Split `text` into segments. Bold markers are resolved first, then links
/// inside the remaining plain-text runs.
#[must_use]
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for piece in split_bold(text) {
        match piece {
            Segment::Text(plain) => split_links(&plain, &mut segments),
            other => segments.push(other),
        }
    }
    segments
}

fn split_bold(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if close == 0 {
            // "****" carries no content; treat the markers as literal text.
            break;
        }
        if open > 0 {
            out.push(Segment::Text(rest[..open].to_string()));
        }
        out.push(Segment::Bold(after_open[..close].to_string()));
        rest = &after_open[close + 2..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest.to_string()));
    }
    out
}

fn split_links(text: &str, out: &mut Vec<Segment>) {
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some((label, url, consumed)) = match_link(&rest[open..]) else {
            // No well-formed link from here on; emit the remainder verbatim.
            break;
        };
        if open > 0 {
            out.push(Segment::Text(rest[..open].to_string()));
        }
        out.push(Segment::Link { label, url });
        rest = &rest[open + consumed..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest.to_string()));
    }
}

/// Try to match `[label](url)` at the start of `s`; returns the parts and
/// the total byte length consumed.
fn match_link(s: &str) -> Option<(String, String, usize)> {
    debug_assert!(s.starts_with('['));
    let label_end = s.find(']')?;
    let after_label = &s[label_end + 1..];
    if !after_label.starts_with('(') {
        return None;
    }
    let url_end = after_label.find(')')?;
    let label = &s[1..label_end];
    let url = &after_label[1..url_end];
    if label.is_empty() || url.is_empty() {
        return None;
    }
    Some((
        label.to_string(),
        url.to_string(),
        label_end + 1 + url_end + 1,
    ))
}
