//! Search summary derivation for asset projections.
//!
//! The asset subsystem indexes a plain-text abstract of each task. The
//! abstract is the task description shortened to a bounded length at a word
//! boundary, with markup removed and basic entities decoded.

/// Maximum length, in characters, of a derived search summary.
pub const SUMMARY_LENGTH: usize = 500;

/// Derives the plain-text search summary for a task description.
///
/// An absent description yields an empty summary.
#[must_use]
pub fn asset_summary(description: Option<&str>) -> String {
    description.map_or_else(String::new, |text| {
        extract_text(&shorten(text, SUMMARY_LENGTH))
    })
}

/// Shortens `text` to at most `limit` characters, cutting at the last word
/// boundary inside the limit and appending an ellipsis marker.
#[must_use]
pub fn shorten(text: &str, limit: usize) -> String {
    const SUFFIX: &str = "...";

    if text.chars().count() <= limit {
        return text.to_owned();
    }

    let keep = limit.saturating_sub(SUFFIX.len());
    let truncated: String = text.chars().take(keep).collect();
    let base = truncated
        .rfind(char::is_whitespace)
        .and_then(|idx| truncated.get(..idx))
        .unwrap_or(truncated.as_str());
    let mut result = base.trim_end().to_owned();
    result.push_str(SUFFIX);
    result
}

/// Removes markup tags from `text` and decodes the common HTML entities,
/// collapsing runs of whitespace into single spaces.
#[must_use]
pub fn extract_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(ch),
        }
    }

    let decoded = decode_entities(&out);
    let mut collapsed = String::with_capacity(decoded.len());
    let mut last_was_space = false;
    for ch in decoded.chars() {
        if ch.is_whitespace() {
            if !last_was_space && !collapsed.is_empty() {
                collapsed.push(' ');
            }
            last_was_space = true;
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }
    collapsed.trim_end().to_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
