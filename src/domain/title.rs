//! Display-title derivation from note content.

/// Title used when content has no non-empty line to derive one from.
pub const FALLBACK_TITLE: &str = "Untitled Note";

/// Derives a display title from note content.
///
/// Takes the first line that is non-empty after trimming and applies light
/// Markdown normalization to it: a leading `#`+ heading marker is stripped,
/// and paired `**bold**` / `*italic*` delimiters are unwrapped, keeping the
/// inner text. Lines past the first non-empty one are never inspected.
///
/// Returns [`FALLBACK_TITLE`] when no usable line exists.
///
/// # Examples
///
/// ```
/// use driftnote::domain::extract_title;
///
/// assert_eq!(extract_title("\n\nHello"), "Hello");
/// assert_eq!(extract_title("# Heading\nbody"), "Heading");
/// assert_eq!(extract_title("**Bold** title"), "Bold title");
/// assert_eq!(extract_title(""), "Untitled Note");
/// ```
pub fn extract_title(content: &str) -> String {
    let Some(line) = content.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return FALLBACK_TITLE.to_string();
    };

    let line = strip_heading(line);
    let line = unwrap_emphasis(&unwrap_emphasis(line, "**"), "*");
    let line = line.trim();

    if line.is_empty() {
        // The line was markup only (e.g. a bare "#").
        FALLBACK_TITLE.to_string()
    } else {
        line.to_string()
    }
}

/// Counts whitespace-delimited tokens in the full content.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Strips a leading ATX heading marker (`#`, `##`, ...) and the whitespace
/// after it.
fn strip_heading(line: &str) -> &str {
    let stripped = line.trim_start_matches('#');
    if stripped.len() < line.len() {
        stripped.trim_start()
    } else {
        line
    }
}

/// Removes paired occurrences of `delim`, keeping the text between them.
/// An unpaired trailing delimiter is left in place.
fn unwrap_emphasis(line: &str, delim: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        let Some(close) = after.find(delim) else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&after[..close]);
        rest = &after[close + delim.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_content_uses_fallback() {
        assert_eq!(extract_title(""), FALLBACK_TITLE);
    }

    #[test]
    fn whitespace_only_content_uses_fallback() {
        assert_eq!(extract_title("   \n\t\n  "), FALLBACK_TITLE);
    }

    #[test]
    fn skips_leading_blank_lines() {
        assert_eq!(extract_title("\n\nHello"), "Hello");
    }

    #[test]
    fn first_line_is_trimmed() {
        assert_eq!(extract_title("  Grocery run  \nmore"), "Grocery run");
    }

    #[test]
    fn strips_heading_marker() {
        assert_eq!(extract_title("# Heading\nbody"), "Heading");
        assert_eq!(extract_title("### Deep heading"), "Deep heading");
    }

    #[test]
    fn strips_heading_marker_without_space() {
        assert_eq!(extract_title("#Heading"), "Heading");
    }

    #[test]
    fn bare_heading_marker_uses_fallback() {
        assert_eq!(extract_title("#\nbody"), FALLBACK_TITLE);
    }

    #[test]
    fn unwraps_bold() {
        assert_eq!(extract_title("**Bold** title"), "Bold title");
        assert_eq!(extract_title("**All bold**"), "All bold");
    }

    #[test]
    fn unwraps_italic() {
        assert_eq!(extract_title("*Italic* title"), "Italic title");
    }

    #[test]
    fn unwraps_bold_inside_heading() {
        assert_eq!(extract_title("## **Plans**"), "Plans");
    }

    #[test]
    fn lone_asterisk_is_preserved() {
        assert_eq!(extract_title("2 * 3"), "2 * 3");
    }

    #[test]
    fn never_reads_past_first_nonempty_line() {
        assert_eq!(extract_title("First\n# Second\nThird"), "First");
    }

    #[test]
    fn hash_in_middle_of_line_is_kept() {
        assert_eq!(extract_title("Issue #42"), "Issue #42");
    }

    #[test]
    fn word_count_empty() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n  "), 0);
    }

    #[test]
    fn word_count_counts_tokens() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("line one\nline two\n"), 4);
        assert_eq!(word_count("  spaced   out  "), 2);
    }
}
