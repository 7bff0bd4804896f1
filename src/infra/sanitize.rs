//! Filename sanitization for note titles.

/// Name used when the input contains nothing usable as a filename.
pub const FALLBACK_FILENAME: &str = "Untitled";

/// Maximum length of a sanitized filename component, in characters.
const MAX_LENGTH: usize = 80;

/// Turns arbitrary title text into a safe filename component.
///
/// - Replaces characters illegal in filenames (`: / \ ? % * | " < >` and
///   control characters) with `_`
/// - Trims leading/trailing whitespace
/// - Truncates to 80 characters without leaving trailing whitespace
/// - Returns [`FALLBACK_FILENAME`] when the input has no legal character
///
/// Pure and infallible: every input yields a valid non-empty component.
///
/// # Examples
///
/// ```
/// use driftnote::infra::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Plans: 2024/Q3"), "Plans_ 2024_Q3");
/// assert_eq!(sanitize_filename(""), "Untitled");
/// assert_eq!(sanitize_filename("???"), "Untitled");
/// ```
pub fn sanitize_filename(text: &str) -> String {
    // Inputs made of nothing but illegal characters and whitespace would
    // sanitize to underscores alone; they get the fallback name instead.
    if text.chars().all(|c| is_illegal(c) || c.is_whitespace()) {
        return FALLBACK_FILENAME.to_string();
    }

    let replaced: String = text
        .chars()
        .map(|c| if is_illegal(c) { '_' } else { c })
        .collect();

    let truncated: String = replaced.trim().chars().take(MAX_LENGTH).collect();

    // Truncation can land on an interior space; re-trim so the result
    // never carries trailing whitespace.
    truncated.trim_end().to_string()
}

fn is_illegal(c: char) -> bool {
    matches!(c, ':' | '/' | '\\' | '?' | '%' | '*' | '|' | '"' | '<' | '>') || c.is_control()
}
