//! The one sanctioned path for backend-supplied text into rendered markup.
//!
//! Every free-text field the backend can influence (file names, student
//! names, comments, error messages) must pass through [`escape_text`] before
//! it reaches an inner-html sink. Rendering escaped output through a plain
//! text node would double-escape it, so callers pair this with
//! `dangerous_inner_html` on the target element.

/// Neutralize markup-significant characters so `input` always displays
/// literally. Empty input yields an empty string.
#[must_use]
pub fn escape_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    ammonia::clean_text(input)
}
