//! Utility functions for Telegram HTML formatting.
//!
//! Outbound messages use HTML parse mode for the small markup set the bot
//! emits (bold, link). Any text that came from the remote provider or from a
//! user must be escaped before interpolation.

/// Escapes the three characters with special meaning in Telegram's HTML mode.
///
/// # Example
/// ```
/// use timetable_bot::utils::html::escape_html;
///
/// assert_eq!(escape_html("AB&C <lab>"), "AB&amp;C &lt;lab&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
