//! Text neutralisation for untrusted request values
//!
//! Values read from request parameters are cleaned once on the way in
//! (`sanitize_text_field`) and escaped on the way out to HTML (`escape_html`).
//! Store queries never see raw text concatenated into SQL; they bind values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_STYLE_RE: Regex =
        Regex::new(r"(?is)<script[^>]*?>.*?</script\s*>|<style[^>]*?>.*?</style\s*>")
            .expect("valid script/style pattern");
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>?").expect("valid tag pattern");
    static ref OCTET_RE: Regex = Regex::new(r"%[a-fA-F0-9]{2}").expect("valid octet pattern");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Clean a single-line text value from user input
///
/// Strips markup (including the bodies of `<script>`/`<style>` elements),
/// percent-encoded octets and control characters, collapses runs of
/// whitespace to one space and trims the result.
///
/// # Examples
/// ```
/// use origin_filter::utils::text::sanitize_text_field;
///
/// assert_eq!(sanitize_text_field("  google \n"), "google");
/// assert_eq!(sanitize_text_field("<b>bing</b>"), "bing");
/// assert_eq!(sanitize_text_field("news%0Aletter"), "newsletter");
/// ```
pub fn sanitize_text_field(raw: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(raw, "");
    let without_tags = TAG_RE.replace_all(&without_scripts, "");

    // Removing one octet can expose another (e.g. "%%4141")
    let mut text = without_tags.into_owned();
    while OCTET_RE.is_match(&text) {
        text = OCTET_RE.replace_all(&text, "").into_owned();
    }

    let printable: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    WHITESPACE_RE
        .replace_all(&printable, " ")
        .trim()
        .to_string()
}

/// Escape text for embedding in HTML text nodes and quoted attributes
///
/// # Examples
/// ```
/// use origin_filter::utils::text::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
