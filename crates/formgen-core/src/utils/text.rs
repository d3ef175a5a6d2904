//! String utility functions used when deriving labels and rendering markup.

use regex::Regex;
use std::sync::OnceLock;

/// Turns an identifier into a display label.
///
/// Underscores become spaces, camel-case boundaries are split, and every
/// word is title-cased.
///
/// # Examples
///
/// ```
/// use formgen_core::utils::text::prettify_name;
///
/// assert_eq!(prettify_name("first_name"), "First Name");
/// assert_eq!(prettify_name("UserInfo"), "User Info");
/// assert_eq!(prettify_name("email"), "Email");
/// ```
pub fn prettify_name(name: &str) -> String {
    static CAMEL: OnceLock<Regex> = OnceLock::new();
    let camel = CAMEL.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

    let spaced = camel.replace_all(name, "$1 $2");
    spaced
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| capfirst(&w.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use formgen_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Escapes the characters that are significant inside HTML attribute values
/// and text nodes.
///
/// # Examples
///
/// ```
/// use formgen_core::utils::text::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
