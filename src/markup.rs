//! Inline markup transformer.
//!
//! Pure function from (raw text, ordered tag sequence) to a marked-up
//! string. The fold runs left-to-right in selection order, so a later tag
//! wraps everything the earlier tags produced. Raw text is HTML-escaped
//! once, before any wrapping; tags only ever add trusted markup around the
//! escaped content.

use serde::{Deserialize, Serialize};

/// A togglable text-decoration instruction. Closed set; unknown tag names
/// on the wire fail deserialization of the whole event.
///
/// `Hyperlink` carries its target explicitly. There is no default URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum MarkupTag {
    Bold,
    Italic,
    Strikethrough,
    Hyperlink { url: String },
    BulletedList,
    NumberedList,
    Blockquote,
    CodeSnippet,
    CodeBlock,
}

/// Escape the five HTML metacharacters. Applied to message text and to
/// hyperlink URLs before they are interpolated into markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Apply `tags` to `text` in order, each wrapping the accumulated result.
///
/// With an empty tag slice this returns the escaped text unchanged, which
/// is the identity for text containing no HTML metacharacters.
pub fn apply_formatting(text: &str, tags: &[MarkupTag]) -> String {
    let mut out = escape(text);
    for tag in tags {
        out = match tag {
            MarkupTag::Bold => format!("<strong>{out}</strong>"),
            MarkupTag::Italic => format!("<em>{out}</em>"),
            MarkupTag::Strikethrough => format!("<del>{out}</del>"),
            MarkupTag::Hyperlink { url } => format!(
                "<a href=\"{}\" style=\"text-decoration: underline; color: blue;\">{out}</a>",
                escape(url)
            ),
            MarkupTag::BulletedList => format!("<ul><li>{out}</li></ul>"),
            // Newlines in the accumulated string become item boundaries.
            MarkupTag::NumberedList => {
                format!("<ol><li>{}</li></ol>", out.replace('\n', "</li><li>"))
            }
            MarkupTag::Blockquote => format!("<blockquote>{out}</blockquote>"),
            MarkupTag::CodeSnippet => format!("<code>{out}</code>"),
            MarkupTag::CodeBlock => format!("<pre><code>{out}</code></pre>"),
        };
    }
    out
}
