//! Conversion between task content (an HTML fragment produced by a rich-text
//! editor) and the plain text shown and edited in the terminal.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(/?)\s*([a-z][a-z0-9]*)[^>]*>").expect("tag pattern is valid")
});

/// Tags that start a new line when they open
const BLOCK_TAGS: &[&str] = &["div", "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "tr"];

/// Render an HTML fragment as plain text.
///
/// `<br>` and block elements become line breaks, other tags are dropped and
/// the common character entities are decoded.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&decode_entities(&html[last..whole.start()]));
        last = whole.end();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        if name == "br" {
            out.push('\n');
        } else if !closing
            && BLOCK_TAGS.contains(&name.as_str())
            && !out.is_empty()
            && !out.ends_with('\n')
        {
            out.push('\n');
        }
    }
    out.push_str(&decode_entities(&html[last..]));
    out
}

/// Encode plain text as an HTML fragment: escape markup characters and turn
/// line breaks into `<br>`.
pub fn text_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// First non-empty line of the content's text, for one-line previews
pub fn preview(html: &str) -> String {
    html_to_text(html)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|&end| end <= 10) {
            Some(end) => {
                let entity = &tail[1..end];
                match decode_entity(entity) {
                    Some(c) => out.push(c),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("just words"), "just words");
    }

    #[test]
    fn inline_tags_are_dropped() {
        assert_eq!(html_to_text("a <b>bold</b> <i>move</i>"), "a bold move");
    }

    #[test]
    fn editor_divs_become_lines() {
        assert_eq!(
            html_to_text("first<div>second</div><div><br></div><div>fourth</div>"),
            "first\nsecond\n\nfourth"
        );
    }

    #[test]
    fn br_variants() {
        assert_eq!(html_to_text("a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            html_to_text("x &lt; y &amp;&amp; y&nbsp;&gt; z &#233;&#x41;"),
            "x < y && y > z éA"
        );
    }

    #[test]
    fn unknown_entities_are_kept() {
        assert_eq!(html_to_text("fish &chips; & more"), "fish &chips; & more");
    }

    #[test]
    fn text_to_html_escapes_and_breaks() {
        assert_eq!(text_to_html("a < b\n\"c\" & d"), "a &lt; b<br>&quot;c&quot; &amp; d");
    }

    #[test]
    fn text_survives_html_round_trip() {
        for text in ["one\ntwo", "tail\n", "<tag> & &amp;", "", "\n\nx"] {
            assert_eq!(html_to_text(&text_to_html(text)), text);
        }
    }

    #[test]
    fn preview_is_first_non_empty_line() {
        assert_eq!(preview("<div><br></div><div>  hello </div>next"), "hello");
        assert_eq!(preview(""), "");
    }
}
