//! Sanitization of model output before it is rendered as markup.
//!
//! Completion text is untrusted. Only a fixed set of formatting tags is
//! re-emitted, always without attributes. Every other tag is dropped,
//! `script` and `style` together with their content, and all text is
//! escaped.

const ALLOWED_TAGS: &[&str] = &["p", "br", "ul", "ol", "li", "strong", "em", "b", "i", "h3", "h4"];

const DROP_WITH_CONTENT: &[&str] = &["script", "style"];

/// Reduce untrusted completion text to safe HTML.
pub fn sanitize_html(raw: &str) -> String {
    let input = strip_code_fence(raw.trim());
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut open: Vec<String> = Vec::new();

    while let Some(start) = rest.find('<') {
        push_escaped(&mut out, &rest[..start]);
        let candidate = &rest[start..];

        if !looks_like_tag(candidate) {
            out.push_str("&lt;");
            rest = &candidate[1..];
            continue;
        }

        let Some(end) = candidate.find('>') else {
            push_escaped(&mut out, candidate);
            rest = "";
            break;
        };

        let tag = parse_tag(&candidate[1..end]);
        rest = &candidate[end + 1..];

        if !tag.closing && DROP_WITH_CONTENT.contains(&tag.name.as_str()) {
            rest = skip_past_closing(rest, &tag.name);
            continue;
        }
        if ALLOWED_TAGS.contains(&tag.name.as_str()) {
            match (tag.closing, tag.name.as_str()) {
                (true, "br") => {}
                (false, "br") => out.push_str("<br>"),
                (false, name) => {
                    out.push('<');
                    out.push_str(name);
                    out.push('>');
                    open.push(name.to_string());
                }
                (true, name) => {
                    // Closers without a matching opener are dropped.
                    if let Some(pos) = open.iter().rposition(|t| t == name) {
                        for inner in open.drain(pos..).rev() {
                            push_closing(&mut out, &inner);
                        }
                    }
                }
            }
        }
    }

    push_escaped(&mut out, rest);
    for name in open.into_iter().rev() {
        push_closing(&mut out, &name);
    }
    out.trim().to_string()
}

fn push_closing(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

struct Tag {
    name: String,
    closing: bool,
}

fn parse_tag(inner: &str) -> Tag {
    let inner = inner.trim();
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body.trim_start()),
        None => (false, inner),
    };
    let name = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    Tag { name, closing }
}

fn looks_like_tag(s: &str) -> bool {
    matches!(s[1..].chars().next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn skip_past_closing<'a>(rest: &'a str, name: &str) -> &'a str {
    let needle = format!("</{name}");
    let lower = rest.to_ascii_lowercase();
    match lower.find(&needle) {
        Some(pos) => match rest[pos..].find('>') {
            Some(end) => &rest[pos + end + 1..],
            None => "",
        },
        None => "",
    }
}

fn strip_code_fence(s: &str) -> &str {
    let Some(body) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string (e.g. "html") on the opening fence line.
    let body = match body.find('\n') {
        Some(newline) => &body[newline + 1..],
        None => body,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn is_entity(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let name = &s[1..end];
    let name = name.strip_prefix('#').unwrap_or(name);
    (1..=10).contains(&name.len()) && name.chars().all(|c| c.is_ascii_alphanumeric())
}

fn push_escaped(out: &mut String, text: &str) {
    for (idx, c) in text.char_indices() {
        match c {
            '&' if is_entity(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_tags_pass_without_attributes() {
        let html = r#"<p class="x" onclick="evil()">Risk is <strong>high</strong>.</p>"#;
        assert_eq!(sanitize_html(html), "<p>Risk is <strong>high</strong>.</p>");
    }

    #[test]
    fn test_script_dropped_with_content() {
        let html = "<p>ok</p><script>alert('x')</script><p>done</p>";
        assert_eq!(sanitize_html(html), "<p>ok</p><p>done</p>");
    }

    #[test]
    fn test_unknown_tags_keep_text() {
        let html = r#"<div><a href="javascript:alert(1)">Buy a filter</a></div>"#;
        assert_eq!(sanitize_html(html), "Buy a filter");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(sanitize_html("HI < 1 & \"safe\""), "HI &lt; 1 &amp; &quot;safe&quot;");
        assert_eq!(sanitize_html("unterminated <p"), "unterminated &lt;p");
    }

    #[test]
    fn test_entities_are_preserved() {
        assert_eq!(sanitize_html("RO &amp; carbon"), "RO &amp; carbon");
    }

    #[test]
    fn test_code_fence_stripped() {
        let raw = "```html\n<p>Use an RO filter.</p>\n```";
        assert_eq!(sanitize_html(raw), "<p>Use an RO filter.</p>");
    }

    #[test]
    fn test_unmatched_closers_dropped() {
        assert_eq!(sanitize_html("<p>a</p></ul></div>x"), "<p>a</p>x");
        assert_eq!(sanitize_html("</p><p>a"), "<p>a</p>");
    }

    #[test]
    fn test_misnested_tags_closed_in_order() {
        assert_eq!(
            sanitize_html("<ul><li><strong>Boil water</ul>"),
            "<ul><li><strong>Boil water</strong></li></ul>"
        );
    }

    #[test]
    fn test_line_breaks_and_lists() {
        let raw = "<ul><li>Tip one<br/></li><LI>Tip two</Li></ul>";
        assert_eq!(sanitize_html(raw), "<ul><li>Tip one<br></li><li>Tip two</li></ul>");
    }
}
