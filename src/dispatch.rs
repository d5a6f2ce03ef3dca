//! The tag dispatcher.
//!
//! Documents embed shortcodes as bracket-delimited tags:
//!
//! ```text
//! [quote author="Ada"]Computers are useless without programs.[/quote]
//! [divider]
//! [[literal]]            → emitted as [literal], never dispatched
//! ```
//!
//! The scanner walks the text once, expands registered tags through a
//! render callback, and leaves everything else byte-for-byte intact.
//! Unregistered tags pass through untouched. A paired tag closes at the
//! first matching `[/name]`; same-name nesting is not supported, matching
//! the dispatch semantics of the hosts this syntax comes from. Rendered
//! output is not re-scanned.

use indexmap::IndexMap;

use crate::error::Result;

/// Flat shortcode attributes as entered in the tag, in source order.
/// Attribute names are lowercased; values are kept verbatim.
pub type AttrMap = IndexMap<String, String>;

/// Expands every registered tag in `input`.
///
/// `registered` decides which tag names dispatch; `render` produces the
/// replacement for one tag invocation and receives the tag name, its
/// attributes, and the enclosed content (empty for unpaired tags).
pub fn expand_with<F, R>(input: &str, registered: F, render: &mut R) -> Result<String>
where
    F: Fn(&str) -> bool,
    R: FnMut(&str, &AttrMap, &str) -> Result<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        // [[tag]] escapes a literal tag: emit it minus one bracket per side.
        if tail.starts_with("[[") {
            if let Some(close) = tail.find("]]") {
                out.push_str(&tail[1..=close]);
                rest = &tail[close + 2..];
            } else {
                out.push_str(tail);
                rest = "";
            }
            continue;
        }

        let Some(opening) = parse_opening(tail) else {
            // Not a well-formed tag; emit the bracket and move on.
            out.push('[');
            rest = &tail[1..];
            continue;
        };

        if !registered(&opening.name) {
            out.push_str(&tail[..opening.consumed]);
            rest = &tail[opening.consumed..];
            continue;
        }

        let after = &tail[opening.consumed..];
        let closer = format!("[/{}]", opening.name);
        match (!opening.self_closing)
            .then(|| after.find(&closer))
            .flatten()
        {
            Some(close) => {
                let content = &after[..close];
                out.push_str(&render(&opening.name, &opening.attrs, content)?);
                rest = &after[close + closer.len()..];
            }
            None => {
                out.push_str(&render(&opening.name, &opening.attrs, "")?);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

struct Opening {
    name: String,
    attrs: AttrMap,
    consumed: usize,
    self_closing: bool,
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parses an opening tag at the start of `s` (which begins with `[`).
/// Returns `None` when the bracket does not open a well-formed tag.
fn parse_opening(s: &str) -> Option<Opening> {
    let mut i = 1;
    let mut name = String::new();
    while let Some(c) = s[i..].chars().next() {
        if !is_tag_char(c) {
            break;
        }
        name.push(c);
        i += c.len_utf8();
    }
    if name.is_empty() {
        return None;
    }

    let mut attrs = AttrMap::new();
    loop {
        let c = loop {
            match s[i..].chars().next() {
                None => return None, // unterminated tag
                Some(c) if c.is_whitespace() => i += c.len_utf8(),
                Some(c) => break c,
            }
        };

        if c == ']' {
            return Some(Opening {
                name,
                attrs,
                consumed: i + 1,
                self_closing: false,
            });
        }
        if c == '/' && s[i + 1..].starts_with(']') {
            return Some(Opening {
                name,
                attrs,
                consumed: i + 2,
                self_closing: true,
            });
        }

        let mut key = String::new();
        while let Some(c) = s[i..].chars().next() {
            if !is_tag_char(c) {
                break;
            }
            key.push(c);
            i += c.len_utf8();
        }
        if key.is_empty() {
            return None; // junk inside the tag
        }

        let mut value = String::new();
        if s[i..].starts_with('=') {
            i += 1;
            match s[i..].chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    i += 1;
                    let end = s[i..].find(quote)?;
                    value.push_str(&s[i..i + end]);
                    i += end + 1;
                }
                _ => {
                    while let Some(c) = s[i..].chars().next() {
                        if c.is_whitespace() || c == ']' {
                            break;
                        }
                        value.push(c);
                        i += c.len_utf8();
                    }
                }
            }
        }
        attrs.insert(key.to_ascii_lowercase(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: &str, tags: &[&str]) -> String {
        expand_with(
            input,
            |name| tags.contains(&name),
            &mut |name, attrs, content| {
                let attrs: Vec<String> =
                    attrs.iter().map(|(k, v)| format!("{k}={v}")).collect();
                Ok(format!("<{name}|{}|{content}>", attrs.join(",")))
            },
        )
        .unwrap()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(expand("no tags here", &["quote"]), "no tags here");
    }

    #[test]
    fn paired_tag_captures_content() {
        assert_eq!(
            expand(r#"x [quote author="Ada"]Hello[/quote] y"#, &["quote"]),
            "x <quote|author=Ada|Hello> y"
        );
    }

    #[test]
    fn unpaired_tag_renders_with_empty_content() {
        assert_eq!(expand("a [divider] b", &["divider"]), "a <divider||> b");
    }

    #[test]
    fn unregistered_tags_are_untouched() {
        assert_eq!(
            expand("[unknown attr=\"v\"]text[/unknown]", &["quote"]),
            "[unknown attr=\"v\"]text[/unknown]"
        );
    }

    #[test]
    fn double_brackets_escape_a_literal_tag() {
        assert_eq!(expand("[[quote]]", &["quote"]), "[quote]");
    }

    #[test]
    fn attribute_quoting_forms() {
        assert_eq!(
            expand(r#"[t a="two words" b='single' c=bare d]x[/t]"#, &["t"]),
            "<t|a=two words,b=single,c=bare,d=|x>"
        );
    }

    #[test]
    fn attribute_names_are_lowercased() {
        assert_eq!(expand(r#"[t KEY="v"][/t]"#, &["t"]), "<t|key=v|>");
    }

    #[test]
    fn stray_bracket_is_literal() {
        assert_eq!(expand("a [ b", &["t"]), "a [ b");
        assert_eq!(expand("tail[", &["t"]), "tail[");
    }

    #[test]
    fn self_closing_slash_is_accepted() {
        assert_eq!(expand("[t a=1 /]", &["t"]), "<t|a=1|>");
    }

    #[test]
    fn self_closing_tag_does_not_capture_a_later_close() {
        assert_eq!(
            expand("[t /] gap [t]x[/t]", &["t"]),
            "<t||> gap <t||x>"
        );
    }
}
