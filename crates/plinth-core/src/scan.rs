/*
 * scan.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Container scanning over HTML text.
 */

//! Container scanning over HTML text.
//!
//! The hydrator treats the expanded page as text and needs exactly two
//! operations on it: find an element by `id` (tag name, `data-*` attributes,
//! and the byte span of its inner content), and splice new markup into that
//! span. This module implements both with a linear byte scan; it is not a
//! general HTML parser. Comments are skipped, quoted attribute values may
//! contain `>`, and a depth counter over same-name open/close tags keeps
//! nested same-tag children inside the located element's span.

/// One parsed attribute of a located element.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// Lowercased attribute name.
    pub name: String,
    /// Attribute value, empty for bare boolean attributes.
    pub value: String,
    /// Byte span of the whole `name="value"` text in the document.
    span: (usize, usize),
}

/// An element located in HTML text.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Vec<Attr>,
    /// Byte span of the opening tag, including both angle brackets.
    pub open: (usize, usize),
    /// Byte span of the inner content. Empty for void and self-closing
    /// elements.
    pub inner: (usize, usize),
}

impl Element {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Value of the `data-<key>` attribute, if present.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    /// The element's inner content as a slice of `html`.
    ///
    /// `html` must be the same document the element was located in.
    pub fn inner_text<'a>(&self, html: &'a str) -> &'a str {
        &html[self.inner.0..self.inner.1]
    }
}

struct Tag {
    name: String,
    attrs: Vec<Attr>,
    /// Byte position just past the closing `>`.
    end: usize,
    self_closing: bool,
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Locate the first element whose `id` attribute equals `id`.
///
/// Returns `None` when no such element exists or its closing tag is missing.
pub fn find_element_by_id(html: &str, id: &str) -> Option<Element> {
    let mut pos = 0;
    while let Some(off) = html[pos..].find('<') {
        let at = pos + off;
        let rest = &html[at..];

        if rest.starts_with("<!--") {
            pos = at + 4 + html[at + 4..].find("-->")? + 3;
            continue;
        }
        if rest.starts_with("</") || rest.starts_with("<!") || rest.starts_with("<?") {
            pos = at + html[at..].find('>')? + 1;
            continue;
        }

        let Some(tag) = parse_tag_at(html, at) else {
            pos = at + 1;
            continue;
        };

        if tag.attrs.iter().any(|a| a.name == "id" && a.value == id) {
            let inner_start = tag.end;
            let inner = if tag.self_closing || is_void(&tag.name) {
                (inner_start, inner_start)
            } else {
                (inner_start, find_inner_end(html, inner_start, &tag.name)?)
            };
            return Some(Element {
                tag: tag.name,
                attrs: tag.attrs,
                open: (at, tag.end),
                inner,
            });
        }
        pos = tag.end;
    }
    None
}

/// Replace the element's inner content, returning the new document.
pub fn replace_inner(html: &str, element: &Element, new_inner: &str) -> String {
    let mut out = String::with_capacity(html.len() + new_inner.len());
    out.push_str(&html[..element.inner.0]);
    out.push_str(new_inner);
    out.push_str(&html[element.inner.1..]);
    out
}

/// Set an attribute on the element's opening tag, returning the new document.
///
/// An existing attribute is rewritten in place; a new one is appended before
/// the closing `>`. The value is HTML-escaped.
pub fn set_attr(html: &str, element: &Element, name: &str, value: &str) -> String {
    let rendered = format!("{name}=\"{}\"", escape_html(value));

    if let Some(attr) = element.attrs.iter().find(|a| a.name == name) {
        let mut out = String::with_capacity(html.len() + rendered.len());
        out.push_str(&html[..attr.span.0]);
        out.push_str(&rendered);
        out.push_str(&html[attr.span.1..]);
        return out;
    }

    // Insert before the closing `>`, staying inside a `/>` if present.
    let close = element.open.1 - 1;
    let insert_at = if html.as_bytes()[close - 1] == b'/' {
        close - 1
    } else {
        close
    };
    let mut out = String::with_capacity(html.len() + rendered.len() + 1);
    out.push_str(&html[..insert_at]);
    out.push(' ');
    out.push_str(&rendered);
    out.push_str(&html[insert_at..]);
    out
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Find the byte position of the matching close tag for an element opened
/// just before `from`, tracking depth for nested same-name tags.
fn find_inner_end(html: &str, from: usize, name: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(off) = html[pos..].find('<') {
        let at = pos + off;
        let rest = &html[at..];

        if rest.starts_with("<!--") {
            pos = at + 4 + html[at + 4..].find("-->")? + 3;
            continue;
        }
        if rest.starts_with("</") {
            let close_end = html[at..].find('>')? + at;
            let close_name = html[at + 2..close_end].trim();
            if close_name.eq_ignore_ascii_case(name) {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            pos = close_end + 1;
            continue;
        }
        match parse_tag_at(html, at) {
            Some(tag) => {
                if tag.name == name && !tag.self_closing && !is_void(&tag.name) {
                    depth += 1;
                }
                pos = tag.end;
            }
            None => pos = at + 1,
        }
    }
    None
}

/// Parse the start tag at `start` (which must point at `<`).
fn parse_tag_at(html: &str, start: usize) -> Option<Tag> {
    let bytes = html.as_bytes();
    let mut i = start + 1;

    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = html[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        match bytes[i] {
            b'>' => {
                return Some(Tag {
                    name,
                    attrs,
                    end: i + 1,
                    self_closing: false,
                });
            }
            b'/' => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'>' {
                    return Some(Tag {
                        name,
                        attrs,
                        end: i + 1,
                        self_closing: true,
                    });
                }
                return None;
            }
            _ => {
                let attr_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                if i == attr_start {
                    return None;
                }
                let attr_name = html[attr_start..i].to_ascii_lowercase();

                let mut j = i;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < bytes.len() && bytes[j] == b'=' {
                    j += 1;
                    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    if j >= bytes.len() {
                        return None;
                    }
                    let (value, value_end) = match bytes[j] {
                        q @ (b'"' | b'\'') => {
                            let vstart = j + 1;
                            let close = html[vstart..].find(q as char)? + vstart;
                            (html[vstart..close].to_string(), close + 1)
                        }
                        _ => {
                            let vstart = j;
                            let mut k = j;
                            while k < bytes.len()
                                && !bytes[k].is_ascii_whitespace()
                                && bytes[k] != b'>'
                            {
                                k += 1;
                            }
                            (html[vstart..k].to_string(), k)
                        }
                    };
                    attrs.push(Attr {
                        name: attr_name,
                        value,
                        span: (attr_start, value_end),
                    });
                    i = value_end;
                } else {
                    attrs.push(Attr {
                        name: attr_name,
                        value: String::new(),
                        span: (attr_start, i),
                    });
                }
            }
        }
    }
}
