//! Best-effort extraction from the site's server-rendered markup
//!
//! The site answers with HTML templates; these helpers pull the few pieces
//! the client needs (alert text, headings, meta tags, the subscriber stat)
//! without a full DOM.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile HTML tag regex"));

static OPEN_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").expect("Failed to compile open tag regex")
});

static CLOSE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</([a-zA-Z][a-zA-Z0-9]*)\s*>").expect("Failed to compile close tag regex")
});

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Failed to compile attribute regex")
});

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// An opening tag found in a document
struct OpenTag<'a> {
    name: String,
    attributes: &'a str,
    /// Byte offset of the `<`
    start: usize,
    /// Byte offset just past the `>`
    end: usize,
}

impl OpenTag<'_> {
    fn attribute(&self, wanted: &str) -> Option<String> {
        ATTRIBUTE_REGEX.captures_iter(self.attributes).find_map(|caps| {
            let name = caps.get(1)?.as_str();
            if !name.eq_ignore_ascii_case(wanted) {
                return None;
            }
            caps.get(2)
                .or_else(|| caps.get(3))
                .map(|value| value.as_str().to_string())
        })
    }

    fn self_closing(&self) -> bool {
        self.attributes.trim_end().ends_with('/')
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

fn open_tags(html: &str) -> impl Iterator<Item = OpenTag<'_>> {
    OPEN_TAG_REGEX.captures_iter(html).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(OpenTag {
            name: caps.get(1)?.as_str().to_ascii_lowercase(),
            attributes: caps.get(2).map_or("", |m| m.as_str()),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Inner text of an element, up to its matching closing tag
fn inner_text(html: &str, tag: &OpenTag<'_>) -> Option<String> {
    let rest = html.get(tag.end..)?;

    // Same-name elements nested inside open one level each
    let mut boundaries: Vec<(usize, bool)> = open_tags(rest)
        .filter(|inner| inner.name == tag.name && !inner.self_closing())
        .map(|inner| (inner.start, true))
        .chain(
            CLOSE_TAG_REGEX
                .captures_iter(rest)
                .filter(|caps| {
                    caps.get(1)
                        .is_some_and(|name| name.as_str().eq_ignore_ascii_case(&tag.name))
                })
                .filter_map(|caps| caps.get(0).map(|whole| (whole.start(), false))),
        )
        .collect();
    boundaries.sort_unstable_by_key(|(offset, _)| *offset);

    let mut depth = 0usize;
    for (offset, opens) in boundaries {
        if opens {
            depth += 1;
        } else if depth == 0 {
            return Some(clean_text(&rest[..offset]));
        } else {
            depth -= 1;
        }
    }
    None
}

/// Decode the handful of entities the templates emit
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Strip tags, decode entities and collapse whitespace
pub fn clean_text(fragment: &str) -> String {
    let without_tags = HTML_TAG_REGEX.replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned()
}

/// Text of the first element carrying `class`
pub fn text_by_class(html: &str, class: &str) -> Option<String> {
    open_tags(html)
        .find(|tag| tag.has_class(class))
        .and_then(|tag| inner_text(html, &tag))
}

/// Text of the first `tag` element carrying `class`
pub fn text_by_tag_and_class(html: &str, tag_name: &str, class: &str) -> Option<String> {
    open_tags(html)
        .find(|tag| tag.name.eq_ignore_ascii_case(tag_name) && tag.has_class(class))
        .and_then(|tag| inner_text(html, &tag))
}

/// Text of the first `tag` element
pub fn text_by_tag(html: &str, tag_name: &str) -> Option<String> {
    open_tags(html)
        .find(|tag| tag.name.eq_ignore_ascii_case(tag_name))
        .and_then(|tag| inner_text(html, &tag))
}

/// `content` of the first `<meta name="...">`
pub fn meta_content(html: &str, name: &str) -> Option<String> {
    open_tags(html)
        .filter(|tag| tag.name == "meta")
        .find(|tag| {
            tag.attribute("name")
                .is_some_and(|value| value.eq_ignore_ascii_case(name))
        })
        .and_then(|tag| tag.attribute("content"))
        .map(|content| decode_entities(content.trim()))
}
