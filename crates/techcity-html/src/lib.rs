//! Tailwind class injection for organizer-supplied HTML.
//!
//! Event descriptions arrive as bare HTML with no styling. Tailwind's preflight
//! resets every element, so lists, links and headings render as plain text
//! unless they carry utility classes. [`tailwindify_html`] walks the markup
//! and appends a fixed set of classes per tag.
//!
//! The input must have a single root element; wrap fragments in a `<div>`.

use std::string::FromUtf8Error;

use quick_xml::events::attributes::{AttrError, Attribute};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

/// Error while transforming HTML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlError {
    /// Markup could not be parsed.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Attribute could not be parsed.
    #[error("HTML attribute error: {0}")]
    Attr(#[from] AttrError),

    /// Writing the transformed markup failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Utility classes appended to each styled tag.
const TAG_CLASSES: &[(&str, &str)] = &[
    ("a", "text-blue-700 underline hover:text-blue-900"),
    ("p", "mb-4"),
    ("ul", "list-disc pl-6 mb-4"),
    ("ol", "list-decimal pl-6 mb-4"),
    ("li", "mb-1"),
    ("h1", "text-3xl font-bold mb-4"),
    ("h2", "text-2xl font-bold mb-3"),
    ("h3", "text-xl font-semibold mb-2"),
    ("h4", "text-lg font-semibold mb-2"),
    ("strong", "font-semibold"),
    ("b", "font-semibold"),
    ("em", "italic"),
    ("i", "italic"),
    ("blockquote", "border-l-4 border-gray-300 pl-4 italic mb-4"),
    ("code", "font-mono text-sm bg-gray-100 rounded px-1"),
    ("pre", "bg-gray-100 rounded p-4 mb-4 overflow-x-auto"),
    ("img", "max-w-full h-auto"),
];

/// Append Tailwind utility classes to known tags in `html`.
///
/// Existing `class` attributes are kept and extended. Text, entity references,
/// comments and unknown tags pass through untouched. End-tag names are not
/// checked against start tags, so HTML void elements like `<br>` are accepted.
/// A bare `&` that starts no entity reference is kept as text.
///
/// # Errors
///
/// Returns [`HtmlError`] if the markup is malformed beyond what the relaxed
/// parser tolerates (e.g. an unterminated tag).
pub fn tailwindify_html(html: &str) -> Result<String, HtmlError> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_dangling_amp = true;

    let mut writer = Writer::new(Vec::with_capacity(html.len() * 2));
    loop {
        match reader.read_event()? {
            Event::Start(e) => writer.write_event(Event::Start(style(&e)?))?,
            Event::Empty(e) => writer.write_event(Event::Empty(style(&e)?))?,
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Look up the classes for a tag name (case-insensitive).
fn classes_for(tag: &str) -> Option<&'static str> {
    TAG_CLASSES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, classes)| *classes)
}

/// Rebuild a start tag with its utility classes merged into `class`.
fn style(start: &BytesStart<'_>) -> Result<BytesStart<'static>, HtmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let Some(classes) = classes_for(&name) else {
        return Ok(start.clone().into_owned());
    };

    let mut styled = BytesStart::new(name);
    let mut class = Vec::new();
    for attr in start.html_attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"class" {
            class.extend_from_slice(&attr.value);
        } else {
            styled.push_attribute(attr);
        }
    }

    if !class.is_empty() {
        class.push(b' ');
    }
    class.extend_from_slice(classes.as_bytes());
    styled.push_attribute(Attribute::from((b"class".as_slice(), class.as_slice())));

    Ok(styled)
}
