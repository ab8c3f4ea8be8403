// src/utils/html.rs

//! Allow-list HTML sanitization and the raw-markup render boundary.
//!
//! The deny-list below is applied after any caller-supplied allow-list, so a
//! policy can never re-enable a denied tag or event-handler attribute.
//!
//! `SafeHtml` is the only type in the crate that emits unescaped markup.
//! Everything else that renders user text should go through [`escape_text`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use ammonia::Builder;

/// Tags that are always stripped, whatever the allow-list says.
pub const DENIED_TAGS: &[&str] = &["script", "object", "embed", "form", "input"];

/// Event-handler attributes that are always stripped.
pub const DENIED_ATTRIBUTES: &[&str] = &[
    "onload",
    "onerror",
    "onclick",
    "onmouseover",
    "onfocus",
    "onblur",
    "onchange",
    "onsubmit",
];

pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ol", "ul",
    "li", "a",
];

pub const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel"];

/// Tags whose text content is dropped along with the tag itself.
const CONTENT_DROPPING_TAGS: &[&str] = &["script", "style"];

/// An allow-list of tag and attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupPolicy {
    allowed_tags: HashSet<String>,
    allowed_attributes: HashSet<String>,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_TAGS.iter().copied(),
            DEFAULT_ALLOWED_ATTRIBUTES.iter().copied(),
        )
    }
}

impl MarkupPolicy {
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            allowed_tags: normalize(tags),
            allowed_attributes: normalize(attributes),
        }
    }

    /// Replaces the tag allow-list. `None` keeps the current one.
    pub fn with_tags<T>(mut self, tags: Option<T>) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        if let Some(tags) = tags {
            self.allowed_tags = normalize(tags);
        }
        self
    }

    /// Replaces the attribute allow-list. `None` keeps the current one.
    pub fn with_attributes<A>(mut self, attributes: Option<A>) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        if let Some(attributes) = attributes {
            self.allowed_attributes = normalize(attributes);
        }
        self
    }

    /// Allowed tags minus [`DENIED_TAGS`].
    pub fn effective_tags(&self) -> HashSet<&str> {
        self.allowed_tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !DENIED_TAGS.contains(tag))
            .collect()
    }

    /// Allowed attributes minus [`DENIED_ATTRIBUTES`].
    pub fn effective_attributes(&self) -> HashSet<&str> {
        self.allowed_attributes
            .iter()
            .map(String::as_str)
            .filter(|attr| !DENIED_ATTRIBUTES.contains(attr))
            .collect()
    }
}

fn normalize<I>(names: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// The narrow seam over an HTML sanitization library.
pub trait HtmlSanitizer: Send + Sync {
    fn sanitize(&self, html: &str, policy: &MarkupPolicy) -> String;
}

/// [`HtmlSanitizer`] backed by `ammonia`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoniaSanitizer;

impl HtmlSanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str, policy: &MarkupPolicy) -> String {
        let tags = policy.effective_tags();
        let attributes = policy.effective_attributes();

        // ammonia refuses a tag that is both allowed and content-dropping.
        let dropped: HashSet<&str> = CONTENT_DROPPING_TAGS
            .iter()
            .copied()
            .filter(|tag| !tags.contains(tag))
            .collect();

        Builder::default()
            .tags(tags)
            .clean_content_tags(dropped)
            .tag_attributes(HashMap::new())
            .generic_attributes(attributes)
            // Never inject attributes the input did not carry.
            .link_rel(None)
            .clean(html)
            .to_string()
    }
}

/// Sanitizes `html` with the default `ammonia` backend.
pub fn sanitize_html(html: &str, policy: &MarkupPolicy) -> String {
    AmmoniaSanitizer.sanitize(html, policy)
}

/// Escapes `text` so it renders literally inside HTML.
pub fn escape_text(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Markup that has passed through an [`HtmlSanitizer`].
///
/// The only constructor is [`SafeHtml::sanitize`], so holding a `SafeHtml`
/// means the string was filtered against some `MarkupPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn sanitize(sanitizer: &dyn HtmlSanitizer, html: &str, policy: &MarkupPolicy) -> Self {
        Self(sanitizer.sanitize(html, policy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Injects the markup into a `<div>` container. The class name is escaped.
    pub fn render(&self, class_name: Option<&str>) -> String {
        match class_name.map(str::trim).filter(|c| !c.is_empty()) {
            Some(class) => format!("<div class=\"{}\">{}</div>", escape_text(class), self.0),
            None => format!("<div>{}</div>", self.0),
        }
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builder mirroring the UI component that renders untrusted HTML.
///
/// ```ignore
/// let markup = SafeHtmlRenderer::new(user_bio)
///     .class_name("bio")
///     .allowed_tags(["p", "a"])
///     .render();
/// ```
#[derive(Debug, Clone)]
pub struct SafeHtmlRenderer {
    html: String,
    class_name: Option<String>,
    policy: MarkupPolicy,
}

impl SafeHtmlRenderer {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            class_name: None,
            policy: MarkupPolicy::default(),
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn allowed_tags<T>(mut self, tags: T) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        self.policy = self.policy.with_tags(Some(tags));
        self
    }

    pub fn allowed_attributes<A>(mut self, attributes: A) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        self.policy = self.policy.with_attributes(Some(attributes));
        self
    }

    pub fn policy(mut self, policy: MarkupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sanitized(&self, sanitizer: &dyn HtmlSanitizer) -> SafeHtml {
        SafeHtml::sanitize(sanitizer, &self.html, &self.policy)
    }

    pub fn render_with(&self, sanitizer: &dyn HtmlSanitizer) -> String {
        self.sanitized(sanitizer).render(self.class_name.as_deref())
    }

    pub fn render(&self) -> String {
        self.render_with(&AmmoniaSanitizer)
    }
}
