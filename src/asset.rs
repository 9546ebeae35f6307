//! Linked assets: stylesheets, scripts and raw `<link>` descriptors.
//!
//! Every asset belongs to exactly one [`AssetKind`] bucket and renders to the
//! tag a template drops into `<head>`:
//!
//! | Asset | Rendered |
//! |-------|----------|
//! | `Stylesheet::new("/site.css")` | `<link rel="stylesheet" href="/site.css">` |
//! | `Script::new("/app.js").defer()` | `<script src="/app.js" defer></script>` |
//! | `Link::new("/favicon.ico").attr("rel", "icon")` | `<link href="/favicon.ico" rel="icon">` |
//!
//! Rendering goes through Maud, so values are escaped. `Link` attributes are
//! free-form, which Maud's macro can't express, so those are written by hand
//! with Maud's [`Escaper`].

use maud::{Escaper, Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Bucket an asset is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stylesheet,
    Script,
    Link,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Stylesheet => "stylesheet",
            AssetKind::Script => "script",
            AssetKind::Link => "link",
        }
    }

    /// Resolve a template-facing kind name through the synonym table.
    ///
    /// - `style`, `styles`, `stylesheet`, `css` → [`AssetKind::Stylesheet`]
    /// - `script`, `scripts`, `js` → [`AssetKind::Script`]
    ///
    /// Anything else (including `link`) is not queryable by kind.
    pub fn from_synonym(name: &str) -> Option<AssetKind> {
        match name {
            "style" | "styles" | "stylesheet" | "css" => Some(AssetKind::Stylesheet),
            "script" | "scripts" | "js" => Some(AssetKind::Script),
            _ => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl Stylesheet {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            media: None,
        }
    }

    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub src: String,
    #[serde(default)]
    pub defer: bool,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    /// Load as an ES module (`type="module"`).
    #[serde(default)]
    pub module: bool,
}

impl Script {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            defer: false,
            is_async: false,
            module: false,
        }
    }

    pub fn defer(mut self) -> Self {
        self.defer = true;
        self
    }

    pub fn is_async(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn module(mut self) -> Self {
        self.module = true;
        self
    }
}

/// Raw `<link>` element: an href plus arbitrary attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Any asset a document can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Asset {
    Stylesheet(Stylesheet),
    Script(Script),
    Link(Link),
}

impl Asset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Stylesheet(_) => AssetKind::Stylesheet,
            Asset::Script(_) => AssetKind::Script,
            Asset::Link(_) => AssetKind::Link,
        }
    }

    /// The URL this asset points at.
    pub fn location(&self) -> &str {
        match self {
            Asset::Stylesheet(s) => &s.href,
            Asset::Script(s) => &s.src,
            Asset::Link(l) => &l.href,
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            Asset::Stylesheet(s) => html! {
                link rel="stylesheet" href=(s.href) media=[s.media.as_deref()];
            },
            Asset::Script(s) => html! {
                script src=(s.src) type=[s.module.then_some("module")] defer[s.defer] async[s.is_async] {}
            },
            Asset::Link(l) => render_link(l),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().into_string())
    }
}

impl From<Stylesheet> for Asset {
    fn from(s: Stylesheet) -> Self {
        Asset::Stylesheet(s)
    }
}

impl From<Script> for Asset {
    fn from(s: Script) -> Self {
        Asset::Script(s)
    }
}

impl From<Link> for Asset {
    fn from(l: Link) -> Self {
        Asset::Link(l)
    }
}

/// `href` always comes first and can't be overridden by an attribute.
fn render_link(link: &Link) -> Markup {
    let mut out = String::from("<link");
    push_attribute(&mut out, "href", &link.href);
    for (name, value) in link.attributes.iter().filter(|(name, _)| *name != "href") {
        push_attribute(&mut out, name, value);
    }
    out.push('>');
    PreEscaped(out)
}

pub(crate) fn push_attribute(out: &mut String, name: &str, value: &str) {
    // Attribute names can't be escaped, only filtered
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        .collect();
    if name.is_empty() {
        return;
    }
    out.push(' ');
    out.push_str(&name);
    out.push_str("=\"");
    // Writing into a String can't fail
    let _ = Escaper::new(out).write_str(value);
    out.push('"');
}
