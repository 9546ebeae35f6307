//! CLI output formatting for `docmeta preview` and `docmeta check`.
//!
//! # Preview
//!
//! A [`Preview`] is what a template would have pulled out of a finalized
//! [`Document`], captured in the order a typical `<head>` asks for it:
//! title first, then the `document` meta group, the `theme` group and
//! finally everything left. Because the snapshot emits every key once, each
//! tag shows up in exactly one section.
//!
//! ```text
//! Document top
//!     Title: sample-site
//! Body
//!     class="site"
//!     id="index"
//! Meta
//!     document
//!         description: A sample
//!     theme
//!         color: #0a0a0a
//!     other
//!         robots: noindex, nofollow
//! Assets
//!     <link rel="stylesheet" href="/css/site.css">
//! Headers
//!     X-Robots-Tag: noindex, nofollow
//! ```
//!
//! The same data serializes to JSON (`--json`) or renders as a `<head>`
//! fragment (`--html`).
//!
//! # Check
//!
//! ```text
//! Config
//!     Public: no
//!     Document: title, description
//!     Theme: system (dark light, #0a0a0a)
//!     Robots: googlebot
//!     Body: class
//!     Assets: 1 stylesheet, 1 script
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::asset::{AssetKind, push_attribute};
use crate::config::DocumentConfig;
use crate::document::{ALL_ASSETS, Document, MetaTag};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::collections::BTreeMap;

/// Meta sections in capture order. `None` takes whatever is left.
const SECTIONS: [(&str, Option<&str>); 3] = [
    ("document", Some("document")),
    ("theme", Some("theme")),
    ("other", None),
];

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Meta tags emitted by one `Document::meta` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaSection {
    pub group: String,
    pub tags: Vec<MetaTag>,
}

/// Everything a template would read from one finalized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub id: String,
    pub title: String,
    pub body: BTreeMap<String, String>,
    pub meta: Vec<MetaSection>,
    pub assets: Vec<String>,
    pub headers: BTreeMap<String, String>,
}

impl Preview {
    /// Drain `document` the way a `<head>` template would. Empty meta
    /// sections are left out.
    pub fn capture(document: &mut Document, headers: &BTreeMap<String, String>) -> Self {
        let title = document.title(None);
        let meta = SECTIONS
            .iter()
            .map(|(label, group)| MetaSection {
                group: label.to_string(),
                tags: document.meta(*group),
            })
            .filter(|section| !section.tags.is_empty())
            .collect();

        Self {
            id: document.id(None),
            title,
            body: document.body_attributes(Vec::<(String, String)>::new()),
            meta,
            assets: document.assets(ALL_ASSETS),
            headers: headers.clone(),
        }
    }
}

// ============================================================================
// Preview output
// ============================================================================

pub fn format_preview(preview: &Preview) -> Vec<String> {
    let mut lines = vec![
        format!("Document {}", preview.id),
        format!("{}Title: {}", indent(1), preview.title),
    ];

    if !preview.body.is_empty() {
        lines.push("Body".to_string());
        for (name, value) in &preview.body {
            lines.push(format!("{}{}=\"{}\"", indent(1), name, value));
        }
    }

    if !preview.meta.is_empty() {
        lines.push("Meta".to_string());
        for section in &preview.meta {
            lines.push(format!("{}{}", indent(1), section.group));
            for tag in &section.tags {
                lines.push(format!("{}{}: {}", indent(2), tag.name, tag.content));
            }
        }
    }

    if !preview.assets.is_empty() {
        lines.push("Assets".to_string());
        for asset in &preview.assets {
            lines.push(format!("{}{}", indent(1), asset));
        }
    }

    if !preview.headers.is_empty() {
        lines.push("Headers".to_string());
        for (name, value) in &preview.headers {
            lines.push(format!("{}{}: {}", indent(1), name, value));
        }
    }

    lines
}

pub fn print_preview(preview: &Preview) {
    for line in format_preview(preview) {
        println!("{}", line);
    }
}

/// Minimal page showing the captured head and body attributes.
///
/// The title is the normalized key, as templates receive it.
pub fn render_page(preview: &Preview) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { (preview.title) }
                @for section in &preview.meta {
                    @for tag in &section.tags {
                        (tag.render())
                    }
                }
                @for asset in &preview.assets {
                    (PreEscaped(asset))
                }
            }
            (render_body(&preview.body))
        }
    }
}

/// Empty `<body>` carrying every captured attribute, sorted by name.
fn render_body(attributes: &BTreeMap<String, String>) -> Markup {
    let mut out = String::from("<body");
    for (name, value) in attributes {
        push_attribute(&mut out, name, value);
    }
    out.push_str("></body>");
    PreEscaped(out)
}

// ============================================================================
// Check output
// ============================================================================

pub fn format_check_output(config: &DocumentConfig) -> Vec<String> {
    let document = &config.document;
    let fields: Vec<&str> = [
        ("title", document.title.is_some()),
        ("description", document.description.is_some()),
        ("author", document.author.is_some()),
        ("keywords", !document.keywords.is_empty()),
        ("id", document.id.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, present)| present.then_some(name))
    .collect();

    let theme = match &config.theme {
        Some(theme) => format!("{} ({}, {})", theme.name, theme.scheme, theme.color),
        None => "none".to_string(),
    };

    let mut counts: BTreeMap<AssetKind, usize> = BTreeMap::new();
    for asset in &config.assets {
        *counts.entry(asset.kind()).or_default() += 1;
    }
    let assets: Vec<String> = counts
        .iter()
        .map(|(kind, n)| format!("{} {}", n, kind))
        .collect();

    vec![
        "Config".to_string(),
        format!("{}Public: {}", indent(1), if config.public { "yes" } else { "no" }),
        format!("{}Document: {}", indent(1), list_or_none(&fields)),
        format!("{}Theme: {}", indent(1), theme),
        format!(
            "{}Robots: {}",
            indent(1),
            list_or_none(&config.robots.keys().map(String::as_str).collect::<Vec<_>>())
        ),
        format!(
            "{}Body: {}",
            indent(1),
            list_or_none(&config.body.keys().map(String::as_str).collect::<Vec<_>>())
        ),
        format!("{}Assets: {}", indent(1), list_or_none(&assets)),
    ]
}

pub fn print_check_output(config: &DocumentConfig) {
    for line in format_check_output(config) {
        println!("{}", line);
    }
}

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Request;
    use crate::service::DocumentService;
    use crate::test_helpers::*;

    fn sample_preview() -> Preview {
        let mut request = Request::new("/", "example.com");
        let mut service = DocumentService::new(&mut request);
        service.configure(&sample_config()).meta("custom.flag", "1");
        let mut document = service.finalize();
        Preview::capture(&mut document, &request.headers)
    }

    #[test]
    fn capture_splits_meta_into_disjoint_sections() {
        let preview = sample_preview();
        let groups: Vec<&str> = preview.meta.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(groups, vec!["document", "theme", "other"]);

        assert_eq!(
            meta_pairs(&preview.meta[0].tags),
            pairs(&[("description", "A sample")])
        );
        assert_eq!(
            meta_pairs(&preview.meta[2].tags),
            pairs(&[("flag", "1"), ("googlebot", "index, follow")])
        );
    }

    #[test]
    fn capture_title_is_not_repeated_as_meta() {
        let preview = sample_preview();
        assert_eq!(preview.title, "sample-site");
        assert!(
            preview
                .meta
                .iter()
                .flat_map(|s| &s.tags)
                .all(|tag| tag.name != "title")
        );
    }

    #[test]
    fn capture_skips_empty_sections() {
        let mut request = Request::new("/", "example.com");
        let mut document = DocumentService::new(&mut request).finalize();
        let preview = Preview::capture(&mut document, &request.headers);
        let groups: Vec<&str> = preview.meta.iter().map(|s| s.group.as_str()).collect();
        assert_eq!(groups, vec!["other"]);
        assert_eq!(
            preview.headers.get("X-Robots-Tag").map(String::as_str),
            Some("noindex, nofollow")
        );
    }

    #[test]
    fn format_preview_layout() {
        let lines = format_preview(&sample_preview());
        assert_eq!(lines[0], "Document top");
        assert_eq!(lines[1], "    Title: sample-site");
        assert!(lines.contains(&"Body".to_string()));
        assert!(lines.contains(&"    class=\"site\"".to_string()));
        assert!(lines.contains(&"    id=\"index\"".to_string()));
        assert!(lines.contains(&"    theme".to_string()));
        assert!(lines.contains(&"        scheme: dark light".to_string()));
        assert!(lines.contains(&"    <link rel=\"stylesheet\" href=\"/css/site.css\">".to_string()));
        assert!(!lines.contains(&"Headers".to_string()));
    }

    #[test]
    fn preview_serializes_to_json() {
        let json = serde_json::to_value(sample_preview()).unwrap();
        assert_eq!(json["id"], "top");
        assert_eq!(json["body"]["class"], "site");
        assert_eq!(json["meta"][1]["group"], "theme");
        assert_eq!(json["meta"][1]["tags"][0]["name"], "color");
        assert_eq!(json["assets"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn render_page_includes_each_tag_once() {
        let html = render_page(&sample_preview()).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>sample-site</title>"));
        assert_eq!(html.matches(r#"name="description""#).count(), 1);
        assert!(html.contains(r#"<meta name="googlebot" content="index, follow">"#));
        assert!(html.contains(r#"<script src="/js/app.js" defer></script>"#));
        assert!(html.contains(r#"<body class="site" id="index"></body>"#));
    }

    #[test]
    fn render_page_writes_every_body_attribute() {
        let mut request = Request::new("/", "example.com");
        let mut service = DocumentService::new(&mut request);
        service.body([("data-theme", "dark"), ("data-note", r#"a "quoted" <value>"#)]);
        let mut document = service.finalize();
        let preview = Preview::capture(&mut document, &request.headers);

        let html = render_page(&preview).into_string();
        assert!(html.contains(
            r#"<body data-note="a &quot;quoted&quot; &lt;value&gt;" data-theme="dark" id="index"></body>"#
        ));
    }

    #[test]
    fn format_check_output_summarizes_sections() {
        let lines = format_check_output(&sample_config());
        assert_eq!(
            lines,
            vec![
                "Config",
                "    Public: yes",
                "    Document: title, description",
                "    Theme: system (dark light, #0a0a0a)",
                "    Robots: googlebot",
                "    Body: class",
                "    Assets: 1 stylesheet, 1 script",
            ]
        );
    }

    #[test]
    fn format_check_output_for_defaults() {
        let lines = format_check_output(&DocumentConfig::default());
        assert_eq!(lines[1], "    Public: no");
        assert!(lines[2..].iter().all(|line| line.ends_with("none")));
    }
}
