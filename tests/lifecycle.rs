//! End-to-end accumulate → finalize → render tests.
//!
//! Exercises the public API only, the way a web handler and its template use
//! it across one request.
//!
//! Run with: `cargo test --test lifecycle`

use document_meta::asset::{Link, Script, Stylesheet};
use document_meta::context::{AssetQueue, Request};
use document_meta::document::{Document, MetaTag};
use document_meta::service::{DocumentFields, DocumentService, ROBOTS_HEADER};
use document_meta::theme::ThemeError;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tag(name: &str, content: &str) -> MetaTag {
    MetaTag {
        name: name.to_string(),
        content: content.to_string(),
    }
}

fn finalize_with(public: bool, build: impl FnOnce(&mut DocumentService)) -> (Document, Request) {
    let mut request = Request::new("/", "example.com");
    let mut service = DocumentService::new(&mut request);
    build(&mut service);
    service.public(public);
    let document = service.finalize();
    (document, request)
}

// ---------------------------------------------------------------------------
// Emit-once
// ---------------------------------------------------------------------------

#[test]
fn private_page_scenario() {
    let (mut doc, request) = finalize_with(false, |service| {
        service
            .set(DocumentFields {
                title: Some("Hello World".into()),
                ..Default::default()
            })
            .meta("custom.flag", "1");
    });

    let tags = doc.meta(None);
    assert!(tags.contains(&tag("title", "Hello World")));
    assert!(tags.contains(&tag("flag", "1")));
    assert!(tags.contains(&tag("robots", "noindex, nofollow")));
    assert_eq!(tags.len(), 3);

    assert!(doc.meta(None).is_empty());
    assert_eq!(request.header(ROBOTS_HEADER), Some("noindex, nofollow"));
}

#[test]
fn repeated_calls_return_full_set_once_in_total() {
    let (mut doc, _) = finalize_with(true, |service| {
        service
            .description("first")
            .description("second")
            .author("Jo")
            .meta("og.type", "website")
            .meta("twitter.card", "summary")
            .robots("robots", ["index, follow"]);
        service.theme("#000000", Some("light"), Some("paper")).unwrap();
    });

    let mut seen = Vec::new();
    for group in [Some("document"), Some("theme"), None, None, Some("theme")] {
        seen.extend(doc.meta(group));
    }

    let names: BTreeSet<&str> = seen.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), seen.len(), "a tag was emitted twice: {seen:?}");
    assert_eq!(seen.len(), 8);
    assert!(seen.contains(&tag("description", "second")));
    assert!(seen.contains(&tag("scheme", "light")));
}

#[test]
fn document_group_never_leaks_other_keys() {
    let (mut doc, _) = finalize_with(true, |service| {
        service
            .title("T")
            .keywords(["a", "b"])
            .meta("documents.count", "3")
            .meta("theme.color", "#fff")
            .meta("viewport", "width=device-width");
    });

    let view = doc.document_meta();
    assert_eq!(
        view.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["keywords", "title"]
    );

    let tags = doc.meta(Some("document"));
    // Prefix match, so "documents.count" is part of the group
    assert!(tags.iter().all(|t| t.name != "color" && t.name != "viewport"));
    assert!(tags.contains(&tag("keywords", "a, b")));
}

#[test]
fn title_accessor_then_meta_does_not_repeat_title() {
    let (mut doc, _) = finalize_with(true, |service| {
        service.title("About Us").description("Who we are");
    });

    assert_eq!(doc.title(None), "about-us");
    assert_eq!(doc.meta(None), vec![tag("description", "Who we are")]);
}

// ---------------------------------------------------------------------------
// Defaults and validation
// ---------------------------------------------------------------------------

#[test]
fn id_defaults_to_top() {
    let (doc, _) = finalize_with(true, |_| {});
    assert_eq!(doc.id(None), "top");
}

#[test]
fn template_title_and_id_apply_when_service_set_none() {
    let (mut doc, _) = finalize_with(true, |service| {
        service.description("Pay for your order");
    });

    assert_eq!(doc.title(Some("Checkout")), "checkout");
    assert_eq!(doc.title(None), "checkout");
    assert_eq!(doc.id(Some("Checkout Form")), "checkout-form");
    assert_eq!(doc.meta(None), vec![tag("description", "Pay for your order")]);
}

#[test]
fn theme_rejects_unknown_scheme() {
    let mut request = Request::default();
    let mut service = DocumentService::new(&mut request);
    let err = service.theme("#123", Some("invalid-scheme"), None).err();
    assert_eq!(err, Some(ThemeError::InvalidScheme("invalid-scheme".into())));
}

#[test]
fn theme_stores_color_scheme_and_name() {
    let (mut doc, _) = finalize_with(true, |service| {
        service.theme("#123", Some("dark light"), None).unwrap();
    });
    assert_eq!(
        doc.meta(Some("theme")),
        vec![
            tag("color", "#123"),
            tag("name", "system"),
            tag("scheme", "dark light"),
        ]
    );
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[test]
fn asset_synonyms_agree() {
    let mut queue = AssetQueue::new();
    queue.enqueue(Script::new("/vendor.js").is_async());

    let mut request = Request::new("/shop", "shop.example.com");
    let mut service = DocumentService::new(&mut request).with_assets(&queue);
    service
        .asset([Stylesheet::new("/site.css").media("screen")])
        .asset([Script::new("/app.js").module()])
        .link("/feed.xml", [("rel", "alternate"), ("type", "application/rss+xml")]);
    let doc = service.finalize();

    let css = doc.assets("stylesheet");
    assert_eq!(css, vec![r#"<link rel="stylesheet" href="/site.css" media="screen">"#]);
    for name in ["style", "styles", "css"] {
        assert_eq!(doc.assets(name), css);
    }

    let js = doc.assets("js");
    assert_eq!(
        js,
        vec![
            r#"<script src="/app.js" type="module"></script>"#,
            r#"<script src="/vendor.js" async></script>"#,
        ]
    );
    assert_eq!(doc.assets("script"), js);
    assert_eq!(doc.assets("scripts"), js);

    let all = doc.assets("all");
    assert_eq!(all.len(), 4);
    assert_eq!(
        all[3],
        r#"<link href="/feed.xml" rel="alternate" type="application/rss+xml">"#
    );

    let body = doc.body_attributes([("class", "shop")]);
    assert_eq!(body.get("id").map(String::as_str), Some("/shop"));
    assert_eq!(body.get("class").map(String::as_str), Some("shop"));
}

#[test]
fn queued_links_are_not_merged() {
    let mut queue = AssetQueue::new();
    queue.enqueue(Link::new("/manifest.json").attr("rel", "manifest"));

    let mut request = Request::default();
    let doc = DocumentService::new(&mut request)
        .with_assets(&queue)
        .finalize();
    assert!(doc.assets("all").is_empty());
}
