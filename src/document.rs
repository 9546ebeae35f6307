//! Render-time snapshot of a document's metadata.
//!
//! A [`Document`] is produced once per request by
//! [`DocumentService::finalize`](crate::service::DocumentService::finalize)
//! and handed to the template. Its maps never change after that; the only
//! state it keeps is the set of meta keys already emitted.
//!
//! # Emit-once contract
//!
//! Templates tend to ask for overlapping slices of metadata: the document
//! block first, then theme tags, then "everything else". Each call to
//! [`Document::meta`] returns only keys not handed out before and records the
//! ones it returns, so
//!
//! ```text
//! doc.meta(Some("document"))  → description, keywords, …
//! doc.meta(Some("theme"))     → color, scheme, name
//! doc.meta(None)              → robots, custom.*   (nothing repeated)
//! doc.meta(None)              → []
//! ```
//!
//! The single-field accessors ([`Document::title`], [`Document::description`],
//! …) count as emitting their key too, which keeps `<title>` and
//! `<meta name="description">` from being written twice.
//!
//! [`Document::document_meta`] is the exception: a read-only view of the
//! `document.*` entries that have not been emitted yet. It does not mark
//! anything as sent.

use crate::asset::{Asset, AssetKind};
use crate::naming::{meta_name, normalize_key};
use maud::{Markup, html};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Fallback document id.
pub const DEFAULT_ID: &str = "top";

/// Kind name that selects every asset bucket.
pub const ALL_ASSETS: &str = "all";

/// One `<meta name=… content=…>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    pub fn render(&self) -> Markup {
        html! {
            meta name=(self.name) content=(self.content);
        }
    }
}

#[derive(Debug)]
pub struct Document {
    id: Option<String>,
    host: Option<String>,
    body: BTreeMap<String, String>,
    meta: BTreeMap<String, String>,
    assets: Vec<(AssetKind, Vec<Asset>)>,
    title: Option<String>,
    sent: HashSet<String>,
}

impl Document {
    pub(crate) fn new(
        id: Option<String>,
        host: Option<String>,
        body: BTreeMap<String, String>,
        meta: BTreeMap<String, String>,
        assets: Vec<(AssetKind, Vec<Asset>)>,
    ) -> Self {
        Self {
            id,
            host,
            body,
            meta,
            assets,
            title: None,
            sent: HashSet::new(),
        }
    }

    /// Normalized document id.
    ///
    /// The id set on the service wins, then `fallback`, then `"top"`.
    pub fn id(&self, fallback: Option<&str>) -> String {
        normalize_key(self.id.as_deref().or(fallback).unwrap_or(DEFAULT_ID))
    }

    /// Normalized document title.
    ///
    /// A non-empty `set` replaces the title for every later call. Otherwise
    /// the last title given here is returned, then the one set on the
    /// service, then the request host. Marks `document.title` as emitted.
    pub fn title(&mut self, set: Option<&str>) -> String {
        self.sent.insert("document.title".to_string());
        if let Some(set) = set.filter(|s| !s.is_empty()) {
            let title = normalize_key(set);
            self.title = Some(title.clone());
            return title;
        }
        if let Some(title) = &self.title {
            return title.clone();
        }
        let title = self
            .meta
            .get("document.title")
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .or(self.host.as_deref())
            .unwrap_or_default();
        normalize_key(title)
    }

    /// Marks `document.description` as emitted.
    pub fn description(&mut self) -> Option<&str> {
        self.document_field("description")
    }

    /// Marks `document.keywords` as emitted.
    pub fn keywords(&mut self) -> Option<&str> {
        self.document_field("keywords")
    }

    /// Marks `document.author` as emitted.
    pub fn author(&mut self) -> Option<&str> {
        self.document_field("author")
    }

    /// Name of the configured theme, if any.
    pub fn theme_name(&self) -> Option<&str> {
        self.meta.get("theme.name").map(String::as_str)
    }

    /// Body attributes with call-time extras merged on top.
    ///
    /// Extras win over stored attributes but are not stored.
    pub fn body_attributes<I, K, V>(&self, extra: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attributes = self.body.clone();
        attributes.extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        attributes
    }

    /// Unsent `document.*` entries keyed by their tag name. Does not mark
    /// anything as sent.
    pub fn document_meta(&self) -> BTreeMap<String, String> {
        self.meta
            .iter()
            .filter(|(key, _)| key.starts_with("document.") && !self.sent.contains(*key))
            .map(|(key, value)| (meta_name(key).to_string(), value.clone()))
            .collect()
    }

    /// Meta tags not emitted yet, optionally restricted to keys starting
    /// with `group`. Every returned key is marked as sent.
    pub fn meta(&mut self, group: Option<&str>) -> Vec<MetaTag> {
        let mut tags = Vec::new();

        for (key, content) in &self.meta {
            if content.is_empty()
                || group.is_some_and(|g| !key.starts_with(g))
                || self.sent.contains(key)
            {
                continue;
            }
            self.sent.insert(key.clone());
            tags.push(MetaTag {
                name: meta_name(key).to_string(),
                content: content.clone(),
            });
        }

        tags
    }

    /// Rendered asset tags for `kind`.
    ///
    /// `"all"` flattens every bucket, in the order buckets were first filled. Other names go through
    /// [`AssetKind::from_synonym`]; unknown names yield nothing.
    pub fn assets(&self, kind: &str) -> Vec<String> {
        if kind == ALL_ASSETS {
            return self
                .assets
                .iter()
                .flat_map(|(_, bucket)| bucket)
                .map(Asset::to_string)
                .collect();
        }

        AssetKind::from_synonym(kind)
            .and_then(|kind| self.assets.iter().find(|(k, _)| *k == kind))
            .map(|(_, bucket)| bucket.iter().map(Asset::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether the meta entry under `key` has been emitted.
    pub fn is_sent(&self, key: &str) -> bool {
        self.sent.contains(key)
    }

    fn document_field(&mut self, field: &str) -> Option<&str> {
        let key = format!("document.{field}");
        let value = self.meta.get(&key).map(String::as_str);
        self.sent.insert(key);
        value
    }
}
