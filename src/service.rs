//! Per-request metadata accumulator.
//!
//! Request handling code (controllers, middleware, components) pushes
//! metadata into a [`DocumentService`] in whatever order it runs. Nothing is
//! validated beyond the theme scheme and nothing is emitted; the service only
//! collects. When the response is about to be rendered,
//! [`DocumentService::finalize`] consumes the service and produces the
//! [`Document`] snapshot the template reads from.
//!
//! ```text
//! DocumentService::new(&mut request)      ┐
//!     .title("Hello")                     │ any order,
//!     .meta("custom.flag", "1")           │ any number of times
//!     .robots("googlebot", ["noarchive"]) ┘
//!     .finalize()  → Document             once
//! ```
//!
//! ## Meta groups
//!
//! A few meta names belong to a group and are stored there instead of the
//! generic map:
//!
//! | Group | Names | Stored as |
//! |-------|-------|-----------|
//! | `document` | `title`, `description`, `author`, `keywords` | document field |
//! | `theme` | `color`, `scheme`, `name` | `theme.<name>` meta entry |
//!
//! The name may be given bare (`"title"`) or prefixed (`"document.title"`).
//! Any other name (`"custom.title"`, `"og.image"`) is stored verbatim.
//!
//! ## Finalize
//!
//! 1. Body `id` defaults to `index` for `/`, otherwise the request path
//!    (an empty path sets nothing).
//! 2. Unless the document was marked public, all robots rules are replaced by
//!    `robots: noindex, nofollow` and the same value is sent as `X-Robots-Tag`.
//! 3. Document fields become `document.<field>` meta entries.
//! 4. Robots rules become meta entries keyed by bot, overriding existing keys.
//! 5. Stylesheets and scripts enqueued in the [`AssetRegistry`] are appended
//!    after the ones added directly. Buckets keep the order they were first
//!    filled in.

use crate::asset::{Asset, AssetKind, Link};
use crate::config::DocumentConfig;
use crate::context::{AssetRegistry, RequestContext};
use crate::document::Document;
use crate::robots::{self, GENERIC_BOT, PRIVATE_RULES};
use crate::theme::{DEFAULT_NAME, Theme, ThemeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Response header mirroring the generic robots rule.
pub const ROBOTS_HEADER: &str = "X-Robots-Tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaGroup {
    Document,
    Theme,
}

const META_GROUPS: [(MetaGroup, &str, &[&str]); 2] = [
    (
        MetaGroup::Document,
        "document",
        &["title", "description", "author", "keywords"],
    ),
    (MetaGroup::Theme, "theme", &["color", "scheme", "name"]),
];

/// Resolve a meta name to its group and bare field name.
fn meta_group(name: &str) -> Option<(MetaGroup, &'static str, &str)> {
    let (prefix, field) = match name.rsplit_once('.') {
        Some((prefix, field)) => (Some(prefix), field),
        None => (None, name),
    };
    META_GROUPS
        .iter()
        .find(|(_, group, fields)| prefix.is_none_or(|p| p == *group) && fields.contains(&field))
        .map(|(group, key, _)| (*group, *key, field))
}

/// Bucket for `kind`, appended at the end the first time the kind is seen.
fn bucket(buckets: &mut Vec<(AssetKind, Vec<Asset>)>, kind: AssetKind) -> &mut Vec<Asset> {
    let index = match buckets.iter().position(|(k, _)| *k == kind) {
        Some(index) => index,
        None => {
            buckets.push((kind, Vec::new()));
            buckets.len() - 1
        }
    };
    &mut buckets[index].1
}

/// Document-level fields accepted by [`DocumentService::set`].
///
/// Absent and empty fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    pub id: Option<String>,
}

pub struct DocumentService<'r> {
    request: &'r mut dyn RequestContext,
    registry: Option<&'r dyn AssetRegistry>,
    document: BTreeMap<String, String>,
    body: BTreeMap<String, String>,
    meta: BTreeMap<String, String>,
    robots: BTreeMap<String, Vec<String>>,
    assets: Vec<(AssetKind, Vec<Asset>)>,
    public: bool,
}

impl<'r> DocumentService<'r> {
    pub fn new(request: &'r mut dyn RequestContext) -> Self {
        Self {
            request,
            registry: None,
            document: BTreeMap::new(),
            body: BTreeMap::new(),
            meta: BTreeMap::new(),
            robots: BTreeMap::new(),
            assets: Vec::new(),
            public: false,
        }
    }

    /// Pull enqueued stylesheets and scripts from `registry` on finalize.
    pub fn with_assets(mut self, registry: &'r dyn AssetRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Seed the service from a loaded `document.toml`.
    pub fn configure(&mut self, config: &DocumentConfig) -> &mut Self {
        self.public(config.public)
            .set(config.document.clone())
            .body(config.body.clone())
            .asset(config.assets.iter().cloned());

        if let Some(theme) = &config.theme {
            self.apply_theme(&theme.to_theme());
        }
        for (bot, values) in &config.robots {
            self.robots_values(bot, values);
        }
        self
    }

    /// Store every present, non-empty field. Keywords are joined with `", "`.
    pub fn set(&mut self, fields: DocumentFields) -> &mut Self {
        let keywords = (!fields.keywords.is_empty()).then(|| fields.keywords.join(", "));
        let values = [
            ("title", fields.title),
            ("description", fields.description),
            ("keywords", keywords),
            ("author", fields.author),
            ("id", fields.id),
        ];
        for (name, value) in values {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self.document.insert(name.to_string(), value);
            }
        }
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.set(DocumentFields {
            title: Some(title.into()),
            ..Default::default()
        })
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.set(DocumentFields {
            description: Some(description.into()),
            ..Default::default()
        })
    }

    pub fn keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(DocumentFields {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }

    pub fn author(&mut self, author: impl Into<String>) -> &mut Self {
        self.set(DocumentFields {
            author: Some(author.into()),
            ..Default::default()
        })
    }

    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.set(DocumentFields {
            id: Some(id.into()),
            ..Default::default()
        })
    }

    /// Set an arbitrary meta entry. No validation; last write wins.
    pub fn meta(&mut self, name: &str, content: impl Into<String>) -> &mut Self {
        let content = content.into();
        match meta_group(name) {
            Some((MetaGroup::Document, _, field)) => {
                self.document.insert(field.to_string(), content);
            }
            Some((MetaGroup::Theme, group, field)) => {
                self.meta.insert(format!("{group}.{field}"), content);
            }
            None => {
                self.meta.insert(name.to_string(), content);
            }
        }
        self
    }

    /// Merge attributes onto `<body>`. Later values replace earlier ones.
    pub fn body<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn asset<I, A>(&mut self, assets: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Asset>,
    {
        for asset in assets {
            let asset = asset.into();
            bucket(&mut self.assets, asset.kind()).push(asset);
        }
        self
    }

    /// Add a raw `<link>` with arbitrary attributes.
    pub fn link<I, K, V>(&mut self, href: impl Into<String>, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let link = attributes
            .into_iter()
            .fold(Link::new(href), |link, (k, v)| link.attr(k, v));
        self.asset([link])
    }

    /// Replace the rules for `bot` with the comma-split, trimmed `rules`.
    pub fn robots<'a, I>(&mut self, bot: &str, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.robots
            .insert(bot.to_string(), robots::parse_rules(rules));
        self
    }

    /// [`robots`](Self::robots) for untyped config values; non-strings are
    /// logged and skipped.
    pub fn robots_values(&mut self, bot: &str, values: &[toml::Value]) -> &mut Self {
        self.robots
            .insert(bot.to_string(), robots::parse_rule_values(bot, values));
        self
    }

    /// Validate and store a theme as `theme.color`, `theme.scheme` and
    /// `theme.name`.
    ///
    /// `None` means the defaults: scheme `dark light`, name `system`.
    pub fn theme(
        &mut self,
        color: &str,
        scheme: Option<&str>,
        name: Option<&str>,
    ) -> Result<&mut Self, ThemeError> {
        let theme = Theme::new(color, scheme, Some(name.unwrap_or(DEFAULT_NAME)))?;
        Ok(self.apply_theme(&theme))
    }

    pub fn apply_theme(&mut self, theme: &Theme) -> &mut Self {
        self.meta("theme.color", theme.color())
            .meta("theme.scheme", theme.scheme().as_str());
        if let Some(name) = theme.name() {
            self.meta("theme.name", name);
        }
        self
    }

    /// Public documents keep their robots rules; others are forced to
    /// `noindex, nofollow`.
    pub fn public(&mut self, public: bool) -> &mut Self {
        self.public = public;
        self
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Freeze the collected metadata into the render-time snapshot.
    pub fn finalize(mut self) -> Document {
        if !self.body.contains_key("id") {
            if let Some(path) = self.request.path().filter(|p| !p.is_empty()) {
                let id = if path == "/" { "index" } else { path }.to_string();
                debug!(%id, "body id taken from request path");
                self.body.insert("id".to_string(), id);
            }
        }

        if !self.public {
            let rules: Vec<String> = PRIVATE_RULES.iter().map(|r| r.to_string()).collect();
            let content = robots::join_rules(&rules);
            debug!(%content, "document is not public, overriding robots rules");
            self.request.set_header(ROBOTS_HEADER, &content);
            self.robots = BTreeMap::from([(GENERIC_BOT.to_string(), rules)]);
        }

        // The id is the body anchor, not a meta tag
        let id = self.document.remove("id");
        for (field, value) in self.document {
            self.meta.insert(format!("document.{field}"), value);
        }

        for (bot, rules) in self.robots {
            self.meta.insert(bot, robots::join_rules(&rules));
        }

        if let Some(registry) = self.registry {
            for kind in [AssetKind::Stylesheet, AssetKind::Script] {
                let enqueued = registry.enqueued(kind);
                if enqueued.is_empty() {
                    continue;
                }
                debug!(%kind, count = enqueued.len(), "merging enqueued assets");
                bucket(&mut self.assets, kind).extend(enqueued);
            }
        }

        let host = self.request.host().map(String::from);
        Document::new(id, host, self.body, self.meta, self.assets)
    }
}
