//! # Document Meta
//!
//! Per-request document metadata for server-rendered pages: title,
//! description, theme, robots directives, body attributes and linked assets,
//! collected while a request is handled and written into `<head>` exactly once.
//!
//! # Architecture: Accumulate, Then Snapshot
//!
//! Metadata lives in two types with two lifetimes:
//!
//! ```text
//! handlers, middleware, components          template
//!          │                                    │
//!          ▼                                    ▼
//!   DocumentService ──── finalize() ────▶  Document
//!   (mutable, any order)   (once)          (read-only, emit-once)
//! ```
//!
//! [`service::DocumentService`] accepts writes in any order. Finalizing
//! consumes it, applies defaults (body id, private-document robots rules),
//! merges enqueued assets and hands back a [`document::Document`]. The
//! snapshot's maps never change; it only remembers which meta keys it has
//! already handed out so overlapping template calls never repeat a tag.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`service`] | The accumulator and its `finalize` step |
//! | [`document`] | The render-time snapshot with emit-once meta accessors |
//! | [`context`] | Request and asset registry traits, plus in-memory implementations |
//! | [`asset`] | Stylesheet, script and link descriptors rendered with Maud |
//! | [`robots`] | Robots rule parsing and joining |
//! | [`theme`] | Theme triple and the validated `color-scheme` values |
//! | [`naming`] | Key normalization for ids and titles |
//! | [`config`] | `document.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting for `preview` and `check` |
//!
//! # Design Decisions
//!
//! ## Consuming Finalize
//!
//! `finalize(self)` takes the accumulator by value. A second snapshot of the
//! same request, or a write after the template started reading, is a compile
//! error rather than a runtime surprise.
//!
//! ## Injected Request State
//!
//! The service never reads globals. The request path (default body id), the
//! host (fallback title) and the response header sink all come through
//! [`context::RequestContext`], and enqueued assets through
//! [`context::AssetRegistry`]. Tests and the CLI use the in-memory
//! [`context::Request`] and [`context::AssetQueue`].
//!
//! ## Private Unless Told Otherwise
//!
//! A document is not public until [`service::DocumentService::public`] says
//! so. Finalizing a private document throws away every robots rule and emits
//! `noindex, nofollow` as both a meta tag and an `X-Robots-Tag` header, so a
//! staging site can't be indexed by accident.
//!
//! ## Stable Tag Order
//!
//! Meta entries and body attributes are `BTreeMap`s, sorted by key. Asset
//! buckets keep the order they were first filled in, and assets keep their
//! insertion order inside a bucket. The same request always renders the same
//! page.

pub mod asset;
pub mod config;
pub mod context;
pub mod document;
pub mod naming;
pub mod output;
pub mod robots;
pub mod service;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
