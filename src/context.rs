//! Collaborators a [`DocumentService`](crate::service::DocumentService) talks to.
//!
//! The service never reaches for process-wide state. Everything it needs from
//! the outside world comes through two traits:
//!
//! - [`RequestContext`]: the current request path and host, and a place to put
//!   outbound response headers (`X-Robots-Tag`).
//! - [`AssetRegistry`]: stylesheets and scripts enqueued elsewhere (by an
//!   asset pipeline, a component, a layout) that belong in this document.
//!
//! [`Request`] and [`AssetQueue`] are plain in-memory implementations. Web
//! framework integrations implement the traits over their own types.

use crate::asset::{Asset, AssetKind};
use std::collections::BTreeMap;

pub trait RequestContext {
    /// Path of the current request, e.g. `/` or `/blog/post`.
    fn path(&self) -> Option<&str>;

    /// Host the request was made to, used as the fallback document title.
    fn host(&self) -> Option<&str>;

    /// Set an outbound response header, replacing any previous value.
    fn set_header(&mut self, name: &str, value: &str);
}

pub trait AssetRegistry {
    /// Assets of `kind` enqueued for the current request, in enqueue order.
    fn enqueued(&self, kind: AssetKind) -> Vec<Asset>;
}

/// In-memory request: path, host and the response headers written so far.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub path: Option<String>,
    pub host: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl Request {
    pub fn new(path: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            host: Some(host.into()),
            headers: BTreeMap::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl RequestContext for Request {
    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }
}

/// In-memory enqueue registry.
#[derive(Debug, Clone, Default)]
pub struct AssetQueue {
    assets: Vec<Asset>,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, asset: impl Into<Asset>) -> &mut Self {
        self.assets.push(asset.into());
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetRegistry for AssetQueue {
    fn enqueued(&self, kind: AssetKind) -> Vec<Asset> {
        self.assets
            .iter()
            .filter(|asset| asset.kind() == kind)
            .cloned()
            .collect()
    }
}
