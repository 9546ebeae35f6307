//! Shared test utilities for the document-meta test suite.
//!
//! Comparison helpers that turn emitted [`MetaTag`]s into plain tuples, a
//! fully populated [`DocumentConfig`] fixture, and one-time tracing setup.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut request = Request::new("/", "example.com");
//! let mut service = DocumentService::new(&mut request);
//! service.configure(&sample_config());
//! let mut doc = service.finalize();
//!
//! assert_eq!(
//!     meta_pairs(&doc.meta(Some("theme"))),
//!     pairs(&[("color", "#0a0a0a"), ("name", "system"), ("scheme", "dark light")]),
//! );
//! ```

use std::sync::Once;
use tracing_subscriber::EnvFilter;

use crate::asset::{Asset, Script, Stylesheet};
use crate::config::{DocumentConfig, ThemeConfig};
use crate::document::MetaTag;
use crate::service::DocumentFields;
use crate::theme::ColorScheme;

static INIT_LOGGING: Once = Once::new();

/// Install a test-writer subscriber when `RUST_LOG` is set. Safe to call
/// from every test.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// =========================================================================
// Comparison helpers
// =========================================================================

/// `(name, content)` tuples, in emission order.
pub fn meta_pairs(tags: &[MetaTag]) -> Vec<(String, String)> {
    tags.iter()
        .map(|tag| (tag.name.clone(), tag.content.clone()))
        .collect()
}

/// Owned tuples from string literals, for comparing against [`meta_pairs`].
pub fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_string()))
        .collect()
}

// =========================================================================
// Fixtures
// =========================================================================

/// A public site config touching every section, including one robots value
/// that isn't a string.
pub fn sample_config() -> DocumentConfig {
    init_test_logging();
    DocumentConfig {
        public: true,
        document: DocumentFields {
            title: Some("Sample Site".into()),
            description: Some("A sample".into()),
            ..Default::default()
        },
        theme: Some(ThemeConfig {
            color: "#0a0a0a".into(),
            scheme: ColorScheme::DarkLight,
            name: "system".into(),
        }),
        robots: [(
            "googlebot".to_string(),
            vec![
                toml::Value::String("index, follow".into()),
                toml::Value::Integer(7),
            ],
        )]
        .into_iter()
        .collect(),
        body: [("class".to_string(), "site".to_string())]
            .into_iter()
            .collect(),
        assets: vec![
            Asset::from(Stylesheet::new("/css/site.css")),
            Asset::from(Script::new("/js/app.js").defer()),
        ],
    }
}
