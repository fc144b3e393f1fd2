//! API utilities for reaching the portfolio agent
//!
//! The base URL is resolved once at startup and passed to whatever needs it,
//! so nothing downstream inspects `window.location` on its own.

use wasm_bindgen::JsCast;

/// Agent served next to a locally opened page.
pub const LOCAL_API_BASE: &str = "http://127.0.0.1:9000";

/// Deployed agent.
pub const DEPLOYED_API_BASE: &str = "https://portfolio-agent-ym3om.ondigitalocean.app";

/// `<meta name="agent-api-base" content="...">` overrides detection.
pub const API_BASE_META: &str = "agent-api-base";

thread_local! {
    static PAGE_ENDPOINT: EndpointConfig = EndpointConfig::detect();
}

/// The endpoint for this page, detected on first use and fixed afterwards.
pub fn page_endpoint() -> EndpointConfig {
    PAGE_ENDPOINT.with(EndpointConfig::clone)
}

/// Base URL of the question-answering endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the base URL for a page served from `hostname` over `protocol`
    /// (`protocol` as reported by `location.protocol`, e.g. `"file:"`).
    pub fn from_location(hostname: &str, protocol: &str) -> Self {
        if hostname == "127.0.0.1" || protocol == "file:" {
            Self::new(LOCAL_API_BASE)
        } else {
            Self::new(DEPLOYED_API_BASE)
        }
    }

    /// Resolve the configuration from the current page.
    ///
    /// Outside a browser window this falls back to the deployed host.
    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::new(DEPLOYED_API_BASE);
        };

        if let Some(base_url) = window.document().and_then(|d| meta_override(&d)) {
            log::debug!("API base taken from <meta name=\"{}\">", API_BASE_META);
            return Self::new(base_url);
        }

        let location = window.location();
        let hostname = location.hostname().unwrap_or_default();
        let protocol = location.protocol().unwrap_or_default();
        Self::from_location(&hostname, &protocol)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path such as `"/ask"`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn meta_override(document: &web_sys::Document) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", API_BASE_META);
    let meta = document
        .query_selector(&selector)
        .ok()
        .flatten()?
        .dyn_into::<web_sys::HtmlMetaElement>()
        .ok()?;
    let content = meta.content();
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}
