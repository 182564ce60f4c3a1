/// Host the dev server runs on when the UI is served by a local toolchain.
pub const DEV_PAGE_HOST: &str = "localhost:5173";
/// LAN address of the storage service, used when browsing from the dev host.
pub const DEV_LAN_BASE: &str = "http://192.168.8.132:8000";

/// Runtime configuration, resolved once at startup and injected into the
/// client. The core never inspects ambient context (page location, env vars)
/// itself.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Configuration derived from the host the page is served on.
    pub fn for_page_host(page_host: &str) -> Self {
        Self::new(resolve_base_url(page_host))
    }
}

/// Base URL selection: the known dev host talks to the hardcoded LAN address,
/// everything else gets the empty string, meaning "same origin as the page".
pub fn resolve_base_url(page_host: &str) -> &'static str {
    if page_host == DEV_PAGE_HOST {
        DEV_LAN_BASE
    } else {
        ""
    }
}
