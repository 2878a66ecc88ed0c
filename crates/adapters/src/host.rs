//! Host environment boundary.

use async_trait::async_trait;

/// Supplies context from the environment the front end runs in.
#[async_trait]
pub trait HostContext: Send + Sync {
    /// URL of the currently active tab, or an empty string if unavailable.
    async fn active_tab_url(&self) -> String;
}

/// Host with a fixed (possibly absent) tab URL.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    url: Option<String>,
}

impl StaticHost {
    /// Creates a host that always reports `url` as the active tab.
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

#[async_trait]
impl HostContext for StaticHost {
    async fn active_tab_url(&self) -> String {
        self.url.clone().unwrap_or_default()
    }
}
