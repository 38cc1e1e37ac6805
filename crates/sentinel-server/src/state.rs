use std::sync::Arc;

/// Settings for the OpenClaw bridge endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    pub enabled: bool,
    /// When set, bridge requests must carry this value in `X-OpenClaw-Key`.
    pub key: Option<String>,
}

impl BridgeConfig {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled with no key. A blank key counts as none.
    pub fn enabled(key: Option<String>) -> Self {
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self { enabled: true, key }
    }

    pub fn requires_key(&self) -> bool {
        self.key.is_some()
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<BridgeConfig>,
}

impl AppState {
    pub fn new(bridge: BridgeConfig) -> Self {
        Self {
            bridge: Arc::new(bridge),
        }
    }
}
