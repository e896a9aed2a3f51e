use std::time::Duration;

/// Wait budget for one collaborator request. There is no retry: a request
/// either answers within this window or the caller degrades to fallback copy.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Gemini API key; absent means AI features run in degraded mode.
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl CoreConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// An explicit flag value wins over the GEMINI_API_KEY environment variable.
    pub fn resolve_api_key(flag: Option<String>) -> Option<String> {
        if let Some(key) = flag {
            if !key.is_empty() {
                return Some(key);
            }
        }
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(key),
            _ => None,
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
