use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROFILE_USER: &str = "john_doe";

pub const BACKEND_URL_VAR: &str = "FEEDVIEW_BACKEND_URL";
pub const BIND_ADDR_VAR: &str = "FEEDVIEW_BIND";
pub const FALLBACK_VAR: &str = "FEEDVIEW_FALLBACK";
pub const PROFILE_USER_VAR: &str = "FEEDVIEW_PROFILE_USER";

/// What a page does when a service answered with mock data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Render the mock data as if it were live.
    Mask,
    /// Render the mock data under an info banner.
    #[default]
    Warn,
    /// Render the page's error state instead.
    Fail,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mask" => Ok(FallbackPolicy::Mask),
            "warn" => Ok(FallbackPolicy::Warn),
            "fail" => Ok(FallbackPolicy::Fail),
            other => Err(format!("unknown fallback policy `{}`", other)),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackPolicy::Mask => write!(f, "mask"),
            FallbackPolicy::Warn => write!(f, "warn"),
            FallbackPolicy::Fail => write!(f, "fail"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub bind_addr: String,
    pub fallback: FallbackPolicy,
    pub profile_user: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            fallback: FallbackPolicy::default(),
            profile_user: DEFAULT_PROFILE_USER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let fallback = match non_empty(FALLBACK_VAR) {
            Some(raw) => raw.parse::<FallbackPolicy>().unwrap_or_else(|err: String| {
                tracing::warn!(error = %err, "ignoring {}, using default", FALLBACK_VAR);
                FallbackPolicy::default()
            }),
            None => FallbackPolicy::default(),
        };

        Self {
            backend_url: non_empty(BACKEND_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            bind_addr: non_empty(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            fallback,
            profile_user: non_empty(PROFILE_USER_VAR)
                .unwrap_or_else(|| DEFAULT_PROFILE_USER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.fallback, FallbackPolicy::Warn);
        assert_eq!(config.profile_user, DEFAULT_PROFILE_USER);
    }

    #[test]
    fn reads_overrides_and_trims_trailing_slash() {
        let config = config_from(&[
            (BACKEND_URL_VAR, "http://api.internal:9000/api/"),
            (FALLBACK_VAR, "FAIL"),
            (PROFILE_USER_VAR, "opensourcehero"),
        ]);
        assert_eq!(config.backend_url, "http://api.internal:9000/api");
        assert_eq!(config.fallback, FallbackPolicy::Fail);
        assert_eq!(config.profile_user, "opensourcehero");
    }

    #[test]
    fn bad_policy_falls_back_to_default() {
        let config = config_from(&[(FALLBACK_VAR, "sometimes")]);
        assert_eq!(config.fallback, FallbackPolicy::Warn);
    }
}
