use crate::poller::DEFAULT_REFRESH_INTERVAL;
use std::{env, net::SocketAddr, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INSIGHTS_URL: &str = "http://127.0.0.1:8080/api/insights";
pub const MAX_REFRESH_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    pub insights_url: String,
    pub refresh_interval: Duration,
}

impl PollerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Zero or unparsable intervals fall back to the default period; longer
    /// than a day is capped at a day.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let insights_url = lookup("INSIGHTS_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INSIGHTS_URL.to_string());
        let refresh_interval = lookup("INSIGHTS_REFRESH_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(|secs| Duration::from_secs(secs.min(MAX_REFRESH_SECS)))
            .unwrap_or(DEFAULT_REFRESH_INTERVAL);
        Self {
            insights_url,
            refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[])).port, DEFAULT_PORT);
        let poller = PollerConfig::from_lookup(lookup(&[]));
        assert_eq!(poller.insights_url, DEFAULT_INSIGHTS_URL);
        assert_eq!(poller.refresh_interval, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let server = ServerConfig::from_lookup(lookup(&[("PORT", "9090")]));
        assert_eq!(server.addr().port(), 9090);

        let poller = PollerConfig::from_lookup(lookup(&[
            ("INSIGHTS_URL", "http://eco.local/api/insights"),
            ("INSIGHTS_REFRESH_SECS", "15"),
        ]));
        assert_eq!(poller.insights_url, "http://eco.local/api/insights");
        assert_eq!(poller.refresh_interval, Duration::from_secs(15));
    }

    #[test]
    fn oversized_interval_is_capped() {
        let max = u64::MAX.to_string();
        let poller = PollerConfig::from_lookup(lookup(&[("INSIGHTS_REFRESH_SECS", max.as_str())]));
        assert_eq!(poller.refresh_interval, Duration::from_secs(MAX_REFRESH_SECS));
    }

    #[test]
    fn bad_values_fall_back() {
        assert_eq!(ServerConfig::from_lookup(lookup(&[("PORT", "http")])).port, DEFAULT_PORT);
        for secs in ["0", "-5", "soon"] {
            let poller = PollerConfig::from_lookup(lookup(&[("INSIGHTS_REFRESH_SECS", secs)]));
            assert_eq!(poller.refresh_interval, DEFAULT_REFRESH_INTERVAL, "value {secs}");
        }
    }
}
