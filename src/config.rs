use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;
use crate::store::Latency;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub seed_path: Option<PathBuf>,
    pub latency: Latency,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `new_from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let addr_raw = lookup("PLANNER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("PLANNER_ADDR {addr_raw:?}: {e}")))?;

        let seed_path = lookup("PLANNER_SEED")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let min_ms = parse_millis(&lookup, "PLANNER_LATENCY_MIN_MS", Latency::DEFAULT_MIN_MS)?;
        let max_ms = parse_millis(&lookup, "PLANNER_LATENCY_MAX_MS", Latency::DEFAULT_MAX_MS)?;
        if min_ms > max_ms {
            return Err(AppError::Config(format!(
                "PLANNER_LATENCY_MIN_MS ({min_ms}) exceeds PLANNER_LATENCY_MAX_MS ({max_ms})"
            )));
        }

        Ok(Self {
            addr,
            seed_path,
            latency: Latency::from_millis(min_ms, max_ms),
        })
    }
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("{key} {raw:?}: {e}"))),
        None => Ok(default),
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.seed_path.is_none());
        assert_eq!(config.latency, Latency::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PLANNER_ADDR", "0.0.0.0:8080"),
            ("PLANNER_SEED", "data/seed.json"),
            ("PLANNER_LATENCY_MIN_MS", "0"),
            ("PLANNER_LATENCY_MAX_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.seed_path, Some(PathBuf::from("data/seed.json")));
        assert_eq!(config.latency, Latency::none());
    }

    #[test]
    fn rejects_inverted_latency_range() {
        let err = AppConfig::from_lookup(lookup(&[
            ("PLANNER_LATENCY_MIN_MS", "600"),
            ("PLANNER_LATENCY_MAX_MS", "100"),
        ]));
        assert!(matches!(err, Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_bad_numbers_and_addresses() {
        assert!(AppConfig::from_lookup(lookup(&[("PLANNER_LATENCY_MAX_MS", "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("PLANNER_ADDR", "localhost")])).is_err());
    }
}
