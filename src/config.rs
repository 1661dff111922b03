//! Runtime configuration from environment variables.
//!
//! - `BLOCKFALL_SEED`: u64 seed for piece selection (random when unset)
//! - `BLOCKFALL_LOG_PATH`: file that receives log output (logging off when unset)
//! - `BLOCKFALL_CELL_WIDTH`: terminal columns per board cell, 1..=4 (default 2)
//!
//! The log filter itself comes from `RUST_LOG` via `env_logger`.

use std::path::PathBuf;

pub const DEFAULT_CELL_WIDTH: u16 = 2;
pub const MAX_CELL_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: Option<u64>,
    pub log_path: Option<PathBuf>,
    pub cell_width: u16,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let cell_width = lookup("BLOCKFALL_CELL_WIDTH")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_CELL_WIDTH)
            .clamp(1, MAX_CELL_WIDTH);

        Self {
            seed,
            log_path,
            cell_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = RunConfig::from_env();
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(RunConfig::from_lookup(|_| None), RunConfig::default());
    }

    #[test]
    fn test_parses_all_keys() {
        let config = RunConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_SEED", " 42 "),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
            ("BLOCKFALL_CELL_WIDTH", "3"),
        ]));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(config.cell_width, 3);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = RunConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_SEED", "not-a-number"),
            ("BLOCKFALL_LOG_PATH", "   "),
            ("BLOCKFALL_CELL_WIDTH", "9"),
        ]));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_path, None);
        assert_eq!(config.cell_width, MAX_CELL_WIDTH);
    }
}
