use std::env;
use std::path::PathBuf;

pub const DEFAULT_STATE_PATH: &str = "ecotrack-data/carbon_data.json";
pub const DEFAULT_PROFILE_PATH: &str = "ecotrack-data/eco_user.json";

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Where snapshots live and how the binary logs.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub state_path: PathBuf,
    pub profile_path: PathBuf,
    pub log_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            log_json: false,
        }
    }
}

impl EngineConfig {
    /// Reads `ECOTRACK_STATE_PATH`, `ECOTRACK_PROFILE_PATH` and
    /// `ECOTRACK_LOG_JSON`; unset or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        EngineConfig {
            state_path: env_path("ECOTRACK_STATE_PATH", DEFAULT_STATE_PATH),
            profile_path: env_path("ECOTRACK_PROFILE_PATH", DEFAULT_PROFILE_PATH),
            log_json: env_bool("ECOTRACK_LOG_JSON", false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.state_path, PathBuf::from("ecotrack-data/carbon_data.json"));
        assert!(!cfg.log_json);
    }

    #[test]
    fn test_unset_variables_keep_defaults() {
        assert!(env_bool("ECOTRACK_TEST_SURELY_UNSET_FLAG", true));
        assert_eq!(
            env_path("ECOTRACK_TEST_SURELY_UNSET_PATH", "x/y.json"),
            PathBuf::from("x/y.json")
        );
    }
}
