use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8877";
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_WEB_BASE: &str = "https://github.com";

/// Where synthetic GitHub accounts are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Some(StoreBackend::File),
            "memory" | "mem" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Test worker the fixture file belongs to.
    pub worker_id: String,
    pub fixtures_dir: PathBuf,
    pub store: StoreBackend,
    pub avatar_path: PathBuf,
    /// Forward GitHub traffic to the real API instead of answering it.
    pub passthrough_github: bool,
    /// Dev server origin whose `/ping` is acknowledged.
    pub dev_origin: Option<String>,
    pub github_api_base: String,
    pub github_web_base: String,
    /// Suppresses the startup banner (`NODE_ENV=test`).
    pub quiet: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // Load .env file
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fixtures_dir = PathBuf::from(
            lookup("MOCK_FIXTURES_DIR").unwrap_or_else(|| "tests/fixtures".to_string()),
        );

        let worker_id = lookup("MOCK_WORKER_ID")
            .or_else(|| lookup("VITEST_POOL_ID"))
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| "0".to_string());

        let store = match lookup("MOCK_STORE") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(%value, "unknown MOCK_STORE, using file store");
                StoreBackend::File
            }),
            None => StoreBackend::File,
        };

        let bind_addr = match lookup("MOCK_BIND_ADDR") {
            Some(value) => value.parse::<SocketAddr>().unwrap_or_else(|_| {
                tracing::warn!(%value, "invalid MOCK_BIND_ADDR, using {}", DEFAULT_BIND_ADDR);
                default_bind_addr()
            }),
            None => default_bind_addr(),
        };

        let avatar_path = lookup("MOCK_AVATAR_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| fixtures_dir.join("github").join("ghost.jpg"));

        let client_id =
            lookup("GITHUB_CLIENT_ID").unwrap_or_else(|| "MOCK_GITHUB_CLIENT_ID".to_string());
        let testing = lookup("TESTING").is_some_and(|v| !v.is_empty());

        Config {
            bind_addr,
            worker_id,
            fixtures_dir,
            store,
            avatar_path,
            passthrough_github: !client_id.starts_with("MOCK_") && !testing,
            dev_origin: lookup("REMIX_DEV_ORIGIN").filter(|o| !o.is_empty()),
            github_api_base: base_url(lookup("GITHUB_API_BASE"), DEFAULT_GITHUB_API_BASE),
            github_web_base: base_url(lookup("GITHUB_WEB_BASE"), DEFAULT_GITHUB_WEB_BASE),
            quiet: lookup("NODE_ENV").as_deref() == Some("test"),
        }
    }

    /// Fully mocked configuration rooted at `fixtures_dir`.
    pub fn mocked(fixtures_dir: impl Into<PathBuf>) -> Self {
        let fixtures_dir = fixtures_dir.into();
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            worker_id: "0".to_string(),
            avatar_path: fixtures_dir.join("github").join("ghost.jpg"),
            fixtures_dir,
            store: StoreBackend::File,
            passthrough_github: false,
            dev_origin: None,
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            github_web_base: DEFAULT_GITHUB_WEB_BASE.to_string(),
            quiet: true,
        }
    }

    /// Avatar URL put on generated GitHub profiles.
    pub fn avatar_url(&self) -> String {
        format!("{}/ghost.png", self.github_web_base)
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8877))
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_fully_mocked() {
        let config = config_with(&[]);
        assert!(!config.passthrough_github);
        assert_eq!(config.worker_id, "0");
        assert_eq!(config.store, StoreBackend::File);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.avatar_url(), "https://github.com/ghost.png");
        assert_eq!(
            config.avatar_path,
            PathBuf::from("tests/fixtures/github/ghost.jpg")
        );
    }

    #[test]
    fn real_client_id_enables_passthrough() {
        let config = config_with(&[("GITHUB_CLIENT_ID", "Iv1.realclient")]);
        assert!(config.passthrough_github);
    }

    #[test]
    fn testing_flag_disables_passthrough() {
        let config = config_with(&[("GITHUB_CLIENT_ID", "Iv1.realclient"), ("TESTING", "true")]);
        assert!(!config.passthrough_github);
    }

    #[test]
    fn empty_testing_flag_counts_as_unset() {
        let config = config_with(&[("GITHUB_CLIENT_ID", "Iv1.realclient"), ("TESTING", "")]);
        assert!(config.passthrough_github);
    }

    #[test]
    fn mock_client_id_disables_passthrough() {
        let config = config_with(&[("GITHUB_CLIENT_ID", "MOCK_GITHUB_CLIENT_ID")]);
        assert!(!config.passthrough_github);
    }

    #[test]
    fn worker_id_prefers_explicit_variable() {
        assert_eq!(config_with(&[("VITEST_POOL_ID", "4")]).worker_id, "4");
        assert_eq!(
            config_with(&[("VITEST_POOL_ID", "4"), ("MOCK_WORKER_ID", "9")]).worker_id,
            "9"
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_with(&[("MOCK_STORE", "redis"), ("MOCK_BIND_ADDR", "nope")]);
        assert_eq!(config.store, StoreBackend::File);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_overrides() {
        let config = config_with(&[
            ("MOCK_STORE", "memory"),
            ("MOCK_FIXTURES_DIR", "/tmp/fx"),
            ("GITHUB_WEB_BASE", "http://127.0.0.1:9000/"),
            ("REMIX_DEV_ORIGIN", "http://localhost:3001/"),
            ("NODE_ENV", "test"),
        ]);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.fixtures_dir, PathBuf::from("/tmp/fx"));
        assert_eq!(config.avatar_url(), "http://127.0.0.1:9000/ghost.png");
        assert_eq!(config.dev_origin.as_deref(), Some("http://localhost:3001/"));
        assert!(config.quiet);
    }
}
