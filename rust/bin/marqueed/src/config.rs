//! Server configuration, read from a TOML file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/marquee"
//!
//! [jwt]
//! secret = "change-me"
//! expire_secs = 86400
//!
//! [reactions]
//! top_limit = 3
//! audit_interval_secs = 600
//! audit_on_start = true
//!
//! [server]
//! listen = "0.0.0.0:8080"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub reactions: ReactionsSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionsSection {
    /// Default size of the top-N rankings.
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
    /// Seconds between background audits. 0 disables the worker.
    #[serde(default)]
    pub audit_interval_secs: u64,
    /// Run one audit pass before serving.
    #[serde(default = "default_true")]
    pub audit_on_start: bool,
}

impl Default for ReactionsSection {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
            audit_interval_secs: 0,
            audit_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_expire_secs() -> i64 {
    86400
}

fn default_top_limit() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl ServerConfig {
    /// Resolve a context name or path to a config file.
    ///
    /// A bare name maps to `/etc/marquee/<name>.toml`; anything containing
    /// `/` or `.` is used as a path.
    pub fn resolve_path(name: &str) -> PathBuf {
        if name.contains('/') || name.contains('.') {
            PathBuf::from(name)
        } else {
            PathBuf::from(format!("/etc/marquee/{}.toml", name))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/marquee/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [storage]
            data_dir = "/tmp/marquee"

            [jwt]
            secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.jwt.expire_secs, 86400);
        assert_eq!(config.reactions.top_limit, 3);
        assert_eq!(config.reactions.audit_interval_secs, 0);
        assert!(config.reactions.audit_on_start);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marquee.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            data_dir = "/data"

            [jwt]
            secret = "k"
            expire_secs = 60

            [reactions]
            top_limit = 10
            audit_interval_secs = 30
            audit_on_start = false

            [server]
            listen = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.reactions.top_limit, 10);
        assert_eq!(config.reactions.audit_interval_secs, 30);
        assert!(!config.reactions.audit_on_start);
        assert_eq!(config.server.listen, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ServerConfig::load(Path::new("/nonexistent/marquee.toml")).is_err());
    }
}
