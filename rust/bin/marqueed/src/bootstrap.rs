//! Bootstrap: configuration checks and storage initialization.

use std::path::PathBuf;
use std::sync::Arc;

use marquee_core::ServiceConfig;
use marquee_kv::{KVStore, RedbStore};
use tracing::info;

use crate::config::ServerConfig;

/// Verify server configuration is ready for use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if config.jwt.expire_secs <= 0 {
        anyhow::bail!("JWT expire_secs must be positive.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.reactions.top_limit == 0 {
        anyhow::bail!("reactions.top_limit must be at least 1.");
    }
    Ok(())
}

/// Create the data directory and open the document store.
pub fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn KVStore>> {
    let data_dir = PathBuf::from(&config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = ServiceConfig {
        data_dir: Some(data_dir),
        listen: config.server.listen.clone(),
        ..Default::default()
    };
    let db_path = core_config.resolve_db_path();
    let kv: Arc<dyn KVStore> = Arc::new(
        RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );
    info!("document store opened at {}", db_path.display());
    Ok(kv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, ReactionsSection, ServerSection, StorageConfig};

    fn config(data_dir: &str, secret: &str) -> ServerConfig {
        ServerConfig {
            storage: StorageConfig {
                data_dir: data_dir.to_string(),
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expire_secs: 3600,
            },
            reactions: ReactionsSection::default(),
            server: ServerSection::default(),
        }
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config("/tmp/marquee", "secret")).is_ok());
    }

    #[test]
    fn test_verify_config_empty_secret() {
        assert!(verify_config(&config("/tmp/marquee", "")).is_err());
    }

    #[test]
    fn test_verify_config_empty_data_dir() {
        assert!(verify_config(&config("", "secret")).is_err());
    }

    #[test]
    fn test_verify_config_zero_top_limit() {
        let mut cfg = config("/tmp/marquee", "secret");
        cfg.reactions.top_limit = 0;
        assert!(verify_config(&cfg).is_err());
    }

    #[test]
    fn test_open_store_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested/data");
        let kv = open_store(&config(data_dir.to_str().unwrap(), "secret")).unwrap();
        kv.set("k", b"v").unwrap();
        assert!(data_dir.join("data.redb").exists());
    }
}
