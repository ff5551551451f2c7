use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static APP_CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Куда `r2Upload` складывает файлы и под каким URL они раздаются
#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    pub dir: String,
    pub public_base: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "target/uploads".to_string(),
            public_base: "/uploads".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Срок жизни access token; совпадает со сроком сессии на клиенте
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: contracts::system::auth::session::SESSION_TTL_HOURS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "target/db/joltcab.db".to_string(),
            },
            server: ServerConfig::default(),
            uploads: UploadsConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/joltcab.db"

[server]
host = "0.0.0.0"
port = 3000

[uploads]
dir = "target/uploads"
public_base = "/uploads"

[auth]
session_ttl_hours = 12
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.auth.session_ttl_hours <= 0 {
        anyhow::bail!("auth.session_ttl_hours must be positive");
    }
    Ok(config)
}

/// Сохранить загруженную конфигурацию для handler'ов
pub fn install(config: Config) {
    if APP_CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already installed, keeping the first one");
    }
}

/// Текущая конфигурация; до `install` (в тестах) используются значения по умолчанию
pub fn current() -> &'static Config {
    APP_CONFIG.get_or_init(Config::default)
}

/// Resolves relative paths relative to the executable directory
fn resolve_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }
    PathBuf::from(raw)
}

/// Get the database file path from configuration
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

/// Каталог загруженных файлов
pub fn get_uploads_dir(config: &Config) -> PathBuf {
    resolve_path(&config.uploads.dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/joltcab.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.public_base, "/uploads");
        assert_eq!(config.auth.session_ttl_hours, 12);
    }

    #[test]
    fn test_embedded_matches_default_struct() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        let built = Config::default();
        assert_eq!(parsed.database.path, built.database.path);
        assert_eq!(parsed.uploads.dir, built.uploads.dir);
        assert_eq!(parsed.auth.session_ttl_hours, built.auth.session_ttl_hours);
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config("[database]\npath = \"/tmp/app.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.uploads.dir, "target/uploads");
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/app.db"));
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let raw = "[database]\npath = \"a.db\"\n[auth]\nsession_ttl_hours = 0\n";
        assert!(parse_config(raw).is_err());
    }
}
