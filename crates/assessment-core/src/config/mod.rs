use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const ENV_STAGE: &str = "APP_ENV";
const ENV_HOST: &str = "APP_HOST";
const ENV_PORT: &str = "APP_PORT";
const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
const ENV_LOG_ANSI: &str = "APP_LOG_ANSI";
const ENV_SEED_PATH: &str = "APP_SEED_PATH";

/// Deployment stage the dashboard service runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the service reads from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub results: ResultsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: optional_var(ENV_STAGE)
                .map(|stage| AppEnvironment::parse(&stage))
                .unwrap_or_default(),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env()?,
            results: ResultsConfig::from_env(),
        })
    }
}

/// Listener address for the HTTP API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = optional_var(ENV_HOST).unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match optional_var(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub ansi: bool,
}

impl TelemetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let log_level = optional_var(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string());
        let ansi = match optional_var(ENV_LOG_ANSI) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                name: ENV_LOG_ANSI,
                value,
            })?,
            None => false,
        };
        Ok(Self { log_level, ansi })
    }
}

/// Where the results store is preloaded from at startup.
#[derive(Debug, Clone, Default)]
pub struct ResultsConfig {
    /// JSON file shaped like an `AssessmentBundle`.
    pub seed_path: Option<PathBuf>,
}

impl ResultsConfig {
    fn from_env() -> Self {
        Self {
            seed_path: optional_var(ENV_SEED_PATH).map(PathBuf::from),
        }
    }
}

/// Unset and blank variables are treated the same.
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),
    #[error("APP_HOST '{host}' must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    #[error("{name} must be a boolean flag, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let guard = LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for name in [
            ENV_STAGE,
            ENV_HOST,
            ENV_PORT,
            ENV_LOG_LEVEL,
            ENV_LOG_ANSI,
            ENV_SEED_PATH,
        ] {
            env::remove_var(name);
        }
        guard
    }

    #[test]
    fn defaults_apply_without_environment() {
        let _guard = env_lock();
        let config = AppConfig::load().expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert!(config.results.seed_path.is_none());
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let _guard = env_lock();
        env::set_var(ENV_HOST, "localhost");
        env::set_var(ENV_PORT, "8088");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8088));
    }

    #[test]
    fn reads_stage_flags_and_seed_path() {
        let _guard = env_lock();
        env::set_var(ENV_STAGE, "prod");
        env::set_var(ENV_LOG_ANSI, "yes");
        env::set_var(ENV_SEED_PATH, "data/seed.json");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(config.telemetry.ansi);
        assert_eq!(
            config.results.seed_path,
            Some(PathBuf::from("data/seed.json"))
        );
    }

    #[test]
    fn blank_seed_path_is_ignored() {
        let _guard = env_lock();
        env::set_var(ENV_SEED_PATH, "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.results.seed_path.is_none());
    }

    #[test]
    fn rejects_malformed_values() {
        let _guard = env_lock();
        env::set_var(ENV_PORT, "not-a-port");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPort(raw)) if raw == "not-a-port"
        ));

        env::remove_var(ENV_PORT);
        env::set_var(ENV_LOG_ANSI, "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { name: ENV_LOG_ANSI, .. })
        ));

        env::remove_var(ENV_LOG_ANSI);
        env::set_var(ENV_HOST, "dashboard.internal");
        let config = AppConfig::load().expect("host is only checked on bind");
        assert!(matches!(
            config.server.socket_addr(),
            Err(ConfigError::InvalidHost { .. })
        ));
    }
}
