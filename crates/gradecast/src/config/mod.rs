use crate::scoring::{
    GradeScale, ScoringConfig, ScoringError, DEFAULT_ROUNDING_PRECISION, DEFAULT_SIGMA_MAX,
    MAX_ROUNDING_PRECISION,
};
use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the prediction service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let allow_origin = env::var("APP_CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());
        if HeaderValue::from_str(&allow_origin).is_err() {
            return Err(ConfigError::InvalidSetting {
                key: "APP_CORS_ORIGIN",
                value: allow_origin,
            });
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            cors: CorsConfig { allow_origin },
            telemetry: TelemetryConfig { log_level },
            scoring: load_scoring()?,
        })
    }
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let rounding_precision = match env::var("GRADE_ROUNDING_PRECISION") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|precision| *precision <= MAX_ROUNDING_PRECISION)
            .ok_or(ConfigError::InvalidSetting {
                key: "GRADE_ROUNDING_PRECISION",
                value: raw,
            })?,
        Err(_) => DEFAULT_ROUNDING_PRECISION,
    };

    let sigma_max = match env::var("GRADE_SIGMA_MAX") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|sigma| sigma.is_finite() && *sigma > 0.0)
            .ok_or(ConfigError::InvalidSetting {
                key: "GRADE_SIGMA_MAX",
                value: raw,
            })?,
        Err(_) => DEFAULT_SIGMA_MAX,
    };

    let grade_scale = match env::var("GRADE_BREAKPOINTS") {
        Ok(raw) => GradeScale::parse(&raw).map_err(|source| ConfigError::InvalidScoring {
            key: "GRADE_BREAKPOINTS",
            source,
        })?,
        Err(_) => GradeScale::standard(),
    };

    Ok(ScoringConfig {
        grade_scale,
        rounding_precision,
        sigma_max,
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Origin allowed to call the API from a browser.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidSetting {
        key: &'static str,
        value: String,
    },
    InvalidScoring {
        key: &'static str,
        source: ScoringError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSetting { key, value } => {
                write!(f, "{key} has an unusable value '{value}'")
            }
            ConfigError::InvalidScoring { key, source } => write!(f, "{key}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidScoring { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_CORS_ORIGIN",
            "GRADE_ROUNDING_PRECISION",
            "GRADE_SIGMA_MAX",
            "GRADE_BREAKPOINTS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cors.allow_origin, "*");
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GRADE_ROUNDING_PRECISION", "2");
        env::set_var("GRADE_SIGMA_MAX", "0.25");
        env::set_var("GRADE_BREAKPOINTS", "50:P,0:NP");
        env::set_var("APP_ENV", "production");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.scoring.rounding_precision, 2);
        assert_eq!(config.scoring.sigma_max, 0.25);
        assert_eq!(config.scoring.grade_scale.grade_for(49.0).expect("grade"), "NP");
        reset_env();
    }

    #[test]
    fn rejects_unusable_scoring_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("GRADE_SIGMA_MAX", "-1");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidSetting {
                key: "GRADE_SIGMA_MAX",
                ..
            })
        ));
        reset_env();

        env::set_var("GRADE_ROUNDING_PRECISION", "12");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidSetting {
                key: "GRADE_ROUNDING_PRECISION",
                ..
            })
        ));
        reset_env();

        env::set_var("GRADE_BREAKPOINTS", "90:A,80:B");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidScoring {
                key: "GRADE_BREAKPOINTS",
                source: ScoringError::IncompleteBreakpoints(_),
            })
        ));
        reset_env();
    }
}
