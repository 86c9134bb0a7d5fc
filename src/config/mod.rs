use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub list: ListConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub default_page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback tracing filter when RUST_LOG is unset
    pub filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("SALESSYNC_API_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("SALESSYNC_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse().unwrap_or(self.api.timeout_secs);
        }
        if let Ok(v) = env::var("SALESSYNC_PAGE_SIZE") {
            self.list.default_page_size = v.parse().unwrap_or(self.list.default_page_size);
        }
        if let Ok(v) = env::var("SALESSYNC_LOG") {
            self.logging.filter = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/api/v1".to_string(),
                timeout_secs: 30,
                user_agent: default_user_agent(),
            },
            list: ListConfig { default_page_size: 10 },
            logging: LoggingConfig {
                filter: "salessync=debug,warn".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.salessync.example.com/api/v1".to_string(),
                timeout_secs: 15,
                user_agent: default_user_agent(),
            },
            list: ListConfig { default_page_size: 10 },
            logging: LoggingConfig {
                filter: "salessync=info,warn".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://salessync.example.com/api/v1".to_string(),
                timeout_secs: 10,
                user_agent: default_user_agent(),
            },
            list: ListConfig { default_page_size: 10 },
            logging: LoggingConfig {
                filter: "warn".to_string(),
            },
        }
    }
}

fn default_user_agent() -> String {
    format!("salessync/{}", env!("CARGO_PKG_VERSION"))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
