use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before failing the request
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_upload_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "local" or "s3"
    pub backend: String,
    pub local_root: String,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Base URL prepended to stored filenames when building public links
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_UPLOAD_SIZE_BYTES") {
            self.api.max_upload_size_bytes = v.parse().unwrap_or(self.api.max_upload_size_bytes);
        }

        // Storage overrides
        if let Ok(v) = env::var("STORAGE_BACKEND") {
            self.storage.backend = v;
        }
        if let Ok(v) = env::var("STORAGE_LOCAL_ROOT") {
            self.storage.local_root = v;
        }
        if let Ok(v) = env::var("STORAGE_S3_BUCKET") {
            self.storage.s3_bucket = v;
        }
        if let Ok(v) = env::var("STORAGE_S3_REGION") {
            self.storage.s3_region = v;
        }
        if let Ok(v) = env::var("STORAGE_PUBLIC_URL") {
            self.storage.public_base_url = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_upload_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            storage: StorageConfig {
                backend: "local".to_string(),
                local_root: "uploads".to_string(),
                s3_bucket: String::new(),
                s3_region: "us-east-1".to_string(),
                public_base_url: "http://localhost:3000/uploads".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                acquire_timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_upload_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            storage: StorageConfig {
                backend: "s3".to_string(),
                local_root: "uploads".to_string(),
                s3_bucket: "formcraft-staging".to_string(),
                s3_region: "us-east-1".to_string(),
                public_base_url: "https://files.staging.example.com".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                acquire_timeout_secs: 5,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_upload_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            storage: StorageConfig {
                backend: "s3".to_string(),
                local_root: "uploads".to_string(),
                s3_bucket: "formcraft-uploads".to_string(),
                s3_region: "us-east-1".to_string(),
                public_base_url: "https://files.example.com".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.storage.backend, "local");
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.storage.backend, "s3");
        assert!(!config.api.enable_request_logging);
    }
}
