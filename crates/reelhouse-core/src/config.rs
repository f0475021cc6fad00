//! Configuration module
//!
//! Process configuration is read once from the environment (and an optional
//! `.env` file) at startup and validated before any service is built.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MEDIA_TOOL_TIMEOUT_SECS, MAX_THUMBNAIL_UPLOAD_BYTES, MAX_VIDEO_UPLOAD_BYTES,
    SHELL_METACHARACTERS,
};
use crate::storage_types::{PublisherKind, StorageBackend};

const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const THUMBNAIL_CACHE_CAPACITY: usize = 1024;

/// Server-level settings shared by every route
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Base URL under which this process is reachable; used for re-served assets.
    pub public_base_url: String,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory video store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub thumbnail_publisher: PublisherKind,
    pub thumbnail_cache_capacity: usize,
}

impl StorageConfig {
    /// Region for the S3 backend, preferring `S3_REGION` over `AWS_REGION`.
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }
}

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub scratch_dir: PathBuf,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub tool_timeout_secs: u64,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub media: MediaConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error> {
    parse_or(key, env::var(key).ok(), default)
}

/// Unset or blank keeps the default; anything else must parse.
fn parse_or<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let base = BaseConfig {
            server_port,
            environment,
            cors_origins,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env_or("JWT_EXPIRY_HOURS", JWT_EXPIRY_HOURS)?,
            public_base_url: env_opt("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
        };

        let database = DatabaseConfig {
            database_url: env_opt("DATABASE_URL"),
            max_connections: env_or("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            timeout_seconds: env_or("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
        };

        let backend = match env_opt("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };
        let thumbnail_publisher = match env_opt("THUMBNAIL_PUBLISHER") {
            Some(value) => value.parse()?,
            None => PublisherKind::Memory,
        };

        let storage = StorageConfig {
            backend,
            s3_bucket: env_opt("S3_BUCKET"),
            s3_region: env_opt("S3_REGION"),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            aws_region: env_opt("AWS_REGION"),
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL"),
            thumbnail_publisher,
            thumbnail_cache_capacity: env_or("THUMBNAIL_CACHE_CAPACITY", THUMBNAIL_CACHE_CAPACITY)?,
        };

        let media = MediaConfig {
            scratch_dir: env_opt("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("reelhouse")),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            tool_timeout_secs: env_or("MEDIA_TOOL_TIMEOUT_SECS", DEFAULT_MEDIA_TOOL_TIMEOUT_SECS)?,
            max_video_size_bytes: env_or("MAX_VIDEO_SIZE_BYTES", MAX_VIDEO_UPLOAD_BYTES)?,
            max_thumbnail_size_bytes: env_or("MAX_THUMBNAIL_SIZE_BYTES", MAX_THUMBNAIL_UPLOAD_BYTES)?,
        };

        Ok(Config {
            base,
            database,
            storage,
            media,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let Some(url) = &self.database.database_url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.storage.region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.storage.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.storage.thumbnail_publisher == PublisherKind::Memory
            && self.storage.thumbnail_cache_capacity == 0
        {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_CACHE_CAPACITY must be greater than zero"
            ));
        }

        for (name, path) in [
            ("FFPROBE_PATH", &self.media.ffprobe_path),
            ("FFMPEG_PATH", &self.media.ffmpeg_path),
        ] {
            if path.is_empty() || path.contains(SHELL_METACHARACTERS) {
                return Err(anyhow::anyhow!("{} contains invalid characters", name));
            }
        }

        if self.media.tool_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "MEDIA_TOOL_TIMEOUT_SECS must be greater than zero"
            ));
        }
        if self.media.max_video_size_bytes == 0 || self.media.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            base: BaseConfig {
                server_port: DEFAULT_PORT,
                environment: "development".to_string(),
                cors_origins: vec!["*".to_string()],
                jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
                jwt_expiry_hours: JWT_EXPIRY_HOURS,
                public_base_url: "http://localhost:8091".to_string(),
            },
            database: DatabaseConfig {
                database_url: None,
                max_connections: MAX_CONNECTIONS,
                timeout_seconds: CONNECTION_TIMEOUT_SECS,
            },
            storage: StorageConfig {
                backend: StorageBackend::S3,
                s3_bucket: Some("reelhouse-videos".to_string()),
                s3_region: None,
                s3_endpoint: None,
                aws_region: Some("us-east-1".to_string()),
                local_storage_path: None,
                local_storage_base_url: None,
                thumbnail_publisher: PublisherKind::Memory,
                thumbnail_cache_capacity: THUMBNAIL_CACHE_CAPACITY,
            },
            media: MediaConfig {
                scratch_dir: env::temp_dir(),
                ffprobe_path: "ffprobe".to_string(),
                ffmpeg_path: "/usr/bin/ffmpeg".to_string(),
                tool_timeout_secs: DEFAULT_MEDIA_TOOL_TIMEOUT_SECS,
                max_video_size_bytes: MAX_VIDEO_UPLOAD_BYTES,
                max_thumbnail_size_bytes: MAX_THUMBNAIL_UPLOAD_BYTES,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = valid_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.region(), Some("us-east-1"));
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut config = valid_config();
        config.base.jwt_secret = "short".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_s3_backend_requires_region() {
        let mut config = valid_config();
        config.storage.aws_region = None;
        assert!(config.validate().is_err());

        config.storage.s3_region = Some("eu-west-3".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.region(), Some("eu-west-3"));
    }

    #[test]
    fn test_local_backend_requires_base_url() {
        let mut config = valid_config();
        config.storage.backend = StorageBackend::Local;
        config.storage.local_storage_path = Some("/var/lib/reelhouse".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_BASE_URL"));
    }

    #[test]
    fn test_tool_path_with_metacharacters_rejected() {
        let mut config = valid_config();
        config.media.ffmpeg_path = "ffmpeg; rm -rf /".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("FFMPEG_PATH"));
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = valid_config();
        config.base.environment = "Production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.base.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_numeric_setting_falls_back_only_when_unset() {
        assert_eq!(parse_or("DB_MAX_CONNECTIONS", None, 10u32).unwrap(), 10);
        assert_eq!(parse_or("DB_MAX_CONNECTIONS", Some("  ".to_string()), 10u32).unwrap(), 10);
        assert_eq!(parse_or("DB_MAX_CONNECTIONS", Some(" 25 ".to_string()), 10u32).unwrap(), 25);
    }

    #[test]
    fn test_malformed_numeric_setting_rejected() {
        let err = parse_or("MAX_VIDEO_SIZE_BYTES", Some("1GB".to_string()), 1usize).unwrap_err();
        assert!(err.to_string().contains("MAX_VIDEO_SIZE_BYTES"));

        let err = parse_or("MEDIA_TOOL_TIMEOUT_SECS", Some("-5".to_string()), 300u64).unwrap_err();
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_database_url_must_be_postgres() {
        let mut config = valid_config();
        config.database.database_url = Some("mysql://localhost/videos".to_string());
        assert!(config.validate().is_err());
        config.database.database_url = Some("postgres://localhost/videos".to_string());
        assert!(config.validate().is_ok());
    }
}
