use std::env;
use std::path::PathBuf;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

// Fixed credentials for the two databases; only the hosts vary by
// deployment and come from the environment.
const LOCAL_DB_PORT: u16 = 5432;
const LOCAL_DB_USER: &str = "my_local_user";
const LOCAL_DB_PASSWORD: &str = "my_local_pass";
const LOCAL_DB_NAME: &str = "my_local_db";

const REMOTE_DB_PORT: u16 = 5432;
const REMOTE_DB_USER: &str = "my_remote_user";
const REMOTE_DB_PASSWORD: &str = "my_remote_pass";
const REMOTE_DB_NAME: &str = "my_remote_db";

// Outgoing mail account used for result delivery.
pub const SMTP_HOST: &str = "smtp.example.com";
pub const SMTP_PORT: u16 = 587;
pub const SMTP_USER: &str = "admin@example.com";
pub const SMTP_PASSWORD: &str = "password";
pub const SENDER_EMAIL: &str = "admin@example.com";

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    pub fn local(host: String) -> Self {
        Self {
            host,
            port: LOCAL_DB_PORT,
            user: LOCAL_DB_USER.to_string(),
            password: LOCAL_DB_PASSWORD.to_string(),
            database: LOCAL_DB_NAME.to_string(),
        }
    }

    pub fn remote(host: String) -> Self {
        Self {
            host,
            port: REMOTE_DB_PORT,
            user: REMOTE_DB_USER.to_string(),
            password: REMOTE_DB_PASSWORD.to_string(),
            database: REMOTE_DB_NAME.to_string(),
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub local_db: DbConfig,
    pub remote_db: DbConfig,
    pub cors_allowed_origin: String,
    pub notification_email: String,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    // Every variable has a default so a bare `docker run` works; an empty
    // value counts as unset.
    pub fn from_env() -> Self {
        Self {
            local_db: DbConfig::local(env_or("LOCAL_DB_HOST", "127.0.0.1")),
            remote_db: DbConfig::remote(env_or("REMOTE_DB_HOST", "127.0.0.1")),
            cors_allowed_origin: env_or("CORS_ALLOWED_ORIGIN", "http://localhost:8080"),
            notification_email: env_or("USER_EMAIL", "admin@example.com"),
            log_file: env::var("LOG_FILE_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }
}

pub(crate) fn env_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
