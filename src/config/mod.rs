use std::env;

use thiserror::Error;

/// Dev-only fallback for the password-derivation salt. Real deployments set
/// PASSWORD_SALT; the fallback keeps local runs working without one.
const DEFAULT_DEV_SALT: &str = "portfolio-dev-salt";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DEV_FRONTEND: &str = "http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not defined in the environment")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub password_salt: String,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the environment. A missing connection string
    /// or signing secret is fatal; the caller exits rather than serving
    /// degraded traffic.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let password_salt =
            env::var("PASSWORD_SALT").unwrap_or_else(|_| DEFAULT_DEV_SALT.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let allowed_origins =
            assemble_origins(env::var("FRONTEND_URL").ok(), env::var("FRONTEND_DEV_URL").ok());

        Ok(Self {
            environment: Environment::from_env(),
            database_url,
            port,
            jwt_secret,
            password_salt,
            allowed_origins,
        })
    }
}

/// Build the CORS allow-list: the production origin when configured, plus the
/// dev origin and its 127.0.0.1 twin so loopback requests pass preflight.
fn assemble_origins(frontend_url: Option<String>, frontend_dev_url: Option<String>) -> Vec<String> {
    let mut origins = Vec::new();
    if let Some(url) = frontend_url {
        origins.push(url);
    }

    let dev_url = frontend_dev_url.unwrap_or_else(|| DEFAULT_DEV_FRONTEND.to_string());
    let loopback = dev_url.replace("localhost", "127.0.0.1");
    origins.push(dev_url);
    if !origins.contains(&loopback) {
        origins.push(loopback);
    }

    origins
}
