use std::time::Duration as StdDuration;

use chrono::Duration;
use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState,
};
use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_FILE, MAX_TTL_SECS, env, prod};
use crate::auth::SignerConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub password_reset: PasswordResetSettings,
    pub admin_api: AdminApiSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub private_key: Secret<String>,
    pub audience: String,
    pub issuer: String,
    pub subject: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl JwtSettings {
    pub fn signer_config(&self) -> SignerConfig {
        SignerConfig::new(&self.audience, &self.issuer, &self.subject)
            .with_access_token_ttl(self.access_token_ttl())
            .with_refresh_token_ttl(self.refresh_token_ttl())
    }

    pub fn access_token_ttl(&self) -> Duration {
        seconds(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        seconds(self.refresh_token_ttl_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_ttl("jwt.access_token_ttl_secs", self.access_token_ttl_secs, 1)?;
        check_ttl("jwt.refresh_token_ttl_secs", self.refresh_token_ttl_secs, 1)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetSettings {
    pub token_ttl_secs: i64,
    pub link_base_url: String,
}

impl PasswordResetSettings {
    /// `None` when expiry is disabled with a TTL of zero.
    pub fn token_ttl(&self) -> Option<Duration> {
        (self.token_ttl_secs > 0).then(|| seconds(self.token_ttl_secs))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_ttl("password_reset.token_ttl_secs", self.token_ttl_secs, 0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminApiSettings {
    pub enabled: bool,
    #[serde(default)]
    pub username: String,
    /// A plain secret, or an Argon2 PHC string.
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailSettings {
    pub fn timeout(&self) -> StdDuration {
        StdDuration::from_millis(self.timeout_millis)
    }
}

fn empty_secret() -> Secret<String> {
    Secret::from(String::new())
}

fn seconds(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or(Duration::MAX)
}

fn check_ttl(key: &str, secs: i64, min: i64) -> Result<(), ConfigError> {
    if (min..=MAX_TTL_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ConfigError::Message(format!(
            "{key} must be between {min} and {MAX_TTL_SECS} seconds, got {secs}"
        )))
    }
}

impl Settings {
    /// Loads defaults, then `config/base.json` if present, then `LATCHKEY__*`
    /// environment variables (after reading `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::with_defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Overlays a JSON document on the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.jwt.validate()?;
        self.password_reset.validate()?;
        Ok(self)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.address", prod::APP_ADDRESS)?
            .set_default("database.max_connections", prod::DATABASE_MAX_CONNECTIONS)?
            .set_default("jwt.audience", prod::jwt::AUDIENCE)?
            .set_default("jwt.issuer", prod::jwt::ISSUER)?
            .set_default("jwt.subject", prod::jwt::SUBJECT)?
            .set_default("jwt.access_token_ttl_secs", prod::jwt::ACCESS_TOKEN_TTL_SECS)?
            .set_default("jwt.refresh_token_ttl_secs", prod::jwt::REFRESH_TOKEN_TTL_SECS)?
            .set_default("password_reset.token_ttl_secs", prod::password_reset::TOKEN_TTL_SECS)?
            .set_default("password_reset.link_base_url", prod::password_reset::LINK_BASE_URL)?
            .set_default("admin_api.enabled", false)?
            .set_default("email.base_url", prod::email_client::BASE_URL)?
            .set_default("email.sender", prod::email_client::SENDER)?
            .set_default("email.auth_token", "")?
            .set_default("email.timeout_millis", prod::email_client::TIMEOUT_MILLIS)
    }
}

/// Origins allowed to make cross-origin requests to the service.
#[derive(Debug, Clone, Default)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&[String]> for AllowedOrigins {
    type Error = http::header::InvalidHeaderValue;

    fn try_from(origins: &[String]) -> Result<Self, Self::Error> {
        origins
            .iter()
            .map(|origin| HeaderValue::from_str(origin))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
