use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Signing secret used when nothing else is configured. Fine for local runs only.
pub const DEV_JWT_SECRET: &str = "folio-development-secret-change-me";

/// Runtime configuration.
///
/// Layered as: built-in defaults, then `config.toml` (optional), then
/// `FOLIO_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// Per-username login attempts allowed each minute; 0 turns throttling off.
    pub login_attempts_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            bcrypt_cost: 12,
            default_page_size: 10,
            max_page_size: 100,
            login_attempts_per_minute: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("FOLIO_"))
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
