use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub admin_token: String,
    pub enable_swagger: bool,
    pub port: u16,
    pub academy_name: String,
    pub academy_location: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP").separator("_"))
            .set_default("debug", false)?
            .set_default("admin_token", "default-token-change-me")?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("academy_name", "Iron Tiger Martial Arts Academy")?
            .set_default("academy_location", "412 Willow Ave, Portland, OR")?
            .build()?;

        config.try_deserialize()
    }
}
