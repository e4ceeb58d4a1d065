use crate::error::config::ConfigError;

/// Runtime environment the process runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Production,
    Development,
}

/// How inbound interaction signatures are verified.
#[derive(Debug, Clone)]
pub enum SignaturePolicy {
    /// Verify every request against this hex-encoded Ed25519 public key.
    Verify { public_key_hex: String },
    /// Skip verification for local testing. Only constructible outside
    /// production: `Config::from_env` refuses to start a production process
    /// without a public key.
    DevBypass,
}

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_application_id: u64,
    pub signature_policy: SignaturePolicy,

    pub app_env: AppEnv,
    pub app_url: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = match std::env::var("APP_ENV").as_deref() {
            Ok("development") => AppEnv::Development,
            _ => AppEnv::Production,
        };

        let discord_application_id = required("DISCORD_APPLICATION_ID")?
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "DISCORD_APPLICATION_ID".to_string(),
                reason: e.to_string(),
            })?;

        let signature_policy = match (std::env::var("DISCORD_PUBLIC_KEY"), app_env) {
            (Ok(public_key_hex), _) => SignaturePolicy::Verify { public_key_hex },
            (Err(_), AppEnv::Development) => SignaturePolicy::DevBypass,
            (Err(_), AppEnv::Production) => {
                return Err(ConfigError::MissingEnvVar("DISCORD_PUBLIC_KEY".to_string()))
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_application_id,
            signature_policy,
            app_env,
            app_url: required("APP_URL")?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
