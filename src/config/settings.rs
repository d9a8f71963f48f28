use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::config::{DEFAULT_AUTHORIZE_URL, DEFAULT_GRAPHQL_URL, DEFAULT_TOKEN_URL};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub linear: LinearSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LinearSettings {
    pub authorize_url: String,
    pub token_url: String,
    pub graphql_url: String,
    pub request_timeout_seconds: u64,
    /// API key pré-configurada; autenticada no startup quando presente
    #[serde(default)]
    pub api_key: Option<String>,
    /// Credenciais OAuth usadas por `POST /auth/linear` quando o corpo as omite
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

impl LinearSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Pares (campo do argumento, valor configurado) para o início do OAuth
    pub fn oauth_defaults(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("clientId", self.client_id.as_deref()),
            ("clientSecret", self.client_secret.as_deref()),
            ("redirectUri", self.redirect_uri.as_deref()),
        ]
    }
}

/// Variáveis de ambiente curtas e a chave de configuração que sobrescrevem
const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("PORT", "server.port"),
    ("LINEAR_API_KEY", "linear.api_key"),
    ("LINEAR_CLIENT_ID", "linear.client_id"),
    ("LINEAR_CLIENT_SECRET", "linear.client_secret"),
    ("LINEAR_REDIRECT_URI", "linear.redirect_uri"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Self::defaults()?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("LINEAR_AUTH").separator("__"));

        // Variáveis de ambiente "curtas" usadas no deploy
        builder = Self::apply_env_overrides(builder, |name| std::env::var(name).ok())?;

        builder.build()?.try_deserialize()
    }

    fn apply_env_overrides(
        mut builder: ConfigBuilder<DefaultState>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = lookup(var) {
                builder = builder.set_override(key, value)?;
            }
        }
        Ok(builder)
    }

    /// Valores padrão (sem arquivos nem ambiente)
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("linear.authorize_url", DEFAULT_AUTHORIZE_URL)?
            .set_default("linear.token_url", DEFAULT_TOKEN_URL)?
            .set_default("linear.graphql_url", DEFAULT_GRAPHQL_URL)?
            .set_default("linear.request_timeout_seconds", 30)
    }
}
