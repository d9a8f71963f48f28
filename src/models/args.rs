//! Argumentos das ferramentas de autenticação
//!
//! Cada struct aceita o "saco" de argumentos solto (JSON) que o chamador
//! envia; `validate` converte para o tipo forte usado na delegação.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::OAuthCredentials;
use crate::utils::{HandlerError, HandlerResult};

/// Argumentos de `linear_auth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOAuthArgs {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Argumentos de `linear_auth_api_key`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyArgs {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Argumentos de `linear_auth_callback`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackArgs {
    #[serde(default)]
    pub code: Option<String>,
}

/// Lê um campo string do saco de argumentos; valores não-string contam como ausentes
fn string_field(args: &Value, name: &str) -> Option<String> {
    args.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Retorna o valor se presente e não vazio (espaços em branco contam como vazio)
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Confere a lista de campos obrigatórios, acumulando todos os ausentes
pub fn require_params(fields: &[(&'static str, &Option<String>)]) -> HandlerResult<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(HandlerError::Validation { missing })
    }
}

impl StartOAuthArgs {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            redirect_uri: Some(redirect_uri.into()),
        }
    }

    pub fn validate(&self) -> HandlerResult<OAuthCredentials> {
        require_params(&[
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("redirectUri", &self.redirect_uri),
        ])?;

        Ok(OAuthCredentials {
            client_id: self.client_id.clone().unwrap_or_default(),
            client_secret: self.client_secret.clone().unwrap_or_default(),
            redirect_uri: self.redirect_uri.clone().unwrap_or_default(),
        })
    }
}

impl From<&Value> for StartOAuthArgs {
    fn from(args: &Value) -> Self {
        Self {
            client_id: string_field(args, "clientId"),
            client_secret: string_field(args, "clientSecret"),
            redirect_uri: string_field(args, "redirectUri"),
        }
    }
}

impl ApiKeyArgs {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    pub fn validate(&self) -> HandlerResult<String> {
        require_params(&[("apiKey", &self.api_key)])?;
        Ok(self.api_key.clone().unwrap_or_default())
    }
}

impl From<&Value> for ApiKeyArgs {
    fn from(args: &Value) -> Self {
        Self {
            api_key: string_field(args, "apiKey"),
        }
    }
}

impl CallbackArgs {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn validate(&self) -> HandlerResult<String> {
        require_params(&[("code", &self.code)])?;
        Ok(self.code.clone().unwrap_or_default())
    }
}

impl From<&Value> for CallbackArgs {
    fn from(args: &Value) -> Self {
        Self {
            code: string_field(args, "code"),
        }
    }
}
