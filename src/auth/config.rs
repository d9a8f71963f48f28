//! Linear Auth Configuration
//!
//! Variantes de configuração aceitas pelo objeto de autenticação e os
//! endpoints OAuth2 do Linear

use serde::{Deserialize, Serialize};

use crate::config::LinearSettings;

pub const DEFAULT_AUTHORIZE_URL: &str = "https://linear.app/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://api.linear.app/oauth/token";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.linear.app/graphql";

/// Escopos solicitados na autorização (fixos, sem negociação)
pub const OAUTH_SCOPES: &str = "read,write";

/// Configuração de autenticação: OAuth2 ou Personal Access Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthConfig {
    #[serde(rename = "oauth")]
    OAuth(OAuthCredentials),

    #[serde(rename = "pat")]
    Pat {
        #[serde(rename = "accessToken")]
        access_token: String,
    },
}

/// Credenciais do aplicativo OAuth registrado no Linear
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl OAuthCredentials {
    /// Gerar URL de autorização do Linear
    pub fn authorization_url(&self, authorize_endpoint: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            authorize_endpoint,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(OAUTH_SCOPES),
            urlencoding::encode(state)
        )
    }
}

/// Endpoints OAuth2/GraphQL do Linear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearEndpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub graphql_url: String,
}

impl Default for LinearEndpoints {
    fn default() -> Self {
        Self {
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

impl From<&LinearSettings> for LinearEndpoints {
    fn from(settings: &LinearSettings) -> Self {
        Self {
            authorize_url: settings.authorize_url.clone(),
            token_url: settings.token_url.clone(),
            graphql_url: settings.graphql_url.clone(),
        }
    }
}
