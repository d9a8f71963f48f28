//! Contrato do objeto de autenticação consumido pelos handlers

use async_trait::async_trait;
use std::fmt;

use super::{AuthConfig, AuthResult};
use crate::utils::mask_secret;

/// Credencial corrente mantida pelo autenticador
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Personal Access Token (API key)
    ApiKey(String),
    /// Access token obtido pela troca OAuth2
    OAuthToken(String),
}

impl Credential {
    pub fn secret(&self) -> &str {
        match self {
            Credential::ApiKey(token) | Credential::OAuthToken(token) => token,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(token) => write!(f, "ApiKey({})", mask_secret(token)),
            Credential::OAuthToken(token) => write!(f, "OAuthToken({})", mask_secret(token)),
        }
    }
}

/// Objeto de autenticação: guarda o estado da credencial e executa a troca de token
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Inicializa com uma das variantes de configuração
    fn initialize(&self, config: AuthConfig) -> AuthResult<()>;

    /// URL de autorização; exige inicialização OAuth prévia
    fn authorization_url(&self) -> AuthResult<String>;

    /// Troca o authorization code por um access token
    async fn handle_callback(&self, code: &str) -> AuthResult<()>;

    fn credential(&self) -> Option<Credential>;

    fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }
}
