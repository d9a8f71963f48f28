//! Linear OAuth2 / PAT authenticator
//!
//! Implementação concreta de [`Authenticator`] contra os endpoints OAuth2 do
//! Linear. A credencial fica apenas em memória: não há persistência nem refresh.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use super::{
    AuthConfig, AuthError, AuthResult, Authenticator, Credential, LinearEndpoints,
    OAuthCredentials,
};
use crate::utils::logging::*;
use crate::utils::{mask_secret, truncate_safe};

/// Resposta do endpoint de token do Linear
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<TokenScope>,
}

/// O Linear devolve o escopo como lista; outros servidores como string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TokenScope {
    List(Vec<String>),
    Joined(String),
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Default)]
struct AuthState {
    oauth: Option<OAuthCredentials>,
    credential: Option<Credential>,
}

/// Autenticador Linear
pub struct LinearAuth {
    endpoints: LinearEndpoints,
    http_client: Client,
    state: RwLock<AuthState>,
}

impl LinearAuth {
    /// Criar autenticador com timeout fixo para a troca de token
    pub fn new(endpoints: LinearEndpoints, request_timeout: Duration) -> AuthResult<Self> {
        let http_client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            endpoints,
            http_client,
            state: RwLock::new(AuthState::default()),
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate_oauth(credentials: &OAuthCredentials) -> AuthResult<()> {
        if credentials.client_id.trim().is_empty() {
            return Err(AuthError::config_error("clientId vazio"));
        }
        if credentials.client_secret.trim().is_empty() {
            return Err(AuthError::config_error("clientSecret vazio"));
        }
        // Só sintaxe: a URI registrada no app não é verificada aqui
        url::Url::parse(&credentials.redirect_uri)?;
        Ok(())
    }

    /// Trocar authorization code por access token
    async fn exchange_code_for_token(
        &self,
        credentials: &OAuthCredentials,
        code: &str,
    ) -> AuthResult<OAuthToken> {
        log_info(&format!(
            "📤 [OAuth2] POST {} - client_id: {}, code: {}...",
            self.endpoints.token_url,
            credentials.client_id,
            truncate_safe(code, 6)
        ));

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log_error(&format!(
                "❌ [OAuth2] Token exchange failed: {} - {}",
                status, body
            ));
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let token: OAuthToken = serde_json::from_str(&body)?;
        Ok(token)
    }
}

#[async_trait]
impl Authenticator for LinearAuth {
    fn initialize(&self, config: AuthConfig) -> AuthResult<()> {
        match config {
            AuthConfig::OAuth(credentials) => {
                Self::validate_oauth(&credentials)?;
                log_info(&format!(
                    "🔐 [OAuth2] Inicializado para client_id {}",
                    credentials.client_id
                ));

                let mut state = self.write_state();
                state.oauth = Some(credentials);
                state.credential = None;
            }
            AuthConfig::Pat { access_token } => {
                if access_token.trim().is_empty() {
                    return Err(AuthError::config_error("accessToken vazio"));
                }
                log_info(&format!(
                    "🔑 [PAT] API key registrada: {}",
                    mask_secret(&access_token)
                ));

                self.write_state().credential = Some(Credential::ApiKey(access_token));
            }
        }
        Ok(())
    }

    fn authorization_url(&self) -> AuthResult<String> {
        let state = self.read_state();
        let credentials = state.oauth.as_ref().ok_or(AuthError::NotInitialized)?;

        let csrf_state = uuid::Uuid::new_v4().to_string();
        let url = credentials.authorization_url(&self.endpoints.authorize_url, &csrf_state);

        log_info(&format!("↗️  [OAuth2] URL de autorização gerada: {}", url));
        Ok(url)
    }

    async fn handle_callback(&self, code: &str) -> AuthResult<()> {
        log_info("📥 [OAuth2] Callback recebido");

        let credentials = self
            .read_state()
            .oauth
            .clone()
            .ok_or(AuthError::NotInitialized)?;

        let token = self.exchange_code_for_token(&credentials, code).await?;

        log_info(&format!(
            "✅ [OAuth2] Access token obtido: {}",
            mask_secret(&token.access_token)
        ));

        self.write_state().credential = Some(Credential::OAuthToken(token.access_token));
        Ok(())
    }

    fn credential(&self) -> Option<Credential> {
        self.read_state().credential.clone()
    }
}
