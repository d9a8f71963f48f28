//! Autenticador de teste que registra cada chamada recebida

use async_trait::async_trait;
use std::sync::Mutex;

use crate::auth::{AuthConfig, AuthError, AuthResult, Authenticator, Credential};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    Initialize(AuthConfig),
    AuthorizationUrl,
    HandleCallback(String),
}

pub struct MockAuthenticator {
    pub url: String,
    pub fail_initialize: Option<String>,
    pub fail_url: Option<String>,
    pub fail_callback: Option<String>,
    /// Token entregue após um callback bem-sucedido
    pub callback_token: String,
    pub recorded_calls: Mutex<Vec<AuthCall>>,
    pub current: Mutex<Option<Credential>>,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self {
            url: "https://linear.app/oauth/authorize?client_id=mock".to_string(),
            fail_initialize: None,
            fail_url: None,
            fail_callback: None,
            callback_token: "oauth-token".to_string(),
            recorded_calls: Mutex::new(Vec::new()),
            current: Mutex::new(None),
        }
    }
}

impl MockAuthenticator {
    pub fn calls(&self) -> Vec<AuthCall> {
        self.recorded_calls.lock().unwrap().clone()
    }

    fn record(&self, call: AuthCall) {
        self.recorded_calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    fn initialize(&self, config: AuthConfig) -> AuthResult<()> {
        self.record(AuthCall::Initialize(config.clone()));
        if let Some(message) = &self.fail_initialize {
            return Err(AuthError::config_error(message.clone()));
        }
        if let AuthConfig::Pat { access_token } = config {
            *self.current.lock().unwrap() = Some(Credential::ApiKey(access_token));
        }
        Ok(())
    }

    fn authorization_url(&self) -> AuthResult<String> {
        self.record(AuthCall::AuthorizationUrl);
        match &self.fail_url {
            Some(message) => Err(AuthError::config_error(message.clone())),
            None => Ok(self.url.clone()),
        }
    }

    async fn handle_callback(&self, code: &str) -> AuthResult<()> {
        self.record(AuthCall::HandleCallback(code.to_string()));
        tokio::task::yield_now().await;
        if let Some(message) = &self.fail_callback {
            return Err(AuthError::TokenExchange {
                status: 400,
                body: message.clone(),
            });
        }
        *self.current.lock().unwrap() = Some(Credential::OAuthToken(self.callback_token.clone()));
        Ok(())
    }

    fn credential(&self) -> Option<Credential> {
        self.current.lock().unwrap().clone()
    }
}
