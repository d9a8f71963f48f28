//! Handler das ferramentas de autenticação Linear
//!
//! Três operações independentes (OAuth start, OAuth callback, API key), todas
//! no formato validar -> delegar ao autenticador -> formatar resposta. O
//! estado da credencial vive no autenticador injetado, nunca aqui.

use serde_json::Value;
use std::sync::Arc;

use super::base::{create_response, handle_auth_error, log_validation};
use crate::auth::{AuthConfig, Authenticator};
use crate::models::{ApiKeyArgs, CallbackArgs, StartOAuthArgs, ToolResponse};
use crate::utils::logging::*;
use crate::utils::{mask_secret, truncate_safe, HandlerResult};

const OP_START_OAUTH: &str = "initialize authentication";
const OP_API_KEY: &str = "authenticate with API key";
const OP_CALLBACK: &str = "handle authentication callback";

pub const API_KEY_SUCCESS_MESSAGE: &str = "Successfully authenticated with Linear using API key";
pub const CALLBACK_SUCCESS_MESSAGE: &str = "Successfully authenticated with Linear";

#[derive(Clone)]
pub struct AuthHandler {
    auth: Arc<dyn Authenticator>,
}

impl AuthHandler {
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        Self { auth }
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.auth
    }

    /// Inicia o fluxo OAuth2 e devolve a URL de autorização
    pub async fn start_oauth(&self, args: &StartOAuthArgs) -> HandlerResult<ToolResponse> {
        let credentials = args
            .validate()
            .map_err(|e| log_validation(OP_START_OAUTH, e))?;

        log_info(&format!(
            "🚀 [OAuth2] Iniciando fluxo de autorização para client_id {}",
            credentials.client_id
        ));

        self.auth
            .initialize(AuthConfig::OAuth(credentials))
            .map_err(|e| handle_auth_error(OP_START_OAUTH, e))?;

        let auth_url = self
            .auth
            .authorization_url()
            .map_err(|e| handle_auth_error(OP_START_OAUTH, e))?;

        Ok(create_response(format!(
            "Please visit the following URL to authorize the application:\n{}",
            auth_url
        )))
    }

    /// Registra uma API key (PAT)
    ///
    /// O cliente GraphQL não é criado aqui: isso cabe a quem observa o sucesso
    /// desta chamada (ver `AuthToolRouter`).
    pub async fn authenticate_with_api_key(
        &self,
        args: &ApiKeyArgs,
    ) -> HandlerResult<ToolResponse> {
        let api_key = args.validate().map_err(|e| log_validation(OP_API_KEY, e))?;

        log_info(&format!("🔑 [PAT] Autenticando com API key {}", mask_secret(&api_key)));

        self.auth
            .initialize(AuthConfig::Pat {
                access_token: api_key,
            })
            .map_err(|e| handle_auth_error(OP_API_KEY, e))?;

        Ok(create_response(API_KEY_SUCCESS_MESSAGE))
    }

    /// Completa o fluxo OAuth2 trocando o code recebido no callback
    pub async fn complete_oauth_callback(
        &self,
        args: &CallbackArgs,
    ) -> HandlerResult<ToolResponse> {
        let code = args.validate().map_err(|e| log_validation(OP_CALLBACK, e))?;

        log_info(&format!("🔑 [OAuth2] Code recebido: {}...", truncate_safe(&code, 6)));

        self.auth
            .handle_callback(&code)
            .await
            .map_err(|e| handle_auth_error(OP_CALLBACK, e))?;

        log_info("✅ [OAuth2] Autenticação concluída");
        Ok(create_response(CALLBACK_SUCCESS_MESSAGE))
    }

    pub async fn handle_auth(&self, args: &Value) -> HandlerResult<ToolResponse> {
        self.start_oauth(&StartOAuthArgs::from(args)).await
    }

    pub async fn handle_auth_api_key(&self, args: &Value) -> HandlerResult<ToolResponse> {
        self.authenticate_with_api_key(&ApiKeyArgs::from(args)).await
    }

    pub async fn handle_auth_callback(&self, args: &Value) -> HandlerResult<ToolResponse> {
        self.complete_oauth_callback(&CallbackArgs::from(args)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::OAuthCredentials;
    use crate::test_support::{AuthCall, MockAuthenticator};
    use serde_json::json;

    fn handler_with(mock: MockAuthenticator) -> (AuthHandler, Arc<MockAuthenticator>) {
        let mock = Arc::new(mock);
        (AuthHandler::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_missing_fields_never_touch_authenticator() {
        let (handler, mock) = handler_with(MockAuthenticator::default());

        let err = handler.handle_auth(&json!({})).await.unwrap_err();
        assert!(err.is_validation());
        let err = handler.handle_auth_api_key(&json!({})).await.unwrap_err();
        assert!(err.is_validation());
        let err = handler.handle_auth_callback(&json!({"code": ""})).await.unwrap_err();
        assert!(err.is_validation());

        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_redirect_uri_is_named() {
        let (handler, mock) = handler_with(MockAuthenticator::default());

        let err = handler
            .handle_auth(&json!({"clientId": "a", "clientSecret": "b"}))
            .await
            .unwrap_err();

        assert_eq!(err.missing_fields(), &["redirectUri"]);
        assert!(err.to_string().contains("redirectUri"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_oauth_initializes_then_returns_url_verbatim() {
        let (handler, mock) = handler_with(MockAuthenticator {
            url: "https://linear.app/oauth/authorize?client_id=a&state=xyz".to_string(),
            ..Default::default()
        });

        let response = handler
            .start_oauth(&StartOAuthArgs::new("a", "b", "https://example.com/cb"))
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                AuthCall::Initialize(AuthConfig::OAuth(OAuthCredentials {
                    client_id: "a".to_string(),
                    client_secret: "b".to_string(),
                    redirect_uri: "https://example.com/cb".to_string(),
                })),
                AuthCall::AuthorizationUrl,
            ]
        );
        assert!(!response.is_error);
        assert_eq!(
            response.text(),
            Some(
                "Please visit the following URL to authorize the application:\n\
                 https://linear.app/oauth/authorize?client_id=a&state=xyz"
            )
        );
    }

    #[tokio::test]
    async fn test_start_oauth_wraps_initialization_failure() {
        let (handler, mock) = handler_with(MockAuthenticator {
            fail_initialize: Some("bad client".to_string()),
            ..Default::default()
        });

        let err = handler
            .start_oauth(&StartOAuthArgs::new("a", "b", "https://example.com/cb"))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Failed to initialize authentication: "));
        assert!(err.to_string().contains("bad client"));
        // Falhou antes de pedir a URL
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_start_oauth_wraps_url_failure() {
        let (handler, _mock) = handler_with(MockAuthenticator {
            fail_url: Some("no url".to_string()),
            ..Default::default()
        });

        let err = handler
            .start_oauth(&StartOAuthArgs::new("a", "b", "https://example.com/cb"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("initialize authentication"));
        assert!(err.to_string().contains("no url"));
    }

    #[tokio::test]
    async fn test_api_key_uses_pat_variant() {
        let (handler, mock) = handler_with(MockAuthenticator::default());

        let response = handler
            .handle_auth_api_key(&json!({"apiKey": "abc123"}))
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![AuthCall::Initialize(AuthConfig::Pat {
                access_token: "abc123".to_string()
            })]
        );
        assert_eq!(response.text(), Some(API_KEY_SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_api_key_format_is_not_checked() {
        let (handler, _mock) = handler_with(MockAuthenticator::default());

        let response = handler
            .authenticate_with_api_key(&ApiKeyArgs::new("not-a-linear-key!"))
            .await
            .unwrap();
        assert_eq!(response.text(), Some(API_KEY_SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_api_key_failure_is_wrapped() {
        let (handler, _mock) = handler_with(MockAuthenticator {
            fail_initialize: Some("rejected".to_string()),
            ..Default::default()
        });

        let err = handler
            .authenticate_with_api_key(&ApiKeyArgs::new("abc123"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to authenticate with API key: "));
        assert!(err.to_string().contains("rejected"));
    }

    #[tokio::test]
    async fn test_callback_awaits_exchange() {
        let (handler, mock) = handler_with(MockAuthenticator::default());

        let response = handler
            .complete_oauth_callback(&CallbackArgs::new("xyz"))
            .await
            .unwrap();

        assert_eq!(mock.calls(), vec![AuthCall::HandleCallback("xyz".to_string())]);
        assert_eq!(response.text(), Some(CALLBACK_SUCCESS_MESSAGE));
        assert!(mock.is_authenticated());
    }

    #[tokio::test]
    async fn test_callback_rejection_mentions_operation_and_cause() {
        let (handler, _mock) = handler_with(MockAuthenticator {
            fail_callback: Some("invalid code".to_string()),
            ..Default::default()
        });

        let err = handler
            .complete_oauth_callback(&CallbackArgs::new("xyz"))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("handle authentication callback"));
        assert!(message.contains("invalid code"));
        assert!(err.to_response().is_error);
    }

    #[tokio::test]
    async fn test_identical_calls_delegate_independently() {
        let (handler, mock) = handler_with(MockAuthenticator::default());
        let args = CallbackArgs::new("xyz");

        let first = handler.complete_oauth_callback(&args).await.unwrap();
        let second = handler.complete_oauth_callback(&args).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            mock.calls(),
            vec![
                AuthCall::HandleCallback("xyz".to_string()),
                AuthCall::HandleCallback("xyz".to_string()),
            ]
        );
    }
}
