//! Handler factory: despacha ferramentas por nome e cria o cliente GraphQL
//! depois de uma autenticação bem-sucedida

use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::auth::AuthHandler;
use super::base::handle_error;
use crate::auth::Authenticator;
use crate::graphql::LinearGraphQLClient;
use crate::models::ToolResponse;
use crate::utils::logging::*;
use crate::utils::{HandlerError, HandlerResult};

const OP_GRAPHQL_CLIENT: &str = "initialize GraphQL client";

/// Ferramentas de autenticação expostas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTool {
    Auth,
    AuthCallback,
    AuthApiKey,
}

impl AuthTool {
    pub const ALL: [AuthTool; 3] = [AuthTool::Auth, AuthTool::AuthCallback, AuthTool::AuthApiKey];

    pub fn name(self) -> &'static str {
        match self {
            AuthTool::Auth => "linear_auth",
            AuthTool::AuthCallback => "linear_auth_callback",
            AuthTool::AuthApiKey => "linear_auth_api_key",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AuthTool::Auth => "Initialize OAuth flow with Linear",
            AuthTool::AuthCallback => "Handle OAuth callback",
            AuthTool::AuthApiKey => "Authenticate with Linear using an API key",
        }
    }

    pub fn input_schema(self) -> Value {
        let (properties, required) = match self {
            AuthTool::Auth => (
                json!({
                    "clientId": {"type": "string", "description": "Linear OAuth client ID"},
                    "clientSecret": {"type": "string", "description": "Linear OAuth client secret"},
                    "redirectUri": {"type": "string", "description": "OAuth redirect URI"}
                }),
                json!(["clientId", "clientSecret", "redirectUri"]),
            ),
            AuthTool::AuthCallback => (
                json!({"code": {"type": "string", "description": "OAuth authorization code"}}),
                json!(["code"]),
            ),
            AuthTool::AuthApiKey => (
                json!({"apiKey": {"type": "string", "description": "Linear API key"}}),
                json!(["apiKey"]),
            ),
        };

        json!({"type": "object", "properties": properties, "required": required})
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl FromStr for AuthTool {
    type Err = HandlerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        AuthTool::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| HandlerError::UnknownTool(name.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Roteador das ferramentas de autenticação
///
/// Dono do handle do cliente GraphQL: após `linear_auth_api_key` ou
/// `linear_auth_callback` bem-sucedidos, constrói o cliente a partir da
/// credencial corrente do autenticador. Se a construção falhar, a chamada
/// falha como erro de delegação e o autenticador continua inicializado.
pub struct AuthToolRouter {
    handler: AuthHandler,
    graphql_url: String,
    request_timeout: Duration,
    graphql_client: RwLock<Option<Arc<LinearGraphQLClient>>>,
}

impl AuthToolRouter {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        graphql_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            handler: AuthHandler::new(auth),
            graphql_url: graphql_url.into(),
            request_timeout,
            graphql_client: RwLock::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.handler.authenticator().is_authenticated()
    }

    pub fn graphql_client(&self) -> Option<Arc<LinearGraphQLClient>> {
        self.graphql_client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        AuthTool::ALL.into_iter().map(AuthTool::definition).collect()
    }

    pub async fn dispatch(&self, name: &str, args: &Value) -> HandlerResult<ToolResponse> {
        let tool = AuthTool::from_str(name)?;
        log_tool_call(tool.name());

        match tool {
            AuthTool::Auth => {
                let result = self.handler.handle_auth(args).await;
                // Reiniciar o OAuth pode descartar a credencial anterior
                self.drop_stale_graphql_client();
                result
            }
            AuthTool::AuthApiKey => {
                let response = self.handler.handle_auth_api_key(args).await?;
                self.initialize_graphql_client()?;
                Ok(response)
            }
            AuthTool::AuthCallback => {
                let response = self.handler.handle_auth_callback(args).await?;
                self.initialize_graphql_client()?;
                Ok(response)
            }
        }
    }

    fn initialize_graphql_client(&self) -> HandlerResult<()> {
        let credential = self
            .handler
            .authenticator()
            .credential()
            .ok_or_else(|| {
                handle_error(OP_GRAPHQL_CLIENT, "no credential available after authentication")
            })?;

        let client = LinearGraphQLClient::new(&self.graphql_url, credential, self.request_timeout)
            .map_err(|e| handle_error(OP_GRAPHQL_CLIENT, e))?;

        log_info(&format!("✅ [GraphQL] Cliente inicializado para {}", client.endpoint()));

        *self
            .graphql_client
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(client));
        Ok(())
    }

    fn drop_stale_graphql_client(&self) {
        if self.handler.authenticator().credential().is_some() {
            return;
        }
        let mut client = self
            .graphql_client
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if client.take().is_some() {
            log_info("🔄 [GraphQL] Credencial descartada - cliente removido");
        }
    }
}
