//! Endpoints HTTP das ferramentas de autenticação
//!
//! - `POST /auth/linear` inicia o OAuth2 (JSON com clientId/clientSecret/redirectUri)
//! - `GET /auth/linear/callback?code=XXX` completa o OAuth2
//! - `POST /auth/linear/api-key` registra uma API key
//! - `GET /tools` / `POST /tools/:name` expõem as ferramentas por nome

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::time::Instant;
use tower_http::trace::TraceLayer;

use super::factory::{AuthTool, ToolDefinition};
use super::health::health_check;
use crate::config::LinearSettings;
use crate::models::ToolResponse;
use crate::utils::logging::*;
use crate::utils::{AppResult, HandlerError};
use crate::AppState;

/// Parâmetros do callback OAuth2
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    /// Authorization code retornado pelo Linear
    code: Option<String>,
    /// Erro retornado pelo Linear (se houver)
    error: Option<String>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/linear", post(start_oauth))
        .route("/auth/linear/callback", get(oauth_callback))
        .route("/auth/linear/api-key", post(authenticate_api_key))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Corpo JSON inválido vira um saco de argumentos vazio: a validação
/// reporta todos os campos obrigatórios como ausentes
fn json_args(endpoint: &str, body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(args)) => args,
        Err(rejection) => {
            log_warning(&format!(
                "⚠️  {} - corpo ignorado: {}",
                endpoint,
                rejection.body_text()
            ));
            Value::Null
        }
    }
}

/// Completa clientId/clientSecret/redirectUri ausentes com os valores configurados
fn with_oauth_defaults(args: Value, linear: &LinearSettings) -> Value {
    let mut bag = match args {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for (field, configured) in linear.oauth_defaults() {
        let present = bag
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.trim().is_empty());
        if present {
            continue;
        }
        if let Some(value) = configured {
            bag.insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    Value::Object(bag)
}

async fn run_tool(
    state: &AppState,
    endpoint: &str,
    tool: &str,
    args: &Value,
) -> AppResult<Json<ToolResponse>> {
    let start_time = Instant::now();

    let result = state.tools.dispatch(tool, args).await;

    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    };
    log_request_processed(endpoint, status, start_time.elapsed().as_millis() as u64);

    Ok(Json(result?))
}

/// POST /auth/linear
///
/// Campos omitidos no corpo caem para `LINEAR_CLIENT_ID`,
/// `LINEAR_CLIENT_SECRET` e `LINEAR_REDIRECT_URI`.
async fn start_oauth(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ToolResponse>> {
    log_request_received("/auth/linear", "POST");
    let args = with_oauth_defaults(json_args("/auth/linear", body), &state.settings.linear);
    run_tool(&state, "/auth/linear", AuthTool::Auth.name(), &args).await
}

/// GET /auth/linear/callback?code=XXX
///
/// Um `error` enviado pelo Linear é devolvido sem delegar ao autenticador.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Json<ToolResponse>> {
    log_request_received("/auth/linear/callback", "GET");

    if let Some(error) = params.error {
        log_error(&format!("❌ [OAuth2] Erro na autorização: {}", error));
        return Err(HandlerError::Delegation {
            operation: "handle authentication callback",
            message: format!("authorization denied: {}", error),
        }
        .into());
    }

    let args = match params.code {
        Some(code) => json!({ "code": code }),
        None => json!({}),
    };
    run_tool(&state, "/auth/linear/callback", AuthTool::AuthCallback.name(), &args).await
}

/// POST /auth/linear/api-key
async fn authenticate_api_key(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ToolResponse>> {
    log_request_received("/auth/linear/api-key", "POST");
    let args = json_args("/auth/linear/api-key", body);
    run_tool(&state, "/auth/linear/api-key", AuthTool::AuthApiKey.name(), &args).await
}

/// GET /tools
async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolDefinition>> {
    log_request_received("/tools", "GET");
    Json(state.tools.tool_definitions())
}

/// POST /tools/:name
async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ToolResponse>> {
    let endpoint = format!("/tools/{}", name);
    log_request_received(&endpoint, "POST");
    let args = json_args(&endpoint, body);
    run_tool(&state, &endpoint, &name, &args).await
}
