//! Main Application: ferramentas de autenticação Linear sobre HTTP
//!
//! - `POST /auth/linear` inicia OAuth2 e devolve a URL de autorização
//! - `GET /auth/linear/callback` troca o code pelo access token
//! - `POST /auth/linear/api-key` registra uma API key
//!
//! O cliente GraphQL é criado pelo roteador de ferramentas após cada
//! autenticação bem-sucedida.
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use linear_auth_middleware::auth::{LinearAuth, LinearEndpoints};
use linear_auth_middleware::config::Settings;
use linear_auth_middleware::handlers::{build_router, AuthTool, AuthToolRouter};
use linear_auth_middleware::utils::logging::*;
use linear_auth_middleware::utils::AppError;
use linear_auth_middleware::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar .env se existir
    if dotenvy::dotenv().is_err() {
        // Em produção usamos variáveis de ambiente do sistema
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Inicializar tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().map_err(AppError::from)?;
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
    log_config_loaded(&run_mode);

    let endpoints = LinearEndpoints::from(&settings.linear);
    let auth = LinearAuth::new(endpoints, settings.linear.request_timeout())
        .map_err(|e| AppError::InternalError(format!("Falha ao criar cliente HTTP: {}", e)))?;

    let tools = Arc::new(AuthToolRouter::new(
        Arc::new(auth),
        settings.linear.graphql_url.clone(),
        settings.linear.request_timeout(),
    ));

    // API key pré-configurada: autentica já no startup
    if let Some(api_key) = settings.linear.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        match tools
            .dispatch(AuthTool::AuthApiKey.name(), &json!({ "apiKey": api_key }))
            .await
        {
            Ok(_) => log_info("✅ LINEAR_API_KEY autenticada no startup"),
            Err(e) => log_warning(&format!("⚠️  LINEAR_API_KEY não pôde ser usada: {}", e)),
        }
    } else {
        log_info("ℹ️  Nenhuma API key configurada - aguardando /auth/linear ou /auth/linear/api-key");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    log_server_startup(settings.server.port);

    let state = Arc::new(AppState { settings, tools });
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::InternalError(format!("Falha ao abrir {}: {}", addr, e)))?;
    log_server_ready(&addr);

    axum::serve(listener, app).await?;

    Ok(())
}
