use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;
use thiserror::Error;

use crate::models::ToolResponse;

/// Erros de uma operação de handler (validação ou delegação)
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Parâmetros obrigatórios ausentes; nada foi delegado
    #[error("Missing required parameters: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// Falha do objeto de autenticação (ou do cliente GraphQL) reempacotada
    #[error("Failed to {operation}: {message}")]
    Delegation {
        operation: &'static str,
        message: String,
    },

    /// Colaborador recusou a entrada do chamador (ex.: redirectUri inválida)
    #[error("Failed to {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl HandlerError {
    pub fn delegation(operation: &'static str, err: impl fmt::Display) -> Self {
        Self::Delegation {
            operation,
            message: err.to_string(),
        }
    }

    pub fn rejected(operation: &'static str, err: impl fmt::Display) -> Self {
        Self::Rejected {
            operation,
            message: err.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Campos ausentes, vazio para erros que não são de validação
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::Validation { missing } => missing,
            _ => &[],
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnknownTool(_) => StatusCode::NOT_FOUND,
            Self::Delegation { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Envelope de erro entregue ao chamador
    pub fn to_response(&self) -> ToolResponse {
        ToolResponse::error(self.to_string())
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Debug)]
pub enum AppError {
    Handler(HandlerError),
    ConfigError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Handler(err) => write!(f, "{}", err),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<HandlerError> for AppError {
    fn from(err: HandlerError) -> Self {
        AppError::Handler(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Handler(err) => {
                (err.status_code(), axum::Json(err.to_response())).into_response()
            }
            AppError::ConfigError(msg) | AppError::InternalError(msg) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = json!({
                    "error": msg,
                    "status": status.as_u16()
                });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_all_missing_fields() {
        let err = HandlerError::Validation {
            missing: vec!["clientSecret", "redirectUri"],
        };
        assert_eq!(
            err.to_string(),
            "Missing required parameters: clientSecret, redirectUri"
        );
        assert!(err.is_validation());
        assert_eq!(err.missing_fields(), &["clientSecret", "redirectUri"]);
    }

    #[test]
    fn test_delegation_message_names_operation() {
        let err = HandlerError::delegation("handle authentication callback", "invalid code");
        assert_eq!(
            err.to_string(),
            "Failed to handle authentication callback: invalid code"
        );
        assert!(!err.is_validation());
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HandlerError::Validation { missing: vec!["code"] }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HandlerError::UnknownTool("nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HandlerError::delegation("x", "y").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            HandlerError::rejected("x", "y").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_rejected_reads_like_delegation() {
        let err = HandlerError::rejected("initialize authentication", "bad redirect");
        assert_eq!(
            err.to_string(),
            "Failed to initialize authentication: bad redirect"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_response_is_flagged() {
        let response = HandlerError::UnknownTool("linear_foo".into()).to_response();
        assert!(response.is_error);
        assert_eq!(response.text(), Some("Unknown tool: linear_foo"));
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::ConfigError("PORT inválida".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT inválida");

        let err: AppError = HandlerError::UnknownTool("x".into()).into();
        assert_eq!(err.to_string(), "Unknown tool: x");
    }
}
