//! Comportamento comum dos handlers de ferramentas: resposta de sucesso e
//! reempacotamento de falhas da delegação

use std::fmt::Display;

use crate::auth::AuthError;
use crate::models::ToolResponse;
use crate::utils::logging::*;
use crate::utils::HandlerError;

pub fn create_response(message: impl Into<String>) -> ToolResponse {
    ToolResponse::success(message)
}

/// Reempacota a falha de um colaborador com a descrição da operação tentada
pub fn handle_error(operation: &'static str, err: impl Display) -> HandlerError {
    log_error(&format!("❌ Failed to {}: {}", operation, err));
    HandlerError::delegation(operation, err)
}

/// Como [`handle_error`], mas separa entrada recusada de falha do Linear
pub fn handle_auth_error(operation: &'static str, err: AuthError) -> HandlerError {
    if err.is_caller_error() {
        log_warning(&format!("⚠️  Failed to {}: {}", operation, err));
        return HandlerError::rejected(operation, err);
    }
    handle_error(operation, err)
}

/// Registra a falha de validação e a devolve inalterada
pub fn log_validation(operation: &'static str, err: HandlerError) -> HandlerError {
    log_validation_error(operation, err.missing_fields());
    err
}
