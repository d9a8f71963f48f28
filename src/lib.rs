// Biblioteca do middleware de autenticação Linear
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod config;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub tools: Arc<handlers::AuthToolRouter>,
}
