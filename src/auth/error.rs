use thiserror::Error;

/// Erros do objeto de autenticação Linear
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Autenticação OAuth não inicializada")]
    NotInitialized,

    #[error("Erro de rede: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Troca de token falhou [{status}]: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Erro de parsing: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Erro de parsing de URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl AuthError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Falha causada pela entrada do chamador (config inválida ou fluxo fora
    /// de ordem), não pelo Linear
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::UrlParse(_) | Self::NotInitialized)
    }
}

/// Tipo de resultado padrão para operações de autenticação
pub type AuthResult<T> = Result<T, AuthError>;
