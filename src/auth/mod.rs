//! # Linear Authentication Module
//!
//! Objeto de autenticação consumido pelos handlers de ferramentas.
//!
//! ## Estrutura:
//! - `config.rs`: Variantes de configuração (OAuth / PAT) e endpoints
//! - `authenticator.rs`: Contrato `Authenticator` e `Credential`
//! - `linear.rs`: Implementação concreta (troca de code por token)
//! - `error.rs`: Erros de autenticação

pub mod authenticator;
pub mod config;
pub mod error;
pub mod linear;

pub use authenticator::{Authenticator, Credential};
pub use config::{AuthConfig, LinearEndpoints, OAuthCredentials};
pub use error::{AuthError, AuthResult};
pub use linear::{LinearAuth, OAuthToken};
