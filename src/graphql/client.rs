//! Handle do cliente GraphQL do Linear
//!
//! Construído depois de uma autenticação bem-sucedida. Carrega endpoint e
//! cabeçalho de autorização; o transporte das queries fica fora deste crate.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

use crate::auth::{AuthError, AuthResult, Credential};

pub struct LinearGraphQLClient {
    endpoint: Url,
    credential: Credential,
    http_client: Client,
}

impl LinearGraphQLClient {
    pub fn new(endpoint: &str, credential: Credential, timeout: Duration) -> AuthResult<Self> {
        if credential.secret().trim().is_empty() {
            return Err(AuthError::config_error("token de acesso vazio"));
        }

        let endpoint = Url::parse(endpoint)?;
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            credential,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// API keys vão crus no header; tokens OAuth levam o prefixo Bearer
    pub fn authorization_header(&self) -> String {
        match &self.credential {
            Credential::ApiKey(key) => key.clone(),
            Credential::OAuthToken(token) => format!("Bearer {}", token),
        }
    }

    pub fn is_oauth(&self) -> bool {
        matches!(self.credential, Credential::OAuthToken(_))
    }

    /// POST pré-configurado para o endpoint GraphQL
    pub fn request(&self) -> RequestBuilder {
        self.http_client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.authorization_header())
            .header(CONTENT_TYPE, "application/json")
    }
}

impl std::fmt::Debug for LinearGraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearGraphQLClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("credential", &self.credential)
            .finish()
    }
}
