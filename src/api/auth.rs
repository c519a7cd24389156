//! `POST /login`: exchange credentials for a bearer token.

use log::{debug, info};

use super::{decode_json, read_success_body, ApiClient};
use crate::error::{Stage, StageError};
use crate::models::{Credentials, LoginResponse};

impl ApiClient {
    /// Posts `{username, password}` as JSON and returns the `token` from the response.
    ///
    /// Non-2xx, transport errors, unparsable JSON and a missing or empty token are all
    /// reported as a `Stage::Login` error.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, StageError> {
        let url = self.url("login");
        debug!("POST {} as {}", url, credentials.username);
        let resp = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| StageError::transport(Stage::Login, e))?;
        let (status, body) = read_success_body(Stage::Login, resp).await?;
        let parsed: LoginResponse = decode_json(Stage::Login, status, &body)?;

        match parsed.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                info!("Logged in as {}", parsed.username.as_deref().unwrap_or(&credentials.username));
                Ok(token)
            }
            None => Err(StageError::payload(Stage::Login, status, "response contained no token", body)),
        }
    }
}
