//! Failure type for the smoke-test flow.
//!
//! Every failing step is reported as a [`StageError`]: which stage broke, the HTTP
//! status if one came back, a short cause and the raw response body when one was
//! received.

use std::fmt;

use reqwest::StatusCode;

use crate::models::ApiErrorBody;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Login,
    CreateProject,
    ListProjects,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Login => "login",
            Stage::CreateProject => "create project",
            Stage::ListProjects => "list projects",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone)]
#[error("{stage} failed: {detail}")]
pub struct StageError {
    pub stage: Stage,
    pub status: Option<StatusCode>,
    pub detail: String,
    pub body: Option<String>,
}

impl StageError {
    /// Request never produced a response (connect error, timeout, ...).
    pub fn transport(stage: Stage, err: reqwest::Error) -> Self {
        let detail = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("could not connect: {}", err)
        } else {
            err.to_string()
        };
        Self { stage, status: None, detail, body: None }
    }

    /// Server answered with a non-2xx status.
    pub fn http(stage: Stage, status: StatusCode, body: String) -> Self {
        let detail = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => format!("HTTP {}: {}", status, parsed.error),
            Err(_) => format!("HTTP {}", status),
        };
        let body = if body.is_empty() { None } else { Some(body) };
        Self { stage, status: Some(status), detail, body }
    }

    /// 2xx response whose body could not be used.
    pub fn payload(stage: Stage, status: StatusCode, detail: impl Into<String>, body: String) -> Self {
        let body = if body.is_empty() { None } else { Some(body) };
        Self { stage, status: Some(status), detail: detail.into(), body }
    }

    /// What to show the operator: the raw body when the server sent one, else the cause.
    pub fn report_text(&self) -> &str {
        self.body.as_deref().unwrap_or(&self.detail)
    }
}
