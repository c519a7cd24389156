//! HTTP side of the smoke test.
//!
//! [`ApiClient`] wraps one `reqwest::Client` bound to the API root. The endpoint calls
//! live in the submodules; [`run_upload_smoke_test`] strings them together in order:
//! login, create, assert, and optionally the listing check.

pub mod auth;
pub mod projects;

use std::time::Duration;

use colored::Colorize;
use log::{debug, info};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Stage, StageError};
use crate::models::{Credentials, ListingCheck, LiveLinkCheck, Project, ProjectSubmission};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Reads the whole body of a 2xx response; any other status becomes a `StageError`.
async fn read_success_body(stage: Stage, resp: reqwest::Response) -> Result<(StatusCode, String), StageError> {
    let status = resp.status();
    debug!("{} -> HTTP {}", stage, status);
    let body = resp.text().await.map_err(|e| StageError::transport(stage, e))?;
    if !status.is_success() {
        return Err(StageError::http(stage, status, body));
    }
    Ok((status, body))
}

fn decode_json<T: DeserializeOwned>(stage: Stage, status: StatusCode, body: &str) -> Result<T, StageError> {
    serde_json::from_str(body)
        .map_err(|e| StageError::payload(stage, status, format!("malformed JSON response: {}", e), body.to_string()))
}

async fn read_json<T: DeserializeOwned>(stage: Stage, resp: reqwest::Response) -> Result<T, StageError> {
    let (status, body) = read_success_body(stage, resp).await?;
    decode_json(stage, status, &body)
}

/// Terminal state of one run.
#[derive(Debug)]
pub enum SmokeOutcome {
    LoginFailed(StageError),
    CreateFailed(StageError),
    Completed(CompletedRun),
}

#[derive(Debug)]
pub struct CompletedRun {
    pub project: Project,
    pub live_link: LiveLinkCheck,
    pub listing: ListingCheck,
}

impl SmokeOutcome {
    pub fn stage_reached(&self) -> &'static str {
        match self {
            SmokeOutcome::LoginFailed(_) => "login",
            SmokeOutcome::CreateFailed(_) => "create project",
            SmokeOutcome::Completed(_) => "assert liveLink",
        }
    }

    /// Prints the closing summary block.
    pub fn print_summary(&self) {
        println!("{}", "---- upload smoke test summary ----".bold());
        println!("Stage reached: {}", self.stage_reached());
        match self {
            SmokeOutcome::LoginFailed(e) | SmokeOutcome::CreateFailed(e) => {
                println!("Result: {}", format!("ABORTED ({})", e).red());
            }
            SmokeOutcome::Completed(run) => {
                println!("Project id: {}", run.project.id.as_deref().unwrap_or("<none>"));
                println!("File URL: {}", run.project.file_url.as_deref().unwrap_or("<none>"));
                match &run.listing {
                    ListingCheck::Skipped => {}
                    ListingCheck::Found => println!("Listing: {}", "present".green()),
                    ListingCheck::Missing { listed } => {
                        println!("Listing: {}", format!("missing among {} projects", listed).yellow())
                    }
                    ListingCheck::Failed(why) => println!("Listing: {}", format!("check failed: {}", why).yellow()),
                }
                if run.live_link.passed() {
                    println!("Result: {}", "PASS".green());
                } else {
                    println!("Result: {}", "FAIL (liveLink mismatch)".red());
                }
            }
        }
    }
}

/// Login -> create -> assert. A failed login never reaches the create call, and a
/// failed create never reaches the assertion. Nothing is retried.
pub async fn run_upload_smoke_test(
    client: &ApiClient,
    credentials: &Credentials,
    submission: &ProjectSubmission,
    verify_listing: bool,
) -> SmokeOutcome {
    info!("Running upload smoke test against {}", client.base_url());

    // 1. Login
    let token = match client.login(credentials).await {
        Ok(token) => {
            println!("{}", "Login successful, token received.".green());
            token
        }
        Err(e) => {
            println!("{} {}", "Login failed:".red(), e.report_text());
            return SmokeOutcome::LoginFailed(e);
        }
    };

    // 2. Create the project with a multipart body
    let project = match client.create_project(&token, submission).await {
        Ok(project) => {
            let shown = serde_json::to_string(&project).unwrap_or_else(|_| format!("{:?}", project));
            println!("Project created: {}", shown);
            project
        }
        Err(e) => {
            println!("{} {}", "Create project failed:".red(), e.report_text());
            return SmokeOutcome::CreateFailed(e);
        }
    };

    // 3. Assert liveLink round-tripped
    let live_link = projects::assert_live_link_persisted(&project, &submission.live_link);
    match &live_link {
        LiveLinkCheck::Match => println!("{}", "SUCCESS: liveLink matches.".green()),
        LiveLinkCheck::Mismatch { expected, actual } => println!(
            "{} Expected: {} Got: {}",
            "FAILURE: liveLink mismatch.".red(),
            expected,
            actual.as_deref().unwrap_or("<missing>")
        ),
    }

    // 4. Optional listing check
    let listing = if verify_listing {
        match client.list_projects().await {
            Ok(all) => projects::listing_contains(&all, &project),
            Err(e) => {
                println!("{} {}", "Note: listing check failed:".yellow(), e);
                ListingCheck::Failed(e.to_string())
            }
        }
    } else {
        ListingCheck::Skipped
    };

    SmokeOutcome::Completed(CompletedRun { project, live_link, listing })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let c = ApiClient::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(c.base_url(), "http://localhost:5000/api");
        assert_eq!(c.url("/login"), "http://localhost:5000/api/login");
        assert_eq!(c.url("projects"), "http://localhost:5000/api/projects");
    }
}
