//! `/projects` endpoints and the checks run on their responses.

use log::{debug, info};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{read_json, ApiClient};
use crate::error::{Stage, StageError};
use crate::models::{ListingCheck, LiveLinkCheck, Project, ProjectSubmission};

/// Builds the multipart body: one text part per field plus the `image` file part.
pub fn build_form(submission: &ProjectSubmission) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for (name, value) in submission.text_fields() {
        form = form.text(name, value.to_string());
    }
    let image = Part::bytes(submission.image.bytes.clone())
        .file_name(submission.image.file_name.clone())
        .mime_str(&submission.image.content_type)?;
    Ok(form.part("image", image))
}

impl ApiClient {
    /// Creates a project with `Authorization: Bearer <token>` and a multipart body.
    pub async fn create_project(&self, token: &str, submission: &ProjectSubmission) -> Result<Project, StageError> {
        let form = build_form(submission).map_err(|e| StageError::transport(Stage::CreateProject, e))?;
        let url = self.url("projects");
        debug!(
            "POST {} (multipart, image={} {} bytes)",
            url,
            submission.image.file_name,
            submission.image.bytes.len()
        );
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| StageError::transport(Stage::CreateProject, e))?;
        let project: Project = read_json(Stage::CreateProject, resp).await?;
        info!("Created project {}", project.id.as_deref().unwrap_or("<no id>"));
        Ok(project)
    }

    /// `GET /projects`. The server returns every project, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, StageError> {
        let url = self.url("projects");
        debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| StageError::transport(Stage::ListProjects, e))?;
        read_json(Stage::ListProjects, resp).await
    }
}

/// Exact string comparison of the echoed `liveLink`. Absent, null or non-string
/// values never match.
pub fn assert_live_link_persisted(project: &Project, expected: &str) -> LiveLinkCheck {
    match project.live_link.as_ref() {
        Some(Value::String(actual)) if actual == expected => LiveLinkCheck::Match,
        _ => LiveLinkCheck::Mismatch {
            expected: expected.to_string(),
            actual: project.live_link_text(),
        },
    }
}

/// Looks for `created` in a listing, by `_id` when it has one, else by title and liveLink.
pub fn listing_contains(listing: &[Project], created: &Project) -> ListingCheck {
    let found = match created.id.as_deref() {
        Some(id) => listing.iter().any(|p| p.id.as_deref() == Some(id)),
        None => listing
            .iter()
            .any(|p| p.title == created.title && p.live_link == created.live_link),
    };
    if found {
        ListingCheck::Found
    } else {
        ListingCheck::Missing { listed: listing.len() }
    }
}
