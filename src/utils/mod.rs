//! Utilities: run configuration, built-in fixtures and image loading.
//!
//! Everything is read from environment variables once at start-up. With nothing set
//! the run targets the local dev server with the seeded demo account:
//! - SMOKE_BASE_URL (default http://localhost:5000/api)
//! - SMOKE_USERNAME / SMOKE_PASSWORD (default demo / demo@1234)
//! - SMOKE_TIMEOUT_SECS (default 30)
//! - SMOKE_SCENARIO: "python" (default) or "node"
//! - SMOKE_IMAGE_PATH: upload this file instead of the fixture bytes
//! - SMOKE_VERIFY_LISTING: "1", "true" or "yes" to also check GET /projects

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context};

use crate::models::{Credentials, ImageAttachment, ProjectSubmission};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_USERNAME: &str = "demo";
pub const DEFAULT_PASSWORD: &str = "demo@1234";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Named fixture sets carried over from the two hand-run upload scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    Python,
    Node,
}

impl Scenario {
    pub fn parse(name: &str) -> anyhow::Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "python" => Ok(Scenario::Python),
            "node" => Ok(Scenario::Node),
            other => Err(anyhow!("unknown scenario '{}' (expected 'python' or 'node')", other)),
        }
    }

    pub fn submission(self) -> ProjectSubmission {
        match self {
            Scenario::Python => ProjectSubmission {
                title: "Python Test Project".to_string(),
                description: "Testing liveLink persistence".to_string(),
                technologies: "Python, Requests".to_string(),
                link: "http://github.com/python/test".to_string(),
                live_link: "http://example.com/live-demo".to_string(),
                image: ImageAttachment {
                    file_name: "test.txt".to_string(),
                    content_type: "text/plain".to_string(),
                    bytes: b"dummy content".to_vec(),
                },
            },
            Scenario::Node => ProjectSubmission {
                title: "Node Test Project".to_string(),
                description: "Testing liveLink with node script".to_string(),
                technologies: "Node, Axios".to_string(),
                link: "http://github.com/node/test".to_string(),
                live_link: "http://node-test.com/live".to_string(),
                image: ImageAttachment {
                    file_name: "test.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: b"dummy image".to_vec(),
                },
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct SmokeConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
    pub scenario: Scenario,
    pub image_path: Option<String>,
    pub verify_listing: bool,
}

impl SmokeConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SMOKE_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow!("SMOKE_BASE_URL must start with http:// or https://, got '{}'", base_url));
        }

        let credentials = Credentials {
            username: lookup("SMOKE_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: lookup("SMOKE_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        };

        let timeout_secs: u64 = lookup("SMOKE_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let scenario = match lookup("SMOKE_SCENARIO") {
            Some(name) => Scenario::parse(&name)?,
            None => Scenario::Python,
        };

        let image_path = lookup("SMOKE_IMAGE_PATH").filter(|s| !s.trim().is_empty());
        let verify_listing = lookup("SMOKE_VERIFY_LISTING")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            base_url,
            credentials,
            timeout: Duration::from_secs(timeout_secs),
            scenario,
            image_path,
            verify_listing,
        })
    }

    /// The submission for this run: the scenario fixture, with the image swapped
    /// for the file at `image_path` when one is configured.
    pub fn submission(&self) -> anyhow::Result<ProjectSubmission> {
        let mut submission = self.scenario.submission();
        if let Some(path) = &self.image_path {
            submission.image = load_image(Path::new(path))?;
        }
        Ok(submission)
    }
}

/// Reads a file from disk into an `image` part.
pub fn load_image(path: &Path) -> anyhow::Result<ImageAttachment> {
    let bytes = fs::read(path).with_context(|| format!("failed to read image file {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("image path {} has no file name", path.display()))?;
    Ok(ImageAttachment {
        content_type: content_type_for(path).to_string(),
        file_name,
        bytes,
    })
}

/// Maps a file extension to the MIME type sent on the `image` part.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
