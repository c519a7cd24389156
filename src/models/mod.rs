use serde::{Deserialize, Serialize};

/// Login credentials posted as JSON to `/login`.
#[derive(Serialize, Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Binary part sent under the `image` form field.
#[derive(Clone, Debug)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for `POST /projects`. Every text field becomes its own form part.
#[derive(Clone, Debug)]
pub struct ProjectSubmission {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
    pub live_link: String,
    pub image: ImageAttachment,
}

impl ProjectSubmission {
    /// Text fields in the order they are appended to the form, keyed by wire name.
    pub fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("technologies", self.technologies.as_str()),
            ("link", self.link.as_str()),
            ("liveLink", self.live_link.as_str()),
        ]
    }
}

/// Project record as returned by the server.
///
/// Only the fields the smoke test inspects are typed; everything else the server
/// echoes back is kept in `extra` so it can be printed. `liveLink` stays a raw JSON
/// value so a non-string echo still reaches the assertion instead of failing decode.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Project {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "liveLink", default, skip_serializing_if = "Option::is_none")]
    pub live_link: Option<serde_json::Value>,
    #[serde(rename = "fileUrl", default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Project {
    /// `liveLink` as text: strings as-is, any other JSON value in its JSON form.
    pub fn live_link_text(&self) -> Option<String> {
        match self.live_link.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// Error payload used by every failing endpoint: {"error": "..."}
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Result of comparing the echoed `liveLink` against the submitted one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveLinkCheck {
    Match,
    Mismatch {
        expected: String,
        actual: Option<String>,
    },
}

impl LiveLinkCheck {
    pub fn passed(&self) -> bool {
        matches!(self, LiveLinkCheck::Match)
    }
}

/// Whether the created project shows up in `GET /projects`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingCheck {
    Skipped,
    Found,
    Missing { listed: usize },
    Failed(String),
}
