use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single value submitted with the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FilePart),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Ordered field set of a form, mirroring what the page would serialize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, FieldValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, FieldValue::Text(value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.set(name, FieldValue::File(part));
        self
    }

    /// Replaces an existing field in place or appends a new one.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Event delivered to the controller when the page's upload form is submitted.
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    pub form: FormData,
}

/// JSON body returned by the upload endpoint. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl ServerReply {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BannerKind {
    Success,
    Error,
}

pub type BannerId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub message: String,
}

/// How a single submission ended, as observed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Uploaded { message: String },
    Rejected { status: u16, error: String },
    NetworkFailure { reason: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Uploaded { .. })
    }
}

/// Texts and timings the controller and notifier work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub idle_label: String,
    pub busy_label: String,
    pub upload_failed: String,
    pub network_error: String,
    pub upload_succeeded: String,
    pub banner_ttl: Duration,
    pub reload_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            idle_label: "Upload CV".to_string(),
            busy_label: "Uploading...".to_string(),
            upload_failed: "Upload failed".to_string(),
            network_error: "Network error. Please try again.".to_string(),
            upload_succeeded: "CV uploaded successfully".to_string(),
            banner_ttl: Duration::from_millis(5000),
            reload_delay: Duration::from_millis(2000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_set_replaces_in_place() {
        let mut form = FormData::new()
            .text("job_position", "General")
            .text("note", "hi");
        form.set("job_position", FieldValue::Text("Cloud Engineer".into()));

        let names: Vec<&str> = form.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["job_position", "note"]);
        assert_eq!(
            form.get("job_position"),
            Some(&FieldValue::Text("Cloud Engineer".into()))
        );
    }

    #[test]
    fn reply_body_tolerates_missing_fields() {
        let body: ReplyBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body, ReplyBody::default());

        let body: ReplyBody =
            serde_json::from_str(r#"{"success": true, "message": "Saved"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn only_2xx_counts_as_ok() {
        let reply = |status| ServerReply {
            status,
            body: ReplyBody::default(),
        };
        assert!(reply(200).is_ok());
        assert!(reply(201).is_ok());
        assert!(!reply(302).is_ok());
        assert!(!reply(400).is_ok());
        assert!(!reply(500).is_ok());
    }
}
