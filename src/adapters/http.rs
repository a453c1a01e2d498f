use crate::config::toml_config::ServerConfig;
use crate::core::{Result, ServerReply, Uploader};
use crate::domain::model::{FieldValue, FilePart, FormData, HealthStatus, ReplyBody};
use crate::utils::error::UploaderError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;

/// Posts upload forms to the screening service as `multipart/form-data`.
///
/// No timeout and no retry: one request per submission.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: Client,
    upload_url: String,
    health_url: String,
}

fn join_url(base_url: &str, route: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), route)
}

/// Content type for a CV file, by extension.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

fn file_part(file: &FilePart) -> Result<Part> {
    let content_type = file
        .content_type
        .as_deref()
        .unwrap_or_else(|| guess_content_type(&file.file_name));

    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(content_type)?;
    Ok(part)
}

fn multipart_form(form: &FormData) -> Result<Form> {
    let mut multipart = Form::new();
    for (name, value) in form.fields() {
        multipart = match value {
            FieldValue::Text(text) => multipart.text(name.to_string(), text.clone()),
            FieldValue::File(file) => multipart.part(name.to_string(), file_part(file)?),
        };
    }
    Ok(multipart)
}

impl HttpUploader {
    pub fn new(base_url: &str, upload_path: &str, health_path: &str) -> Self {
        Self {
            client: Client::new(),
            upload_url: join_url(base_url, upload_path),
            health_url: join_url(base_url, health_path),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(&config.base_url, &config.upload_path, &config.health_path)
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        tracing::debug!("Checking service health at: {}", self.health_url);
        let response = self.client.get(&self.health_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploaderError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn submit(&self, form: &FormData) -> Result<ServerReply> {
        let multipart = multipart_form(form)?;

        tracing::debug!("Posting upload form to: {}", self.upload_url);
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(multipart)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("Upload response status: {}", status);

        // Error statuses carry a JSON body too; a body that is not JSON fails
        // the whole exchange.
        let body: ReplyBody = response.json().await?;
        Ok(ServerReply { status, body })
    }
}
