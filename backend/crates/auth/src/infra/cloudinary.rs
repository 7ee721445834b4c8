//! Cloudinary media store
//!
//! Signed server-side upload: `POST {base}/v1_1/{cloud}/auto/upload` with the
//! file as multipart and a SHA-1 signature over the sorted upload parameters.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::media::{MediaError, MediaFile, MediaStore, UploadedMedia};

const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Target folder, if any
    pub folder: Option<String>,
    pub base_url: String,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("folder", &self.folder)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Cloudinary-backed [`MediaStore`]
#[derive(Debug, Clone)]
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia, MediaError> {
        if file.is_empty() {
            return Err(MediaError::EmptyFile);
        }

        let timestamp = Utc::now().timestamp().to_string();

        let mut params: Vec<(&str, &str)> = vec![("timestamp", timestamp.as_str())];
        if let Some(folder) = self.config.folder.as_deref() {
            params.push(("folder", folder));
        }
        let signature = sign_params(&params, &self.config.api_secret);

        let size = file.len();
        let mut part = Part::bytes(file.bytes).file_name(file.file_name.clone());
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaError::InvalidResponse(format!("bad content type: {e}")))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.clone())
            .text("signature", signature);
        if let Some(folder) = self.config.folder.clone() {
            form = form.text("folder", folder);
        }

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = serde_json::from_slice(&body)
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            file_name = %file.file_name,
            size,
            public_id = ?uploaded.public_id,
            "Uploaded media"
        );

        Ok(UploadedMedia {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

/// `sha1("k1=v1&k2=v2" + secret)` with keys in ascending order
fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    platform::crypto::sha1_hex(format!("{to_sign}{api_secret}").as_bytes())
}
