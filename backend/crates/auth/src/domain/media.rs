//! Media Store
//!
//! Interface to the external service that hosts avatar and cover images.

use std::fmt;
use thiserror::Error;

/// A fully buffered upload
#[derive(Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Public (HTTPS) URL stored on the user record
    pub url: String,
    /// Provider-side identifier, if the provider has one
    pub public_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Media service rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Media service request failed: {0}")]
    Transport(String),

    #[error("Unexpected media service response: {0}")]
    InvalidResponse(String),
}

#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Upload a file and return where it can be fetched from
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia, MediaError>;
}
