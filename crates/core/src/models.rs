use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the extractor understands.
///
/// Any declared MIME type outside this set is the unsupported branch and never
/// reaches extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FileType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    Docx,
}

impl FileType {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type.trim() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PDF" => Ok(Self::Pdf),
            "DOCX" => Ok(Self::Docx),
            other => Err(other.to_string()),
        }
    }
}

/// One file handed to the pipeline together with the MIME type it was declared as.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads `path` from disk. Without an explicit `mime_type` the type is
    /// guessed from the file extension.
    pub fn from_path(path: &Path, mime_type: Option<&str>) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| IngestError::MissingFileName(path.display().to_string()))?;

        let mime_type = match mime_type {
            Some(declared) => declared.to_string(),
            None => mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        let bytes = fs::read(path)?;
        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }
}

/// A row of the `texts` table with its embedding decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    pub file_name: String,
    pub file_type: FileType,
    pub content: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnsupportedFileType,
    EmptyExtraction,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Self::UnsupportedFileType => {
                "Unsupported file type. Please upload a PDF or DOCX file."
            }
            Self::EmptyExtraction => "Unable to process the file. No text was extracted.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Stored(StoredRecord),
    Rejected {
        file_name: String,
        reason: Rejection,
    },
}
