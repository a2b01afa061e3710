use crate::embeddings::Embedder;
use crate::traits::RecordStore;
use crate::{FileType, Rejection, Result, StoredRecord, UploadOutcome, UploadedFile};
use tracing::{info, warn};

/// Runs uploads through dispatch, extraction, embedding and storage.
///
/// The embedder and the store are built once by the caller and handed in here;
/// nothing in the pipeline reaches for process-wide state.
pub struct Ingestor<E, S>
where
    E: Embedder,
    S: RecordStore,
{
    embedder: E,
    store: S,
}

impl<E, S> Ingestor<E, S>
where
    E: Embedder,
    S: RecordStore,
{
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }

    /// Handles one upload. Unsupported types and empty extractions come back as
    /// [`UploadOutcome::Rejected`] without touching the store; extraction and
    /// storage faults are returned as errors.
    pub fn upload(&self, file: &UploadedFile) -> Result<UploadOutcome> {
        info!(
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            bytes = file.bytes.len(),
            checksum = %file.checksum(),
            "upload received"
        );

        let Some(file_type) = FileType::from_mime(&file.mime_type) else {
            warn!(file_name = %file.file_name, mime_type = %file.mime_type, "unsupported file type");
            return Ok(rejected(file, Rejection::UnsupportedFileType));
        };

        let content = file_type.extract(&file.bytes)?;
        if content.is_empty() {
            warn!(file_name = %file.file_name, "no text extracted");
            return Ok(rejected(file, Rejection::EmptyExtraction));
        }

        let embedding = self.embedder.embed(&content)?;
        info!(
            file_name = %file.file_name,
            file_type = %file_type,
            chars = content.chars().count(),
            dimensions = embedding.len(),
            "text extracted and embedded"
        );

        let record = StoredRecord {
            file_name: file.file_name.clone(),
            file_type,
            content,
            embedding,
        };
        self.store.upsert(&record)?;

        Ok(UploadOutcome::Stored(record))
    }

    pub fn records(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.store.scan_all()?)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn rejected(file: &UploadedFile, reason: Rejection) -> UploadOutcome {
    UploadOutcome::Rejected {
        file_name: file.file_name.clone(),
        reason,
    }
}
