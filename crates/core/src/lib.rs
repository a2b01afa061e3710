pub mod codec;
pub mod docx;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod listing;
pub mod models;
pub mod orchestrator;
pub mod stores;
pub mod traits;

#[cfg(test)]
mod fixtures;

pub use codec::{decode_embedding, encode_embedding};
pub use embeddings::{Embedder, SentenceEmbedder, SentenceModel};
pub use error::{IngestError, Result, StoreError};
pub use extractor::{extract_docx, extract_pdf, DocxExtractor, LopdfExtractor, TextExtractor};
pub use ingest::{collect_uploads, discover_documents};
pub use listing::{render_listing, render_listing_json, render_outcome};
pub use models::{FileType, Rejection, StoredRecord, UploadOutcome, UploadedFile};
pub use orchestrator::Ingestor;
pub use stores::{ResetPolicy, SqliteRecordStore};
pub use traits::RecordStore;
