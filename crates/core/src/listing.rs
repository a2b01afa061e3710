use crate::{StoredRecord, UploadOutcome};
use std::io::{self, Write};

pub const PREVIEW_CHARS: usize = 100;
pub const VECTOR_PREVIEW_LEN: usize = 5;

pub fn content_preview(content: &str) -> &str {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

pub fn render_outcome<W: Write>(out: &mut W, outcome: &UploadOutcome) -> io::Result<()> {
    match outcome {
        UploadOutcome::Stored(record) => {
            writeln!(out, "Successfully stored {} in the database.", record.file_name)?;
            writeln!(out)?;
            writeln!(out, "Extracted Text")?;
            writeln!(out, "{}", record.content)
        }
        UploadOutcome::Rejected { file_name, reason } => {
            writeln!(out, "{file_name}: {}", reason.message())
        }
    }
}

pub fn render_listing<W: Write>(out: &mut W, records: &[StoredRecord]) -> io::Result<()> {
    writeln!(out, "Saved Text Records and Vectors in Database")?;
    for record in records {
        let head = &record.embedding[..record.embedding.len().min(VECTOR_PREVIEW_LEN)];
        writeln!(out, "File: {} ({})", record.file_name, record.file_type)?;
        writeln!(
            out,
            "Content (first {PREVIEW_CHARS} characters): {}...",
            content_preview(&record.content)
        )?;
        writeln!(out, "Vector (first {VECTOR_PREVIEW_LEN} elements): {head:?}")?;
        writeln!(out, "----")?;
    }
    Ok(())
}

pub fn render_listing_json<W: Write>(out: &mut W, records: &[StoredRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)
}
