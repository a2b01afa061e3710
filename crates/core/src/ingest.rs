use crate::{IngestError, Result, UploadedFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx"];

pub fn discover_documents(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_document = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_document {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

/// Expands command-line paths into uploads, in argument order.
///
/// Directories contribute every PDF/DOCX below them; plain files are taken as
/// given so an unsupported type still reaches the dispatcher and gets reported.
pub fn collect_uploads(
    paths: &[PathBuf],
    mime_type: Option<&str>,
) -> Result<Vec<UploadedFile>> {
    let mut uploads = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = discover_documents(path);
            if found.is_empty() {
                return Err(IngestError::InvalidArgument(format!(
                    "no pdf or docx files found in {}",
                    path.display()
                )));
            }
            for file in found {
                uploads.push(UploadedFile::from_path(&file, mime_type)?);
            }
        } else {
            uploads.push(UploadedFile::from_path(path, mime_type)?);
        }
    }

    Ok(uploads)
}
