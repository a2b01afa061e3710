use crate::docx::extract_paragraphs;
use crate::error::{IngestError, Result};
use crate::models::FileType;
use lopdf::Document;

pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let document =
            Document::load_mem(bytes).map_err(|error| IngestError::PdfParse(error.to_string()))?;

        let mut text = String::new();
        for page_no in document.get_pages().into_keys() {
            let page_text = document
                .extract_text(&[page_no])
                .map_err(|error| IngestError::PdfParse(format!("page {page_no}: {error}")))?;

            text.push_str(page_text.trim_end_matches(['\r', '\n']));
        }

        Ok(text)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let mut text = String::new();
        for paragraph in extract_paragraphs(bytes)? {
            text.push_str(&paragraph);
            text.push('\n');
        }
        Ok(text)
    }
}

pub fn extract_pdf(bytes: &[u8]) -> Result<String> {
    LopdfExtractor.extract_text(bytes)
}

pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    DocxExtractor.extract_text(bytes)
}

impl FileType {
    pub fn extractor(self) -> &'static dyn TextExtractor {
        match self {
            Self::Pdf => &LopdfExtractor,
            Self::Docx => &DocxExtractor,
        }
    }

    pub fn extract(self, bytes: &[u8]) -> Result<String> {
        self.extractor().extract_text(bytes)
    }
}
