use anyhow::{Context, Result};
use lopdf::Document;
use tracing::{debug, warn};

pub struct PdfReader;

impl PdfReader {
    /// Extract the text of every page, in page order.
    ///
    /// A page that fails to decode yields an empty string instead of failing
    /// the whole document; only an unparseable file is an error.
    pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
        let document = Document::load_mem(bytes).context("Failed to parse PDF")?;
        let pages = document.get_pages();

        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            match document.extract_text(&[*page_number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!(page = page_number, error = %e, "Failed to extract page text");
                    texts.push(String::new());
                }
            }
        }

        debug!(pages = texts.len(), "Read PDF");
        Ok(texts)
    }

    /// Concatenate the text of all pages, one newline after each page that
    /// produced any text.
    pub fn read_text(bytes: &[u8]) -> Result<String> {
        let mut text = String::new();
        for page in Self::extract_pages(bytes)? {
            if page.trim().is_empty() {
                continue;
            }
            text.push_str(page.trim_end());
            text.push('\n');
        }
        Ok(text)
    }
}
