//! PDF text extraction via lopdf, one page at a time.

use lopdf::Document as PdfDocument;
use tracing::debug;

use crate::error::ExtractionError;

/// Extract the text of every page, in page order.
///
/// Any page that fails to decode fails the whole document.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pdf = PdfDocument::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    let pages = pdf.get_pages();
    debug!(pages = pages.len(), bytes = bytes.len(), "Parsed PDF");

    let texts = pages
        .keys()
        .map(|page_num| {
            pdf.extract_text(&[*page_num]).map_err(|e| {
                debug!(page = page_num, error = %e, "Page text could not be decoded");
                ExtractionError::Pdf(format!("page {page_num}: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    join_page_texts(texts)
}

/// Join trimmed page texts with single newlines, skipping blank pages.
pub fn join_page_texts<I>(pages: I) -> Result<String, ExtractionError>
where
    I: IntoIterator<Item = String>,
{
    let joined = pages
        .into_iter()
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if joined.is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(joined)
}
