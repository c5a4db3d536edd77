//! PDF stream compression
//!
//! printpdf writes uncompressed content streams; reports with long relative
//! lists get large quickly. This post-pass reparses the bytes with lopdf and
//! compresses every stream before the document leaves the engine.

use std::io::Cursor;

use crate::error::RenderError;

pub fn compress_pdf(uncompressed: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    let mut doc = lopdf::Document::load_mem(&uncompressed)
        .map_err(|e| RenderError::PdfGeneration(format!("compression reparse failed: {e}")))?;

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| RenderError::PdfGeneration(format!("compressed save failed: {e}")))?;

    Ok(output.into_inner())
}
