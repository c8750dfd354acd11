//! PDF upload checks.

use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;

/// The only accepted content type.
pub const PDF_MIME: &str = "application/pdf";

/// Check that an upload is a PDF by declared type, extension, and content.
pub fn ensure_pdf(file_name: &str, content_type: Option<&str>, data: &[u8]) -> AppResult<()> {
    let declared = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    if declared.as_deref() != Some(PDF_MIME) {
        return Err(AppError::validation(format!(
            "Only PDF files are allowed: '{file_name}' has content type '{}'",
            content_type.unwrap_or("unknown")
        )));
    }

    let has_pdf_extension = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"));
    if !has_pdf_extension {
        return Err(AppError::validation(format!(
            "Only PDF files are allowed: '{file_name}' does not have a .pdf extension"
        )));
    }

    let sniffed = infer::get(data).map(|kind| kind.mime_type());
    if sniffed != Some(PDF_MIME) {
        return Err(AppError::validation(format!(
            "Only PDF files are allowed: '{file_name}' is not a PDF document"
        )));
    }

    Ok(())
}
