pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod reference;
pub mod render;
pub mod store;

pub use error::{ReferenceError, RenderError, StoreError};
pub use model::ObituaryRecord;
pub use reference::generate_reference;
pub use render::{RecordReportRenderer, SearchReportRenderer};
pub use store::{MemoryStore, ObituaryStore};

/// High-level API: render one record's detail report to PDF bytes.
///
/// `logo` is optional PNG data for the letterhead; pass `None` (or bytes
/// that fail to decode) to render without it.
///
/// # Example
///
/// ```no_run
/// use obit_report::{render_record_report, ObituaryRecord};
///
/// let record = ObituaryRecord {
///     reference: "ERIC0004".into(),
///     surname: "Ericksen".into(),
///     ..Default::default()
/// };
/// let pdf_bytes = render_record_report(&record, None).unwrap();
/// std::fs::write("ERIC0004.pdf", pdf_bytes).unwrap();
/// ```
pub fn render_record_report(
    record: &ObituaryRecord,
    logo: Option<&[u8]>,
) -> Result<Vec<u8>, RenderError> {
    RecordReportRenderer::new().render(record, logo)
}

/// High-level API: render a batch of search hits as a tabular report.
pub fn render_search_report(
    records: &[ObituaryRecord],
    query: &str,
    logo: Option<&[u8]>,
) -> Result<Vec<u8>, RenderError> {
    SearchReportRenderer::new().render(records, query, logo)
}
