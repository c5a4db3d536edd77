//! PDF report rendering

pub mod compress;
pub mod logo;
pub mod metrics;
pub mod record_report;
pub mod search_report;
pub mod wrap;
pub mod writer;

pub use record_report::RecordReportRenderer;
pub use search_report::SearchReportRenderer;
pub use wrap::{truncate_with_ellipsis, wrap_text};
pub use writer::{FontKind, FooterOptions, LayoutCursor, ReportWriter};
