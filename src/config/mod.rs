//! Report configuration

pub mod defaults;

use defaults::*;

/// Page geometry for one report type. All distances in points.
#[derive(Debug, Clone, Copy)]
pub struct PageStyle {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub line_height: f32,
}

impl PageStyle {
    /// Geometry for the single-record detail report.
    pub fn record_report() -> Self {
        Self {
            page_width: RECORD_PAGE_WIDTH,
            page_height: RECORD_PAGE_HEIGHT,
            margin: RECORD_MARGIN,
            line_height: LINE_HEIGHT,
        }
    }

    /// Geometry for the tabular search-results report (US Letter).
    pub fn search_report() -> Self {
        Self {
            page_width: SEARCH_PAGE_WIDTH,
            page_height: SEARCH_PAGE_HEIGHT,
            margin: SEARCH_MARGIN,
            line_height: LINE_HEIGHT,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest top-down cursor position content may occupy. The footer band
    /// below this is stamped during finalization.
    pub fn content_limit(&self) -> f32 {
        self.page_height - self.margin
    }
}
