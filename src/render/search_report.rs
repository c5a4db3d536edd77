//! Tabular search-results report
//!
//! Search hits rendered up to 25 rows to a US Letter page. Every page
//! redraws the header block (title, query, hit count, generation timestamp,
//! logo) and the column header row. Cell text is ellipsis-truncated against
//! its column width; the images cell is the one variable-height cell, so
//! each row's height is measured before it is drawn and a page holds fewer
//! than 25 rows when tall rows would cross the bottom margin.

use chrono::Utc;

use crate::config::defaults::*;
use crate::config::PageStyle;
use crate::error::RenderError;
use crate::model::ObituaryRecord;
use crate::render::wrap::truncate_with_ellipsis;
use crate::render::writer::{FontKind, FooterOptions, ReportWriter};

const CELL_PADDING: f32 = 4.0;
const STACKED_LINE_HEIGHT: f32 = 8.0;

const COLUMN_LABELS: [&str; 6] = [
    "Reference",
    "Surname",
    "Given names",
    "Died",
    "Periodical",
    "Images",
];

pub struct SearchReportRenderer {
    style: PageStyle,
}

impl Default for SearchReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchReportRenderer {
    pub fn new() -> Self {
        Self {
            style: PageStyle::search_report(),
        }
    }

    /// Render search hits for `query` to PDF bytes.
    pub fn render(
        &self,
        records: &[ObituaryRecord],
        query: &str,
        logo: Option<&[u8]>,
    ) -> Result<Vec<u8>, RenderError> {
        let mut writer = ReportWriter::new("Obituary Search Results", self.style)?;
        let generated = Utc::now().format("%e %B %Y %H:%M UTC").to_string();

        self.page_header(&mut writer, query, records.len(), &generated, logo);
        self.column_headers(&mut writer);

        let mut rows_on_page = 0;
        for record in records {
            // Measure before drawing: a stacked images cell can make a row
            // taller than the nominal row height, so the row cap alone does
            // not keep content above the bottom margin.
            let height = self.row_height(record);
            if rows_on_page == SEARCH_ROWS_PER_PAGE
                || writer.cursor().y + height > self.style.content_limit()
            {
                writer.new_page();
                self.page_header(&mut writer, query, records.len(), &generated, logo);
                self.column_headers(&mut writer);
                rows_on_page = 0;
            }
            self.row(&mut writer, record);
            rows_on_page += 1;
        }

        writer.finish(FooterOptions { page_numbers: true })
    }

    /// Vertical space one record's row occupies. The images cell is the
    /// only cell that can outgrow the nominal row height: two or more file
    /// names stack at a reduced size.
    fn row_height(&self, record: &ObituaryRecord) -> f32 {
        let images = match record.image_files.len() {
            0 | 1 => 0.0,
            n => n as f32 * STACKED_LINE_HEIGHT + CELL_PADDING,
        };
        SEARCH_ROW_HEIGHT.max(images)
    }

    /// Left x offset of column `index`.
    fn column_x(&self, index: usize) -> f32 {
        self.style.margin + SEARCH_COLUMNS[..index].iter().sum::<f32>()
    }

    /// Usable text width inside column `index`.
    fn column_width(&self, index: usize) -> f32 {
        SEARCH_COLUMNS[index] - CELL_PADDING
    }

    fn page_header(
        &self,
        writer: &mut ReportWriter,
        query: &str,
        total: usize,
        generated: &str,
        logo: Option<&[u8]>,
    ) {
        if let Some(bytes) = logo {
            let x = self.style.page_width - self.style.margin - LOGO_TARGET_WIDTH;
            writer.logo_at(bytes, x, self.style.margin, LOGO_TARGET_WIDTH);
        }

        writer.text_line(
            "Obituary Search Results",
            self.style.margin,
            TITLE_FONT_SIZE,
            FontKind::Bold,
            Some(SECTION_COLOR),
        );
        writer.text_line(
            &format!("Search: \"{query}\""),
            self.style.margin,
            BODY_FONT_SIZE,
            FontKind::Regular,
            None,
        );
        let count = if total == 1 {
            "1 record found".to_string()
        } else {
            format!("{total} records found")
        };
        writer.text_line(&count, self.style.margin, BODY_FONT_SIZE, FontKind::Regular, Some(MUTED_COLOR));
        writer.text_line(
            &format!("Generated {generated}"),
            self.style.margin,
            SMALL_FONT_SIZE,
            FontKind::Regular,
            Some(MUTED_COLOR),
        );
        writer.rule(RULE_COLOR, RULE_THICKNESS);
    }

    fn column_headers(&self, writer: &mut ReportWriter) {
        let y = writer.cursor().y;
        for (index, label) in COLUMN_LABELS.iter().enumerate() {
            writer.text_at(
                label,
                self.column_x(index),
                y + BODY_FONT_SIZE,
                BODY_FONT_SIZE,
                FontKind::Bold,
                Some(SECTION_COLOR),
            );
        }
        writer.vspace(self.style.line_height);
        writer.line_at(
            self.style.margin,
            self.style.page_width - self.style.margin,
            writer.cursor().y,
            RULE_COLOR,
        );
        writer.vspace(RULE_PADDING);
    }

    fn row(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        let measurer = writer.measurer(FontKind::Regular);
        let truncate = |text: &str, column: usize| {
            truncate_with_ellipsis(text, self.column_width(column), |s| {
                measurer.width_pt(s, BODY_FONT_SIZE)
            })
        };

        let y = writer.cursor().y;
        let baseline = y + BODY_FONT_SIZE;

        writer.text_at(
            &record.reference,
            self.column_x(0),
            baseline,
            BODY_FONT_SIZE,
            FontKind::Regular,
            None,
        );
        writer.text_at(
            &truncate(&record.surname, 1),
            self.column_x(1),
            baseline,
            BODY_FONT_SIZE,
            FontKind::Regular,
            None,
        );
        writer.text_at(
            &truncate(record.given_names.as_deref().unwrap_or(""), 2),
            self.column_x(2),
            baseline,
            BODY_FONT_SIZE,
            FontKind::Regular,
            None,
        );
        let died = record
            .death_date
            .map(|d| d.format("%e %b %Y").to_string().trim().to_string())
            .unwrap_or_default();
        writer.text_at(&died, self.column_x(3), baseline, BODY_FONT_SIZE, FontKind::Regular, None);
        writer.text_at(
            &truncate(record.periodical.as_deref().unwrap_or(""), 4),
            self.column_x(4),
            baseline,
            BODY_FONT_SIZE,
            FontKind::Regular,
            None,
        );

        self.images_cell(writer, record, y);
        writer.vspace(self.row_height(record));
    }

    /// Render the images cell. A single file name is drawn inline at the
    /// row baseline; multiple names stack vertically at a reduced size.
    fn images_cell(&self, writer: &mut ReportWriter, record: &ObituaryRecord, row_y: f32) {
        let x = self.column_x(5);
        let width = self.column_width(5);
        let measurer = writer.measurer(FontKind::Regular);

        match record.image_files.len() {
            0 => {}
            1 => {
                let name = truncate_with_ellipsis(&record.image_files[0], width, |s| {
                    measurer.width_pt(s, SMALL_FONT_SIZE)
                });
                writer.text_at(
                    &name,
                    x,
                    row_y + BODY_FONT_SIZE,
                    SMALL_FONT_SIZE,
                    FontKind::Regular,
                    Some(MUTED_COLOR),
                );
            }
            _ => {
                for (i, file) in record.image_files.iter().enumerate() {
                    let name = truncate_with_ellipsis(file, width, |s| {
                        measurer.width_pt(s, STACKED_IMAGE_FONT_SIZE)
                    });
                    writer.text_at(
                        &name,
                        x,
                        row_y + STACKED_IMAGE_FONT_SIZE + i as f32 * STACKED_LINE_HEIGHT,
                        STACKED_IMAGE_FONT_SIZE,
                        FontKind::Regular,
                        Some(MUTED_COLOR),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(surname: &str) -> ObituaryRecord {
        ObituaryRecord {
            reference: "TEST0001".into(),
            surname: surname.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_result_set_still_renders_a_header_page() {
        // The API layer 404s before reaching here, but the renderer itself
        // must not panic on an empty slice.
        let bytes = SearchReportRenderer::new()
            .render(&[], "nobody", None)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn single_page_report_renders() {
        let records: Vec<_> = (0..10).map(|_| record("Ericksen")).collect();
        let bytes = SearchReportRenderer::new()
            .render(&records, "ericksen", None)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn stacked_image_cells_grow_the_row_height() {
        let renderer = SearchReportRenderer::new();
        let mut r = record("Ericksen");
        assert_eq!(renderer.row_height(&r), SEARCH_ROW_HEIGHT);

        r.image_files = vec!["ERIC0001-1.png".into()];
        assert_eq!(renderer.row_height(&r), SEARCH_ROW_HEIGHT);

        r.image_files = (1..=5).map(|i| format!("ERIC0001-{i}.png")).collect();
        assert_eq!(
            renderer.row_height(&r),
            5.0 * STACKED_LINE_HEIGHT + CELL_PADDING
        );
    }

    #[test]
    fn column_offsets_are_cumulative() {
        let renderer = SearchReportRenderer::new();
        assert_eq!(renderer.column_x(0), renderer.style.margin);
        assert!(renderer.column_x(5) > renderer.column_x(4));
        assert!(
            renderer.column_x(5) + SEARCH_COLUMNS[5]
                <= renderer.style.page_width - renderer.style.margin
        );
    }
}
