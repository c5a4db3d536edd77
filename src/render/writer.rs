//! Paginated report writer
//!
//! `ReportWriter` owns the PDF document, the ordered page list and the layout
//! cursor. The cursor tracks a top-down `y` offset from the page top; PDF's
//! origin is bottom-left, so every draw inverts through [`ReportWriter::pdf_y`].
//! All flowing draw helpers go through [`ReportWriter::ensure_space`], which is
//! the single place a page break can happen.

use std::io::Cursor;

use printpdf::{
    Actions, BorderArray, BuiltinFont, Color, ColorArray, HighlightingMode, Image, ImageTransform,
    IndirectFontRef, Line, LinkAnnotation, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Pt, Rect, Rgb,
};

use crate::config::defaults::*;
use crate::config::PageStyle;
use crate::error::RenderError;
use crate::render::compress::compress_pdf;
use crate::render::metrics::{helvetica, helvetica_bold, FontMeasurer};
use crate::render::wrap::wrap_text;

/// Font selector for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
}

/// Position of the layout cursor within the document.
#[derive(Debug, Clone, Copy)]
pub struct LayoutCursor {
    /// Index into the ordered page list.
    pub page: usize,
    /// Offset from the top margin edge, in points. Never exceeds the
    /// content limit without a new page being allocated first.
    pub y: f32,
}

/// A fixed header line redrawn at the top of every continuation page.
#[derive(Debug, Clone)]
pub struct HeaderLine {
    pub text: String,
    pub font: FontKind,
    pub size: f32,
}

/// Fixed elements redrawn whenever `ensure_space` allocates a new page.
#[derive(Debug, Clone, Default)]
pub struct PageHeader {
    pub lines: Vec<HeaderLine>,
    pub rule: bool,
}

/// Footer configuration for [`ReportWriter::finish`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterOptions {
    /// Right-aligned "Page N of M" (search-results reports only).
    pub page_numbers: bool,
}

pub struct ReportWriter {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    cursor: LayoutCursor,
    style: PageStyle,
    page_header: Option<PageHeader>,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl ReportWriter {
    pub fn new(title: &str, style: PageStyle) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm::from(Pt(style.page_width)),
            Mm::from(Pt(style.page_height)),
            "Page 1",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::FontLoad(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::FontLoad(e.to_string()))?;

        Ok(Self {
            doc,
            pages: vec![(page, layer)],
            cursor: LayoutCursor {
                page: 0,
                y: style.margin,
            },
            style,
            page_header: None,
            regular,
            bold,
        })
    }

    pub fn style(&self) -> &PageStyle {
        &self.style
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Install the fixed header redrawn on pages allocated by `ensure_space`.
    pub fn set_page_header(&mut self, header: PageHeader) {
        self.page_header = Some(header);
    }

    fn font(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
        }
    }

    pub fn measurer(&self, kind: FontKind) -> FontMeasurer {
        match kind {
            FontKind::Regular => helvetica(),
            FontKind::Bold => helvetica_bold(),
        }
    }

    fn layer(&self) -> PdfLayerReference {
        let (page, layer) = self.pages[self.cursor.page];
        self.doc.get_page(page).get_layer(layer)
    }

    fn layer_for(&self, index: usize) -> PdfLayerReference {
        let (page, layer) = self.pages[index];
        self.doc.get_page(page).get_layer(layer)
    }

    /// Invert a top-down offset into the PDF's bottom-left coordinates.
    fn pdf_y(&self, top_down: f32) -> Mm {
        Mm::from(Pt(self.style.page_height - top_down))
    }

    fn x(&self, x: f32) -> Mm {
        Mm::from(Pt(x))
    }

    /// The pagination chokepoint. Allocates a new page (and redraws the
    /// fixed page header) when `required` points of vertical space would
    /// cross the bottom margin. Returns true when a page break happened.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        if self.cursor.y + required <= self.style.content_limit() {
            return false;
        }
        self.new_page();
        true
    }

    /// Allocate a fresh page and reset the cursor to the top margin.
    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        let (page, layer) = self.doc.add_page(
            Mm::from(Pt(self.style.page_width)),
            Mm::from(Pt(self.style.page_height)),
            format!("Page {number}"),
        );
        self.pages.push((page, layer));
        self.cursor.page = self.pages.len() - 1;
        self.cursor.y = self.style.margin;

        if let Some(header) = self.page_header.clone() {
            for line in &header.lines {
                self.raw_text_line(&line.text, self.style.margin, line.size, line.font, None);
            }
            if header.rule {
                self.raw_rule(RULE_COLOR, RULE_THICKNESS);
            }
            self.cursor.y += RULE_PADDING;
        }
    }

    /// Draw one line of text at the cursor, paginating first if needed.
    pub fn text_line(
        &mut self,
        text: &str,
        x: f32,
        size: f32,
        font: FontKind,
        color: Option<(f32, f32, f32)>,
    ) {
        let advance = self.style.line_height.max(size * 1.25);
        self.ensure_space(advance);
        self.raw_text_line_advance(text, x, size, font, color, advance);
    }

    fn raw_text_line(
        &mut self,
        text: &str,
        x: f32,
        size: f32,
        font: FontKind,
        color: Option<(f32, f32, f32)>,
    ) {
        let advance = self.style.line_height.max(size * 1.25);
        self.raw_text_line_advance(text, x, size, font, color, advance);
    }

    fn raw_text_line_advance(
        &mut self,
        text: &str,
        x: f32,
        size: f32,
        font: FontKind,
        color: Option<(f32, f32, f32)>,
        advance: f32,
    ) {
        let baseline = self.cursor.y + size;
        self.draw_text_at(self.cursor.page, text, x, baseline, size, font, color);
        self.cursor.y += advance;
    }

    /// Positioned draw with no cursor movement (headers, footers, cells).
    #[allow(clippy::too_many_arguments)]
    pub fn text_at(
        &self,
        text: &str,
        x: f32,
        y_top_down: f32,
        size: f32,
        font: FontKind,
        color: Option<(f32, f32, f32)>,
    ) {
        self.draw_text_at(self.cursor.page, text, x, y_top_down, size, font, color);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text_at(
        &self,
        page: usize,
        text: &str,
        x: f32,
        baseline_top_down: f32,
        size: f32,
        font: FontKind,
        color: Option<(f32, f32, f32)>,
    ) {
        if text.is_empty() {
            return;
        }
        let layer = self.layer_for(page);
        let (r, g, b) = color.unwrap_or((0.0, 0.0, 0.0));
        layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        layer.use_text(
            text,
            size,
            self.x(x),
            self.pdf_y(baseline_top_down),
            self.font(font),
        );
    }

    /// Bold key at the left margin, word-wrapped value at `value_x`, both
    /// starting from the same pre-advance cursor position. The whole block
    /// is space-checked up front so a key is never orphaned from its value.
    pub fn key_value(&mut self, key: &str, value: &str, value_x: f32, max_width: f32) {
        let measurer = self.measurer(FontKind::Regular);
        let lines = wrap_text(value, max_width, |s| measurer.width_pt(s, BODY_FONT_SIZE));
        let block_height = self.style.line_height * lines.len().max(1) as f32;
        self.ensure_space(block_height);

        let start_y = self.cursor.y;
        let baseline = start_y + BODY_FONT_SIZE;
        self.draw_text_at(
            self.cursor.page,
            key,
            self.style.margin,
            baseline,
            BODY_FONT_SIZE,
            FontKind::Bold,
            None,
        );
        for (i, line) in lines.iter().enumerate() {
            self.draw_text_at(
                self.cursor.page,
                line,
                value_x,
                baseline + i as f32 * self.style.line_height,
                BODY_FONT_SIZE,
                FontKind::Regular,
                None,
            );
        }
        self.cursor.y = start_y + block_height;
    }

    /// Bold colored section title with a full-width rule beneath it.
    pub fn section_header(&mut self, title: &str) {
        let needed = SECTION_FONT_SIZE * 1.25 + RULE_THICKNESS + 2.0 * RULE_PADDING;
        self.ensure_space(needed);
        self.raw_text_line(
            title,
            self.style.margin,
            SECTION_FONT_SIZE,
            FontKind::Bold,
            Some(SECTION_COLOR),
        );
        self.raw_rule(RULE_COLOR, RULE_THICKNESS);
        self.cursor.y += RULE_PADDING;
    }

    /// Horizontal rule spanning the content width.
    pub fn rule(&mut self, color: (f32, f32, f32), thickness: f32) {
        self.ensure_space(thickness + RULE_PADDING);
        self.raw_rule(color, thickness);
    }

    fn raw_rule(&mut self, color: (f32, f32, f32), thickness: f32) {
        let y = self.pdf_y(self.cursor.y + thickness);
        let layer = self.layer();
        layer.set_outline_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(self.x(self.style.margin), y), false),
                (
                    Point::new(self.x(self.style.page_width - self.style.margin), y),
                    false,
                ),
            ],
            is_closed: false,
        });
        self.cursor.y += thickness + RULE_PADDING;
    }

    /// Horizontal line at an absolute position on the current page.
    pub fn line_at(&self, x1: f32, x2: f32, y_top_down: f32, color: (f32, f32, f32)) {
        self.line_on_page(self.cursor.page, x1, x2, y_top_down, color, RULE_THICKNESS);
    }

    fn line_on_page(
        &self,
        page: usize,
        x1: f32,
        x2: f32,
        y_top_down: f32,
        color: (f32, f32, f32),
        thickness: f32,
    ) {
        let layer = self.layer_for(page);
        let y = self.pdf_y(y_top_down);
        layer.set_outline_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(self.x(x1), y), false),
                (Point::new(self.x(x2), y), false),
            ],
            is_closed: false,
        });
    }

    /// Advance the cursor without drawing. Does not paginate; the next
    /// flowing draw will.
    pub fn vspace(&mut self, height: f32) {
        self.cursor.y += height;
    }

    /// Embed a PNG logo at the cursor, scaled to `target_width`, and advance
    /// past it. Decode failure is non-fatal: the report simply renders
    /// without the image.
    pub fn embed_logo(&mut self, png_bytes: &[u8], x: f32, target_width: f32) {
        if let Some(height) = self.logo_at(png_bytes, x, self.cursor.y, target_width) {
            self.cursor.y += height + RULE_PADDING;
        }
    }

    /// Embed a PNG logo at an absolute top-down position on the current
    /// page. Returns the drawn height, or None when the bytes do not decode.
    pub fn logo_at(&self, png_bytes: &[u8], x: f32, y_top_down: f32, target_width: f32) -> Option<f32> {
        use printpdf::image_crate::codecs::png::PngDecoder;

        let decoder = match PngDecoder::new(Cursor::new(png_bytes)) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Logo PNG decode failed, rendering without it: {e}");
                return None;
            }
        };
        let image = match Image::try_from(decoder) {
            Ok(i) => i,
            Err(e) => {
                log::warn!("Logo PNG embed failed, rendering without it: {e}");
                return None;
            }
        };

        let px_width = image.image.width.0 as f32;
        let px_height = image.image.height.0 as f32;
        if px_width <= 0.0 || px_height <= 0.0 {
            return None;
        }
        // At 72 dpi one pixel is one point, so scale is in points directly.
        let scale = target_width / px_width;
        let drawn_height = px_height * scale;

        image.add_to_layer(
            self.layer(),
            ImageTransform {
                translate_x: Some(self.x(x)),
                translate_y: Some(self.pdf_y(y_top_down + drawn_height)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
        Some(drawn_height)
    }

    /// Stamp the common footer on every allocated page, then serialize and
    /// compress the document. Consumes the writer; an instance is never
    /// reused across renders.
    pub fn finish(self, footer: FooterOptions) -> Result<Vec<u8>, RenderError> {
        let total = self.pages.len();
        let regular = helvetica();

        for index in 0..total {
            let layer = self.layer_for(index);

            // Footer baselines in PDF (bottom-up) coordinates.
            let copyright_y = 36.0;
            let link_y = 24.0;

            layer.set_fill_color(rgb(MUTED_COLOR));
            layer.use_text(
                COPYRIGHT_TEXT,
                FOOTER_FONT_SIZE,
                self.x(self.style.margin),
                Mm::from(Pt(copyright_y)),
                &self.regular,
            );

            // Clickable website link, underlined, its hit rectangle sized
            // from the measured text width.
            let link_width = regular.width_pt(WEBSITE_TEXT, FOOTER_FONT_SIZE);
            layer.set_fill_color(rgb(LINK_COLOR));
            layer.use_text(
                WEBSITE_TEXT,
                FOOTER_FONT_SIZE,
                self.x(self.style.margin),
                Mm::from(Pt(link_y)),
                &self.regular,
            );
            self.line_on_page(
                index,
                self.style.margin,
                self.style.margin + link_width,
                self.style.page_height - link_y + 1.5,
                LINK_COLOR,
                0.5,
            );
            layer.add_link_annotation(LinkAnnotation::new(
                Rect::new(
                    self.x(self.style.margin),
                    Mm::from(Pt(link_y - 2.0)),
                    self.x(self.style.margin + link_width),
                    Mm::from(Pt(link_y + FOOTER_FONT_SIZE)),
                ),
                Some(BorderArray::default()),
                Some(ColorArray::default()),
                Actions::uri(WEBSITE_URL.to_string()),
                Some(HighlightingMode::Invert),
            ));

            let credit_width = regular.width_pt(CREDIT_TEXT, FOOTER_FONT_SIZE);
            layer.set_fill_color(rgb(MUTED_COLOR));
            layer.use_text(
                CREDIT_TEXT,
                FOOTER_FONT_SIZE,
                self.x(self.style.page_width - self.style.margin - credit_width),
                Mm::from(Pt(link_y)),
                &self.regular,
            );

            if footer.page_numbers {
                let label = format!("Page {} of {}", index + 1, total);
                let label_width = regular.width_pt(&label, FOOTER_FONT_SIZE);
                layer.set_fill_color(rgb(MUTED_COLOR));
                layer.use_text(
                    label,
                    FOOTER_FONT_SIZE,
                    self.x(self.style.page_width - self.style.margin - label_width),
                    Mm::from(Pt(copyright_y)),
                    &self.regular,
                );
            }
        }

        let bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| RenderError::PdfGeneration(e.to_string()))?;
        compress_pdf(bytes)
    }
}

fn rgb(color: (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(color.0, color.1, color.2, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_space_breaks_exactly_at_the_content_limit() {
        let style = PageStyle::record_report();
        let mut writer = ReportWriter::new("test", style).unwrap();

        let usable = style.content_limit() - style.margin;
        assert!(!writer.ensure_space(usable));
        assert_eq!(writer.page_count(), 1);

        writer.vspace(usable);
        assert!(writer.ensure_space(style.line_height));
        assert_eq!(writer.page_count(), 2);
        assert_eq!(writer.cursor().page, 1);
        assert_eq!(writer.cursor().y, style.margin);
    }

    #[test]
    fn text_lines_advance_the_cursor_monotonically() {
        let mut writer = ReportWriter::new("test", PageStyle::record_report()).unwrap();
        let before = writer.cursor().y;
        writer.text_line("Ericksen", 50.0, BODY_FONT_SIZE, FontKind::Regular, None);
        let after = writer.cursor().y;
        assert!(after > before);
    }

    #[test]
    fn continuation_header_is_drawn_below_the_top_margin() {
        let mut writer = ReportWriter::new("test", PageStyle::record_report()).unwrap();
        writer.set_page_header(PageHeader {
            lines: vec![HeaderLine {
                text: "ERIC0004 - Anna Ericksen (continued)".into(),
                font: FontKind::Bold,
                size: BODY_FONT_SIZE,
            }],
            rule: true,
        });
        writer.new_page();
        // Header lines plus rule have moved the cursor past the margin.
        assert!(writer.cursor().y > writer.style().margin);
    }

    #[test]
    fn finished_document_is_a_pdf() {
        let mut writer = ReportWriter::new("test", PageStyle::record_report()).unwrap();
        writer.text_line("Hello", 50.0, 10.0, FontKind::Regular, None);
        let bytes = writer.finish(FooterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
