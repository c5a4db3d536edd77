//! Single-record detail report
//!
//! One obituary record rendered as a sectioned report on 600x800 pt pages.
//! The first page carries the full title block (and logo when available);
//! overflow pages get a short continuation header via the writer's page
//! header, so section flow never has to track pagination itself.

use chrono::NaiveDate;

use crate::config::defaults::*;
use crate::config::PageStyle;
use crate::error::RenderError;
use crate::model::ObituaryRecord;
use crate::render::wrap::wrap_text;
use crate::render::writer::{FontKind, FooterOptions, HeaderLine, PageHeader, ReportWriter};

pub struct RecordReportRenderer {
    style: PageStyle,
}

impl Default for RecordReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordReportRenderer {
    pub fn new() -> Self {
        Self {
            style: PageStyle::record_report(),
        }
    }

    /// Render a hydrated record to PDF bytes. `logo` is optional PNG data;
    /// missing or undecodable bytes degrade to a logo-less report.
    pub fn render(
        &self,
        record: &ObituaryRecord,
        logo: Option<&[u8]>,
    ) -> Result<Vec<u8>, RenderError> {
        let title = format!("Obituary {}", record.reference);
        let mut writer = ReportWriter::new(&title, self.style)?;

        writer.set_page_header(PageHeader {
            lines: vec![HeaderLine {
                text: format!("{} - {} (continued)", record.reference, record.full_name()),
                font: FontKind::Bold,
                size: BODY_FONT_SIZE,
            }],
            rule: true,
        });

        self.title_block(&mut writer, record, logo);
        self.personal_details(&mut writer, record);
        self.publication(&mut writer, record);
        self.relatives(&mut writer, record);
        self.also_known_as(&mut writer, record);
        self.notes(&mut writer, record);
        self.proofreading(&mut writer, record);

        writer.finish(FooterOptions {
            page_numbers: false,
        })
    }

    fn title_block(&self, writer: &mut ReportWriter, record: &ObituaryRecord, logo: Option<&[u8]>) {
        if let Some(bytes) = logo {
            let x = self.style.page_width - self.style.margin - LOGO_TARGET_WIDTH;
            writer.logo_at(bytes, x, self.style.margin, LOGO_TARGET_WIDTH);
        }

        writer.text_line(
            "Obituary Record",
            self.style.margin,
            TITLE_FONT_SIZE,
            FontKind::Bold,
            Some(SECTION_COLOR),
        );
        writer.text_line(
            &record.full_name(),
            self.style.margin,
            SECTION_FONT_SIZE,
            FontKind::Bold,
            None,
        );
        writer.text_line(
            &format!("Reference {}", record.reference),
            self.style.margin,
            BODY_FONT_SIZE,
            FontKind::Regular,
            Some(MUTED_COLOR),
        );
        writer.rule(RULE_COLOR, RULE_THICKNESS);
        writer.vspace(RULE_PADDING);
    }

    fn personal_details(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        writer.section_header("Personal Details");

        self.field(writer, "Surname", Some(&record.surname));
        self.field(writer, "Given names", record.given_names.as_deref());
        self.field(writer, "Title", record.title.as_deref());
        self.field(writer, "Maiden name", record.maiden_name.as_deref());
        self.field(writer, "Born", date_place(record.birth_date, record.birth_place.as_deref()).as_deref());
        self.field(writer, "Died", date_place(record.death_date, record.death_place.as_deref()).as_deref());
        self.field(writer, "Cemetery", record.cemetery.as_deref());
        writer.vspace(RULE_PADDING);
    }

    fn publication(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        writer.section_header("Publication");

        self.field(writer, "Periodical", record.periodical.as_deref());
        self.field(
            writer,
            "Published",
            record.publish_date.map(format_date).as_deref(),
        );
        self.field(writer, "Page", record.page.as_deref());
        self.field(writer, "Column", record.column.as_deref());
        self.field(writer, "File box", record.file_box.as_deref());
        writer.vspace(RULE_PADDING);
    }

    fn relatives(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        if record.relatives.is_empty() {
            return;
        }
        writer.section_header("Relatives");

        let indent = self.style.margin + 12.0;
        let max_width = self.style.page_width - self.style.margin - indent;
        let measurer = writer.measurer(FontKind::Regular);

        for relative in &record.relatives {
            let mut entry = relative.name.clone();
            if let Some(ref rel) = relative.relationship {
                entry.push_str(&format!(", {rel}"));
            }
            if relative.predeceased {
                entry.push_str(" (predeceased)");
            }

            for line in wrap_text(&entry, max_width, |s| measurer.width_pt(s, BODY_FONT_SIZE)) {
                writer.text_line(&line, indent, BODY_FONT_SIZE, FontKind::Regular, None);
            }
        }
        writer.vspace(RULE_PADDING);
    }

    fn also_known_as(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        if record.also_known_as.is_empty() {
            return;
        }
        writer.section_header("Also Known As");

        let indent = self.style.margin + 12.0;
        for aka in &record.also_known_as {
            let display = aka.display();
            if !display.is_empty() {
                writer.text_line(&display, indent, BODY_FONT_SIZE, FontKind::Regular, None);
            }
        }
        writer.vspace(RULE_PADDING);
    }

    fn notes(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        let Some(ref notes) = record.notes else {
            return;
        };
        if notes.trim().is_empty() {
            return;
        }
        writer.section_header("Notes");

        let max_width = self.style.content_width();
        let measurer = writer.measurer(FontKind::Regular);
        for line in wrap_text(notes, max_width, |s| measurer.width_pt(s, BODY_FONT_SIZE)) {
            writer.text_line(&line, self.style.margin, BODY_FONT_SIZE, FontKind::Regular, None);
        }
        writer.vspace(RULE_PADDING);
    }

    fn proofreading(&self, writer: &mut ReportWriter, record: &ObituaryRecord) {
        writer.section_header("Proofreading");

        let status = if record.proofread { "Yes" } else { "No" };
        self.field(writer, "Proofread", Some(status));
        self.field(
            writer,
            "Proofread on",
            record.proofread_date.map(format_date).as_deref(),
        );
        self.field(writer, "Proofread by", record.proofread_by.as_deref());
    }

    fn field(&self, writer: &mut ReportWriter, key: &str, value: Option<&str>) {
        let Some(value) = value else { return };
        if value.is_empty() {
            return;
        }
        let max_width = self.style.page_width - self.style.margin - RECORD_VALUE_COLUMN_X;
        writer.key_value(key, value, RECORD_VALUE_COLUMN_X, max_width);
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%e %B %Y").to_string().trim().to_string()
}

fn date_place(date: Option<NaiveDate>, place: Option<&str>) -> Option<String> {
    match (date, place) {
        (Some(d), Some(p)) => Some(format!("{}, {p}", format_date(d))),
        (Some(d), None) => Some(format_date(d)),
        (None, Some(p)) => Some(p.to_string()),
        (None, None) => None,
    }
}
