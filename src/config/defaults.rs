//! Fixed layout constants
//!
//! These values are a de facto format contract: members compare freshly
//! generated reports against ones they downloaded years ago, so page sizes,
//! margins, font sizes and column widths must not drift. All distances are in
//! PDF points (1/72 inch).

// Record detail report page (custom 600x800 portrait)
pub const RECORD_PAGE_WIDTH: f32 = 600.0;
pub const RECORD_PAGE_HEIGHT: f32 = 800.0;
pub const RECORD_MARGIN: f32 = 50.0;
pub const RECORD_VALUE_COLUMN_X: f32 = 190.0;

// Search results report page (US Letter)
pub const SEARCH_PAGE_WIDTH: f32 = 612.0;
pub const SEARCH_PAGE_HEIGHT: f32 = 792.0;
pub const SEARCH_MARGIN: f32 = 40.0;
pub const SEARCH_ROWS_PER_PAGE: usize = 25;
pub const SEARCH_ROW_HEIGHT: f32 = 20.0;

// Search report column widths, left to right:
// reference, surname, given names, death date, periodical, images
pub const SEARCH_COLUMNS: [f32; 6] = [64.0, 92.0, 118.0, 74.0, 104.0, 80.0];

// Typography (font sizes in points)
pub const TITLE_FONT_SIZE: f32 = 18.0;
pub const SECTION_FONT_SIZE: f32 = 13.0;
pub const BODY_FONT_SIZE: f32 = 10.0;
pub const SMALL_FONT_SIZE: f32 = 8.0;
pub const STACKED_IMAGE_FONT_SIZE: f32 = 6.5;
pub const FOOTER_FONT_SIZE: f32 = 8.0;
pub const LINE_HEIGHT: f32 = 14.0;

// Rules
pub const RULE_THICKNESS: f32 = 1.0;
pub const RULE_PADDING: f32 = 6.0;

// Colors (RGB 0.0-1.0)
pub const SECTION_COLOR: (f32, f32, f32) = (0.13, 0.23, 0.42);
pub const RULE_COLOR: (f32, f32, f32) = (0.13, 0.23, 0.42);
pub const LINK_COLOR: (f32, f32, f32) = (0.0, 0.25, 0.65);
pub const MUTED_COLOR: (f32, f32, f32) = (0.35, 0.35, 0.35);

// Footer text stamped on every page
pub const COPYRIGHT_TEXT: &str =
    "(c) Heritage Obituary Archive. Reproduced for research purposes only.";
pub const WEBSITE_TEXT: &str = "obituaries.heritagearchive.org";
pub const WEBSITE_URL: &str = "https://obituaries.heritagearchive.org";
pub const CREDIT_TEXT: &str = "Report generated by the archive reporting service";

// Logo
pub const LOGO_TARGET_WIDTH: f32 = 72.0;
pub const LOGO_FETCH_TIMEOUT_SECS: u64 = 10;
