//! Page layout primitives
//!
//! Layout works in millimeters with the origin at the top-left corner of the
//! page, the way the pages are designed; the writer converts to PDF points.
//! Everything here is infallible: empty text and exhausted pages are no-ops.

use super::metrics;
use crate::config::DocumentConfig;

/// Identification line repeated at the top of every page
pub const HEADER_TEXT: &str =
    "Student Name: ______________________________   Student ID: __________________";

/// Baseline of the identification line
pub const HEADER_Y: f32 = 15.0;

/// Where content starts on a fresh page
pub const CONTENT_TOP: f32 = 30.0;

/// Space kept free at the bottom of every page
pub const BOTTOM_MARGIN: f32 = 20.0;

/// Millimeters per typographic point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Standard PDF fonts used by the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    TimesRoman,
    TimesBold,
    TimesItalic,
    Courier,
}

impl Font {
    /// Every font, in resource order
    pub const ALL: [Font; 4] = [Font::TimesRoman, Font::TimesBold, Font::TimesItalic, Font::Courier];

    /// Base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
            Font::TimesItalic => "Times-Italic",
            Font::Courier => "Courier",
        }
    }

    /// Resource name used in content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::TimesRoman => "F1",
            Font::TimesBold => "F2",
            Font::TimesItalic => "F3",
            Font::Courier => "F4",
        }
    }

    /// Width of `text` in millimeters at `size` points
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(metrics::advance(*self, c))).sum();
        units as f32 / 1000.0 * size * MM_PER_PT
    }
}

/// Font, size and gray level (0 black, 255 white) for drawn text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub gray: u8,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        Self { font, size, gray: 0 }
    }

    pub const fn with_gray(mut self, gray: u8) -> Self {
        self.gray = gray;
        self
    }
}

/// Style of the identification line
pub const HEADER_STYLE: TextStyle = TextStyle::new(Font::TimesRoman, 10.0);

/// One drawing operation on a page
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Single line of text with its baseline at `y`
    Text {
        x: f32,
        y: f32,
        style: TextStyle,
        text: String,
    },
    /// Stroked rectangle with its top-left corner at `(x, y)`
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: u8,
    },
}

/// A laid-out page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text lines on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rect { .. } => None,
        })
    }

    /// Whether any text line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Rectangles on the page
    pub fn rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. }))
    }
}

/// Physical page size and horizontal margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn from_config(config: &DocumentConfig) -> Self {
        let (width, height) = config.page_size.dimensions_mm();
        Self {
            width,
            height,
            margin: config.margin_mm,
        }
    }

    /// Usable width between the margins
    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// Lowest baseline before text moves to a new page
    pub fn overflow_y(&self) -> f32 {
        self.height - BOTTOM_MARGIN
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::from_config(&DocumentConfig::default())
    }
}

/// Split `text` into lines no wider than `max_width`.
///
/// Explicit line breaks are kept (blank lines included), words are packed
/// greedily and a single word wider than the line is broken by character.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if font.text_width(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Break an overlong word
            for ch in word.chars() {
                current.push(ch);
                if font.text_width(&current, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Vertical cursor over a growing list of pages.
///
/// Drawing happens at the cursor; text that would run past
/// [`PageGeometry::overflow_y`] continues on a new page that carries the
/// identification line, with the active style restored.
pub struct PageCursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
    style: TextStyle,
}

impl PageCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            y: CONTENT_TOP,
            style: TextStyle::new(Font::TimesRoman, 12.0),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start a new page with the identification line; the cursor moves to
    /// [`CONTENT_TOP`]
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.push(DrawOp::Text {
            x: self.geometry.margin,
            y: HEADER_Y,
            style: HEADER_STYLE,
            text: HEADER_TEXT.to_string(),
        });
        self.y = CONTENT_TOP;
    }

    /// Draw one line at the cursor without moving it
    pub fn text(&mut self, text: &str, x: f32) {
        self.text_at(text, x, self.y);
    }

    /// Draw one line at an explicit baseline
    pub fn text_at(&mut self, text: &str, x: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            y,
            style: self.style,
            text: text.to_string(),
        });
    }

    /// Draw wrapped text, advancing `line_height` per line and breaking to a
    /// new page whenever the cursor passes the bottom limit
    pub fn wrapped_text(&mut self, text: &str, x: f32, max_width: f32, line_height: f32) {
        if text.trim().is_empty() || max_width <= 0.0 {
            return;
        }

        for line in wrap_text(text, self.style.font, self.style.size, max_width) {
            if self.y > self.geometry.overflow_y() {
                self.new_page();
            }
            self.text(&line, x);
            self.y += line_height;
        }
    }

    /// Stroke a rectangle; zero or negative extents draw nothing
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: u8) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            gray,
        });
    }

    /// Space left between the cursor and the bottom margin
    pub fn remaining_height(&self) -> f32 {
        (self.geometry.overflow_y() - self.y).max(0.0)
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}
