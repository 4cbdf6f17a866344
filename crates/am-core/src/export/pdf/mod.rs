//! Paginated PDF documents
//!
//! - [`layout`]: page cursor, fonts and text wrapping in millimeters
//! - `metrics`: per-glyph advance widths of the standard fonts
//! - [`renderer`]: the student and template document layouts
//! - [`writer`]: serialization of laid-out pages to PDF bytes

pub mod layout;
mod metrics;
mod renderer;
mod writer;

pub use layout::{DrawOp, Font, Page, PageCursor, PageGeometry};
pub use renderer::{DocumentRenderer, PdfExporter, RenderMode, RenderedDocument, ANSWER_REGION_LABEL};
pub use writer::{escape_pdf_string, PdfWriter};
