//! PDF file writer
//!
//! Serializes laid-out pages into a PDF 1.4 file using the standard Times
//! and Courier fonts with WinAnsiEncoding. Output is byte-for-byte
//! deterministic: no creation date, no random file identifier.

use super::layout::{DrawOp, Font, Page, PageGeometry, MM_PER_PT};
use crate::error::{AmError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fmt::Write as _;
use std::io::Write;

/// Producer recorded in the document information dictionary
pub const PRODUCER: &str = "assignment-maker";

const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const INFO_OBJ: usize = 3;
const FIRST_FONT_OBJ: usize = 4;

/// Line width for rectangles, in points
const LINE_WIDTH_PT: f32 = 0.57;

/// Writes pages to PDF bytes
pub struct PdfWriter {
    geometry: PageGeometry,
    compress: bool,
    title: String,
}

impl PdfWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            compress: true,
            title: String::new(),
        }
    }

    /// Set whether to deflate content streams
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Serialize `pages`; an empty page list still yields one blank page
    pub fn write(&self, pages: &[Page]) -> Result<Vec<u8>> {
        let blank = [Page::default()];
        let pages = if pages.is_empty() { &blank[..] } else { pages };

        let first_page_obj = FIRST_FONT_OBJ + Font::ALL.len();
        let page_obj = |i: usize| first_page_obj + 2 * i;

        let mut objects: Vec<Vec<u8>> = Vec::with_capacity(first_page_obj + 2 * pages.len());

        objects.push(format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_OBJ).into_bytes());

        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", page_obj(i)))
            .collect();
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            )
            .into_bytes(),
        );

        let mut info = b"<< /Title (".to_vec();
        info.extend(escape_pdf_string(&self.title));
        info.extend(format!(") /Producer ({}) >>", PRODUCER).into_bytes());
        objects.push(info);

        for font in Font::ALL {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.pdf_name()
                )
                .into_bytes(),
            );
        }

        let font_resources: Vec<String> = Font::ALL
            .iter()
            .enumerate()
            .map(|(i, font)| format!("/{} {} 0 R", font.resource_name(), FIRST_FONT_OBJ + i))
            .collect();
        let font_resources = font_resources.join(" ");

        for (i, page) in pages.iter().enumerate() {
            objects.push(
                format!(
                    "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << {} >> >> /Contents {} 0 R >>",
                    PAGES_OBJ,
                    pt(self.geometry.width),
                    pt(self.geometry.height),
                    font_resources,
                    page_obj(i) + 1
                )
                .into_bytes(),
            );
            objects.push(self.content_stream(page)?);
        }

        assemble(&objects)
    }

    /// Build the stream object for one page
    fn content_stream(&self, page: &Page) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for op in &page.ops {
            self.write_op(&mut content, op);
        }

        let (data, filter) = if self.compress {
            (deflate(&content)?, " /Filter /FlateDecode")
        } else {
            (content, "")
        };

        let mut object = format!("<< /Length {}{} >>\nstream\n", data.len(), filter).into_bytes();
        object.extend(data);
        object.extend_from_slice(b"\nendstream");
        Ok(object)
    }

    fn write_op(&self, out: &mut Vec<u8>, op: &DrawOp) {
        let height = self.geometry.height;
        match op {
            DrawOp::Text { x, y, style, text } => {
                let mut head = String::new();
                let _ = write!(
                    head,
                    "BT /{} {} Tf {} g {} {} Td (",
                    style.font.resource_name(),
                    num(style.size),
                    gray(style.gray),
                    pt(*x),
                    pt(height - y)
                );
                out.extend(head.into_bytes());
                out.extend(escape_pdf_string(text));
                out.extend_from_slice(b") Tj ET\n");
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height: h,
                gray: g,
            } => {
                let line = format!(
                    "{} G {} w {} {} {} {} re S\n",
                    gray(*g),
                    num(LINE_WIDTH_PT),
                    pt(*x),
                    pt(height - y - h),
                    pt(*width),
                    pt(*h)
                );
                out.extend(line.into_bytes());
            }
        }
    }
}

/// Lay out header, numbered objects, xref table and trailer
fn assemble(objects: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    // Binary marker
    out.extend_from_slice(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n", i + 1)?;
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n", objects.len() + 1)?;
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        CATALOG_OBJ,
        INFO_OBJ,
        xref_offset
    )?;

    Ok(out)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| AmError::Pdf(format!("stream compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| AmError::Pdf(format!("stream compression failed: {}", e)))
}

/// Millimeters to points
fn pt(mm: f32) -> String {
    num(mm / MM_PER_PT)
}

/// Gray level 0..=255 as a PDF color component
fn gray(level: u8) -> String {
    num(f32::from(level) / 255.0)
}

/// Compact decimal with at most two fractional digits
fn num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Encode a string as the body of a PDF literal string in WinAnsiEncoding.
///
/// Latin-1 characters become octal escapes, a few common typographic
/// characters map to their WinAnsi codes, anything else becomes `?`.
pub fn escape_pdf_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.extend_from_slice(b"\\\\"),
            '(' => out.extend_from_slice(b"\\("),
            ')' => out.extend_from_slice(b"\\)"),
            '\t' => out.push(b' '),
            '\n' | '\r' => out.push(b' '),
            c if (' '..='~').contains(&c) => out.push(c as u8),
            c if ('\u{a0}'..='\u{ff}').contains(&c) => octal(&mut out, c as u32),
            c => match winansi_code(c) {
                Some(code) => octal(&mut out, code),
                None if c.is_control() => {}
                None => out.push(b'?'),
            },
        }
    }
    out
}

fn octal(out: &mut Vec<u8>, code: u32) {
    out.extend(format!("\\{:03o}", code).into_bytes());
}

fn winansi_code(c: char) -> Option<u32> {
    let code = match c {
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => return None,
    };
    Some(code)
}
