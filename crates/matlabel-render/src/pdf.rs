//! Minimal single-page PDF 1.4 serializer.
//!
//! # Design
//! - Only what a label needs: one page, base-14 Type1 fonts with
//!   `WinAnsiEncoding`, text and stroked lines. No compression, no embedding.
//! - Content streams stay 7-bit ASCII; WinAnsi bytes above 0x7E are written
//!   as octal escapes.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use matlabel_layout::{FontFace, Transform, win_ansi_byte};

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// Resource name a face is registered under on the page.
pub(crate) const fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::TimesBold => "F1",
        FontFace::TimesRoman => "F2",
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn number(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut text = format!("{rounded:.3}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Encode text as a PDF literal string body in `WinAnsiEncoding`.
///
/// Characters without a WinAnsi byte become `?`.
pub(crate) fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            Some(b'\\' | b'(' | b')') => {
                out.push('\\');
                out.push(ch);
            }
            Some(byte @ 0x20..=0x7E) => out.push(char::from(byte)),
            Some(byte) => {
                let _ = write!(out, "\\{byte:03o}");
            }
            None => out.push('?'),
        }
    }
    out
}

/// Page content operators.
#[derive(Debug, Default)]
pub(crate) struct ContentStream {
    ops: String,
}

impl ContentStream {
    pub(crate) fn save(&mut self) {
        self.ops.push_str("q\n");
    }

    pub(crate) fn restore(&mut self) {
        self.ops.push_str("Q\n");
    }

    pub(crate) fn concat(&mut self, transform: &Transform) {
        let _ = writeln!(
            self.ops,
            "{} {} {} {} {} {} cm",
            number(transform.a),
            number(transform.b),
            number(transform.c),
            number(transform.d),
            number(transform.e),
            number(transform.f),
        );
    }

    pub(crate) fn text(&mut self, face: FontFace, size: u16, x: f32, y: f32, text: &str) {
        let _ = writeln!(
            self.ops,
            "BT /{} {size} Tf {} {} Td ({}) Tj ET",
            font_resource(face),
            number(x),
            number(y),
            literal(text),
        );
    }

    pub(crate) fn line(&mut self, stroke: f32, x1: f32, x2: f32, y: f32) {
        let _ = writeln!(
            self.ops,
            "{} w {} {} m {} {} l S",
            number(stroke),
            number(x1),
            number(y),
            number(x2),
            number(y),
        );
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.ops.into_bytes()
    }
}

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone)]
pub(crate) struct DocumentInfo {
    pub(crate) title: String,
    pub(crate) producer: &'static str,
    pub(crate) created: DateTime<Utc>,
}

/// Serialize a one-page document.
pub(crate) fn write_document(
    page_width: f32,
    page_height: f32,
    content: ContentStream,
    info: &DocumentInfo,
) -> Vec<u8> {
    let mut writer = ObjectWriter::new();
    writer.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    let page = format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
         /Resources << /Font << /{} 5 0 R /{} 6 0 R >> >> /Contents 4 0 R >>",
        number(page_width),
        number(page_height),
        font_resource(FontFace::TimesBold),
        font_resource(FontFace::TimesRoman),
    );
    writer.object(page.as_bytes());
    writer.stream(&content.into_bytes());
    for face in [FontFace::TimesBold, FontFace::TimesRoman] {
        let font = format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            face.base_font()
        );
        writer.object(font.as_bytes());
    }
    let info_dict = format!(
        "<< /Title ({}) /Producer ({}) /CreationDate (D:{}Z) >>",
        literal(&info.title),
        literal(info.producer),
        info.created.format("%Y%m%d%H%M%S"),
    );
    writer.object(info_dict.as_bytes());
    writer.finish(1, 7)
}

struct ObjectWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            buf: HEADER.to_vec(),
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn object(&mut self, body: &[u8]) {
        self.begin();
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, data: &[u8]) {
        self.begin();
        self.buf
            .extend_from_slice(format!("<< /Length {} >>\nstream\n", data.len()).as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        let mut table = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(table, "{offset:010} 00000 n ");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(table.as_bytes());
        self.buf
    }
}
